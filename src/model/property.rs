//! Named, typed, optionally animated per-mesh properties.
//!
//! A property is a tagged union of type × animation kind × payload. The
//! format can animate only Float and Int properties; the representation here
//! makes an animated Boolean/Vector3/String property unconstructable instead
//! of failing at encode time.

use std::fmt;

use crate::anim::{AnimationKind, Keys};
use crate::util::{Error, Result, Vec3};

/// Wire type tag of a property value.
///
/// The numeric values are the on-wire tag bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum PropertyType {
    Boolean = 0,
    Int = 1,
    Float = 2,
    Vector3 = 3,
    String = 4,
}

impl PropertyType {
    /// Wire tag byte for this type.
    #[inline]
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Decode a wire tag byte.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Boolean),
            1 => Some(Self::Int),
            2 => Some(Self::Float),
            3 => Some(Self::Vector3),
            4 => Some(Self::String),
            _ => None,
        }
    }

    /// True for the two types the format can animate.
    #[inline]
    pub fn is_animatable(self) -> bool {
        matches!(self, Self::Float | Self::Int)
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Boolean => "Boolean",
            Self::Int => "Int",
            Self::Float => "Float",
            Self::Vector3 => "Vector3",
            Self::String => "String",
        };
        f.write_str(name)
    }
}

/// A single static property value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i32),
    Float(f32),
    Vector3(Vec3),
    String(String),
}

impl Value {
    /// The type tag of this value.
    pub fn property_type(&self) -> PropertyType {
        match self {
            Self::Bool(_) => PropertyType::Boolean,
            Self::Int(_) => PropertyType::Int,
            Self::Float(_) => PropertyType::Float,
            Self::Vector3(_) => PropertyType::Vector3,
            Self::String(_) => PropertyType::String,
        }
    }

    /// The zero value of a type, used as the initial static payload.
    pub fn default_of(ty: PropertyType) -> Self {
        match ty {
            PropertyType::Boolean => Self::Bool(false),
            PropertyType::Int => Self::Int(0),
            PropertyType::Float => Self::Float(0.0),
            PropertyType::Vector3 => Self::Vector3(Vec3::ZERO),
            PropertyType::String => Self::String(String::new()),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}
impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}
impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}
impl From<Vec3> for Value {
    fn from(v: Vec3) -> Self {
        Self::Vector3(v)
    }
}
impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}
impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

/// Payload of a property: a static value or one animated channel.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyData {
    /// Static value, animation kind `None`.
    Constant(Value),
    /// Animated float channel.
    FloatKeys { kind: AnimationKind, keys: Keys<f32> },
    /// Animated int channel. Always state-interpolated on the wire, see
    /// [`Property::animated_int`].
    IntKeys { kind: AnimationKind, keys: Keys<i32> },
}

/// One named, typed, possibly time-varying value attached to a mesh.
///
/// Immutable once extraction has filled it in; the codec only reads it.
/// Duplicate names within one mesh are a producer error the format does not
/// detect.
#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    name: String,
    data: PropertyData,
}

impl Property {
    /// Create a property with the given type and animation kind.
    ///
    /// A non-`None` kind is rejected with [`Error::AnimatedTypeUnsupported`]
    /// unless the type is Float or Int. A `None` kind yields a static
    /// property holding the type's zero value until [`set_value`] replaces it.
    ///
    /// [`set_value`]: Property::set_value
    pub fn new(name: impl Into<String>, ty: PropertyType, kind: AnimationKind) -> Result<Self> {
        let name = name.into();
        let data = match (ty, kind) {
            (ty, AnimationKind::None) => PropertyData::Constant(Value::default_of(ty)),
            (PropertyType::Float, kind) => PropertyData::FloatKeys {
                kind,
                keys: Keys::new(),
            },
            (PropertyType::Int, kind) => PropertyData::IntKeys {
                kind,
                keys: Keys::new(),
            },
            (ty, _) => return Err(Error::AnimatedTypeUnsupported(ty)),
        };
        Ok(Self { name, data })
    }

    /// Create a static property in one step.
    pub fn constant(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            data: PropertyData::Constant(value.into()),
        }
    }

    /// Create an animated int channel.
    ///
    /// Int channels are always written with the `State` (step) kind, whatever
    /// interpolation the source control used; consumers hold each value until
    /// the next key time.
    pub fn animated_int(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: PropertyData::IntKeys {
                kind: AnimationKind::State,
                keys: Keys::new(),
            },
        }
    }

    /// Assemble a property from raw parts (used by the decoder).
    pub(crate) fn from_parts(name: String, data: PropertyData) -> Self {
        Self { name, data }
    }

    /// Property name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value type tag.
    pub fn property_type(&self) -> PropertyType {
        match &self.data {
            PropertyData::Constant(v) => v.property_type(),
            PropertyData::FloatKeys { .. } => PropertyType::Float,
            PropertyData::IntKeys { .. } => PropertyType::Int,
        }
    }

    /// The animation kind tag.
    pub fn animation_kind(&self) -> AnimationKind {
        match &self.data {
            PropertyData::Constant(_) => AnimationKind::None,
            PropertyData::FloatKeys { kind, .. } | PropertyData::IntKeys { kind, .. } => *kind,
        }
    }

    /// True when the property carries a keyframe channel.
    #[inline]
    pub fn is_animated(&self) -> bool {
        !matches!(self.data, PropertyData::Constant(_))
    }

    /// The payload.
    #[inline]
    pub fn data(&self) -> &PropertyData {
        &self.data
    }

    /// The static value, `None` for animated properties.
    pub fn value(&self) -> Option<&Value> {
        match &self.data {
            PropertyData::Constant(v) => Some(v),
            _ => None,
        }
    }

    /// The float keyframes, `None` unless this is an animated float channel.
    pub fn float_keys(&self) -> Option<&Keys<f32>> {
        match &self.data {
            PropertyData::FloatKeys { keys, .. } => Some(keys),
            _ => None,
        }
    }

    /// The int keyframes, `None` unless this is an animated int channel.
    pub fn int_keys(&self) -> Option<&Keys<i32>> {
        match &self.data {
            PropertyData::IntKeys { keys, .. } => Some(keys),
            _ => None,
        }
    }

    /// Replace the static value. Fails with [`Error::NotConstant`] on an
    /// animated property and [`Error::TypeMismatch`] when the value variant
    /// differs from the declared type.
    pub fn set_value(&mut self, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        match &mut self.data {
            PropertyData::Constant(current) => {
                if current.property_type() != value.property_type() {
                    return Err(Error::TypeMismatch {
                        name: self.name.clone(),
                        expected: current.property_type(),
                        actual: value.property_type(),
                    });
                }
                *current = value;
                Ok(())
            }
            _ => Err(Error::NotConstant(self.name.clone())),
        }
    }

    /// Append a keyframe. Fails with [`Error::NotAnimated`] on a static
    /// property and [`Error::TypeMismatch`] when the value variant differs
    /// from the channel type. Keys are stored in caller order.
    pub fn add_key(&mut self, time: f32, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let mismatch = |expected: PropertyType, actual: &Value, name: &str| Error::TypeMismatch {
            name: name.to_string(),
            expected,
            actual: actual.property_type(),
        };

        match &mut self.data {
            PropertyData::Constant(_) => Err(Error::NotAnimated(self.name.clone())),
            PropertyData::FloatKeys { keys, .. } => match value {
                Value::Float(v) => {
                    keys.push(time, v);
                    Ok(())
                }
                other => Err(mismatch(PropertyType::Float, &other, &self.name)),
            },
            PropertyData::IntKeys { keys, .. } => match value {
                Value::Int(v) => {
                    keys.push(time, v);
                    Ok(())
                }
                other => Err(mismatch(PropertyType::Int, &other, &self.name)),
            },
        }
    }

    /// Append an int keyframe from a float-valued control sample.
    ///
    /// Int channels are driven by float-valued controls and truncate toward
    /// zero; extraction code feeding this crate should use this instead of
    /// rounding.
    pub fn add_int_key_from_control(&mut self, time: f32, raw: f32) -> Result<()> {
        self.add_key(time, raw as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_tags_round_trip() {
        for tag in 0..=4u8 {
            assert_eq!(PropertyType::from_u8(tag).unwrap().to_u8(), tag);
        }
        assert_eq!(PropertyType::from_u8(5), None);
    }

    #[test]
    fn test_animated_non_numeric_rejected() {
        for ty in [
            PropertyType::Boolean,
            PropertyType::Vector3,
            PropertyType::String,
        ] {
            let err = Property::new("p", ty, AnimationKind::Linear).unwrap_err();
            assert!(matches!(err, Error::AnimatedTypeUnsupported(t) if t == ty));
        }
        assert!(Property::new("p", PropertyType::Float, AnimationKind::Tcb).is_ok());
        assert!(Property::new("p", PropertyType::Int, AnimationKind::State).is_ok());
    }

    #[test]
    fn test_static_value_type_checked() {
        let mut prop = Property::new("visibility", PropertyType::Float, AnimationKind::None)
            .unwrap();
        assert_eq!(prop.value(), Some(&Value::Float(0.0)));

        prop.set_value(1.0f32).unwrap();
        assert_eq!(prop.value(), Some(&Value::Float(1.0)));

        let err = prop.set_value(3).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }

    #[test]
    fn test_add_key_on_static_rejected() {
        let mut prop = Property::constant("solid", true);
        assert!(matches!(
            prop.add_key(0.0, 1.0f32),
            Err(Error::NotAnimated(_))
        ));
    }

    #[test]
    fn test_set_value_on_animated_rejected() {
        let mut prop = Property::new("glow", PropertyType::Float, AnimationKind::Linear).unwrap();
        assert!(matches!(
            prop.set_value(1.0f32),
            Err(Error::NotConstant(_))
        ));
    }

    #[test]
    fn test_int_channel_forced_to_state() {
        // Int channels always carry the State tag, even when the source
        // control was linear or TCB.
        let prop = Property::animated_int("frame_index");
        assert_eq!(prop.animation_kind(), AnimationKind::State);
        assert_eq!(prop.property_type(), PropertyType::Int);
    }

    #[test]
    fn test_int_key_truncates_toward_zero() {
        let mut prop = Property::animated_int("frame_index");
        prop.add_int_key_from_control(0.0, -1.7).unwrap();
        prop.add_int_key_from_control(1.0, 2.9).unwrap();

        let keys = prop.int_keys().unwrap();
        assert_eq!(keys[0].value, -1);
        assert_eq!(keys[1].value, 2);
    }
}
