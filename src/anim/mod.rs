//! Keyframe storage and animation-kind tags.
//!
//! The formats store raw (time, value) samples plus a one-byte kind tag; no
//! interpolation is ever evaluated here. The tag tells downstream consumers
//! how to blend between samples (linear, TCB spline, or step hold).

use std::ops::Index;

/// How a consumer should interpolate between stored keyframes.
///
/// The numeric values are the on-wire tag bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum AnimationKind {
    /// Not animated: a single static value.
    None = 0,
    /// Linear interpolation between keys.
    Linear = 1,
    /// Tension-Continuity-Bias spline interpolation.
    Tcb = 2,
    /// Step hold: the value stays constant until the next key time.
    State = 3,
}

impl AnimationKind {
    /// Wire tag byte for this kind.
    #[inline]
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Decode a wire tag byte.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::Linear),
            2 => Some(Self::Tcb),
            3 => Some(Self::State),
            _ => None,
        }
    }

    /// True for any kind other than `None`.
    #[inline]
    pub fn is_animated(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// One keyframe: a time in seconds and a value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Key<T> {
    pub time: f32,
    pub value: T,
}

/// Ordered sequence of keyframes for one animated channel.
///
/// A pure sample store: `len()` is the exact count the codec persists, and
/// keys are kept in insertion order. Callers are expected to push keys in
/// non-decreasing time order; the store does not sort (sorting would change
/// the output bytes relative to what the producer supplied).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Keys<T> {
    keys: Vec<Key<T>>,
}

impl<T> Keys<T> {
    /// Create an empty key store.
    pub fn new() -> Self {
        Self { keys: Vec::new() }
    }

    /// Append a keyframe.
    pub fn push(&mut self, time: f32, value: T) {
        self.keys.push(Key { time, value });
    }

    /// Number of stored keyframes.
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True if no keyframes are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Get a keyframe by position, `None` when out of range.
    pub fn get(&self, index: usize) -> Option<&Key<T>> {
        self.keys.get(index)
    }

    /// All keyframes in insertion order.
    #[inline]
    pub fn as_slice(&self) -> &[Key<T>] {
        &self.keys
    }

    /// Iterate over keyframes in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Key<T>> {
        self.keys.iter()
    }
}

impl<T> Index<usize> for Keys<T> {
    type Output = Key<T>;

    /// Positional access. Out-of-range indexing is a programmer error and
    /// panics like slice indexing does.
    fn index(&self, index: usize) -> &Key<T> {
        &self.keys[index]
    }
}

impl<T> FromIterator<(f32, T)> for Keys<T> {
    fn from_iter<I: IntoIterator<Item = (f32, T)>>(iter: I) -> Self {
        Self {
            keys: iter
                .into_iter()
                .map(|(time, value)| Key { time, value })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags_round_trip() {
        for tag in 0..=3u8 {
            assert_eq!(AnimationKind::from_u8(tag).unwrap().to_u8(), tag);
        }
        assert_eq!(AnimationKind::from_u8(4), None);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut keys = Keys::new();
        keys.push(0.0, 1);
        keys.push(0.5, 7);
        keys.push(0.5, 3); // duplicate time stays put

        assert_eq!(keys.len(), 3);
        assert_eq!(keys[1].value, 7);
        assert_eq!(keys[2].value, 3);
        assert_eq!(keys.get(3), None);
    }

    #[test]
    fn test_from_iter() {
        let keys: Keys<f32> = vec![(0.0, 1.0), (1.0, 2.0)].into_iter().collect();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[1].time, 1.0);
    }
}
