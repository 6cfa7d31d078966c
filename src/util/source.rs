//! Input backing shared by the archive readers.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use memmap2::Mmap;

use super::{Error, Result};

/// Bytes backing an opened archive.
pub(crate) enum Source {
    /// Memory-mapped file (preferred)
    Mmap(Mmap),
    /// Whole file or caller-supplied buffer in memory
    Owned(Vec<u8>),
}

impl Source {
    /// Read a file into a source, mapping it when requested and non-empty.
    pub(crate) fn open(path: &Path, use_mmap: bool) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound(path.to_path_buf())
            } else {
                Error::Io(e)
            }
        })?;

        if use_mmap && file.metadata()?.len() > 0 {
            // Safety: the file is opened read-only; a concurrent writer
            // would invalidate the map, which callers must not allow.
            let mmap = unsafe { Mmap::map(&file) }.map_err(|e| Error::MmapFailed(e.to_string()))?;
            Ok(Self::Mmap(mmap))
        } else {
            let mut buf = Vec::new();
            let mut file = file;
            file.read_to_end(&mut buf)?;
            Ok(Self::Owned(buf))
        }
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        match self {
            Self::Mmap(mmap) => mmap,
            Self::Owned(buf) => buf,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_open_mapped_and_owned_agree() -> Result<()> {
        let mut temp = tempfile::NamedTempFile::new()?;
        temp.write_all(b"payload")?;
        temp.flush()?;

        let mapped = Source::open(temp.path(), true)?;
        let owned = Source::open(temp.path(), false)?;
        assert_eq!(mapped.as_slice(), owned.as_slice());
        assert_eq!(mapped.as_slice(), b"payload");
        Ok(())
    }

    #[test]
    fn test_open_missing_file() {
        match Source::open(Path::new("/nonexistent/archive.skm"), true) {
            Err(Error::FileNotFound(_)) => {}
            other => panic!("expected FileNotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_empty_file_falls_back_to_owned() -> Result<()> {
        let temp = tempfile::NamedTempFile::new()?;
        let source = Source::open(temp.path(), true)?;
        assert!(matches!(source, Source::Owned(_)));
        assert!(source.as_slice().is_empty());
        Ok(())
    }
}
