use super::ReadAt;
use crate::error::{InspectError, Result};
use async_trait::async_trait;
use std::path::Path;

/// Local file reader with random access support.
///
/// The handle is closed when the reader is dropped.
pub struct LocalFileReader {
    file: std::fs::File,
    size: u64,
}

impl LocalFileReader {
    pub fn new(path: &Path) -> Result<Self> {
        let open_err = |source| InspectError::Open {
            path: path.to_path_buf(),
            source,
        };
        let file = std::fs::File::open(path).map_err(open_err)?;
        let size = file.metadata().map_err(open_err)?.len();
        tracing::debug!("opened {} ({} bytes)", path.display(), size);
        Ok(Self { file, size })
    }
}

#[async_trait]
impl ReadAt for LocalFileReader {
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> std::io::Result<usize> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::FileExt;
            self.file.read_at(buf, offset)
        }

        #[cfg(windows)]
        {
            use std::os::windows::fs::FileExt;
            self.file.seek_read(buf, offset)
        }

        #[cfg(not(any(unix, windows)))]
        {
            use std::io::{Read, Seek, SeekFrom};
            let mut file = &self.file;
            file.seek(SeekFrom::Start(offset))?;
            file.read(buf)
        }
    }

    fn size(&self) -> u64 {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_is_open_error() {
        let err = LocalFileReader::new(Path::new("does/not/exist.dawproject"))
            .err()
            .unwrap();
        assert!(matches!(err, InspectError::Open { .. }));
        assert!(err.to_string().contains("does/not/exist.dawproject"));
    }

    #[tokio::test]
    async fn reads_at_offset() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"0123456789").unwrap();
        tmp.flush().unwrap();

        let reader = LocalFileReader::new(tmp.path()).unwrap();
        assert_eq!(reader.size(), 10);

        let mut buf = [0u8; 4];
        reader.read_exact_at(3, &mut buf).await.unwrap();
        assert_eq!(&buf, b"3456");

        let mut past_end = [0u8; 4];
        assert!(reader.read_exact_at(8, &mut past_end).await.is_err());
    }
}
