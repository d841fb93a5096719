use std::io;
use std::path::{Path, PathBuf};

use vt_core::ImageSource;
use vt_core::media_type::mime_type_for_path;

/// An input image on disk. Its media type comes from the file extension.
#[derive(Debug, Clone)]
pub struct FileImageSource {
    path: PathBuf,
    media_type: &'static str,
}

impl FileImageSource {
    pub fn open(path: impl AsRef<Path>) -> vt_core::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let media_type = mime_type_for_path(&path)?;
        Ok(Self { path, media_type })
    }
}

impl ImageSource for FileImageSource {
    fn read_bytes(&self) -> io::Result<Vec<u8>> {
        std::fs::read(&self.path)
    }

    fn media_type(&self) -> &str {
        self.media_type
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
