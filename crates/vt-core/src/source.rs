use std::io;

/// Read access to one input image.
///
/// Implementors hand over the raw bytes and the media type declared by
/// whoever produced them. An empty media type means "unknown".
pub trait ImageSource: Send + Sync {
    fn read_bytes(&self) -> io::Result<Vec<u8>>;

    fn media_type(&self) -> &str;

    /// Short name for logs.
    fn describe(&self) -> String {
        format!("<{} image>", self.media_type())
    }
}

/// An image already held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryImage {
    bytes: Vec<u8>,
    media_type: String,
}

impl InMemoryImage {
    pub fn new(bytes: impl Into<Vec<u8>>, media_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            media_type: media_type.into(),
        }
    }
}

impl ImageSource for InMemoryImage {
    fn read_bytes(&self) -> io::Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }

    fn media_type(&self) -> &str {
        &self.media_type
    }
}
