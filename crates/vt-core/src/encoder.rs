//! Transport encoding for input images.
//!
//! Payloads are plain standard base64 (with padding). A `data:` URI envelope
//! is never part of an [`EncodedImage`]; [`EncodedImage::from_data_uri`] strips
//! one if the text came from a "read as data URL" primitive.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;

use crate::error::{Result, TryOnError};
use crate::media_type::sniff_mime_type;
use crate::source::ImageSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub base64_payload: String,
    pub mime_type: String,
}

impl EncodedImage {
    /// Parse `data:<mime>;base64,<payload>` text, or a bare payload.
    ///
    /// The envelope's media type wins over `declared_mime` when it names one.
    pub fn from_data_uri(text: &str, declared_mime: &str) -> Result<Self> {
        let text = text.trim();

        let Some(rest) = text.strip_prefix("data:") else {
            return Ok(Self {
                base64_payload: text.to_string(),
                mime_type: declared_mime.to_string(),
            });
        };

        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| TryOnError::Encoding("data URI has no payload".into()))?;

        let mut params = header.split(';');
        let envelope_mime = params.next().unwrap_or_default().trim();
        if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
            return Err(TryOnError::Encoding("data URI is not base64-encoded".into()));
        }

        let mime_type = if envelope_mime.is_empty() {
            declared_mime
        } else {
            envelope_mime
        };

        Ok(Self {
            base64_payload: payload.to_string(),
            mime_type: mime_type.to_string(),
        })
    }

    pub fn decode(&self) -> Result<Vec<u8>> {
        STANDARD
            .decode(self.base64_payload.as_bytes())
            .map_err(|e| TryOnError::Encoding(format!("invalid base64 payload: {}", e)))
    }

    pub fn encoded_len(&self) -> usize {
        self.base64_payload.len()
    }
}

pub fn encode(bytes: &[u8], mime_type: impl Into<String>) -> EncodedImage {
    EncodedImage {
        base64_payload: STANDARD.encode(bytes),
        mime_type: mime_type.into(),
    }
}

/// Read and encode one image source.
///
/// A source with no declared media type gets one sniffed from its bytes.
pub fn encode_source(source: &dyn ImageSource) -> Result<EncodedImage> {
    let bytes = source
        .read_bytes()
        .map_err(|e| TryOnError::Encoding(format!("{}: {}", source.describe(), e)))?;

    let declared = source.media_type().trim();
    let mime_type = if declared.is_empty() {
        sniff_mime_type(&bytes).ok_or_else(|| {
            TryOnError::Encoding(format!("{}: unknown image type", source.describe()))
        })?
    } else {
        declared
    };

    debug!(source = %source.describe(), bytes = bytes.len(), mime_type, "encoded image");

    Ok(encode(&bytes, mime_type))
}
