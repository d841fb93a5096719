use serde::{Deserialize, Serialize};
use vt_core::EncodedImage;

/// Body of `POST <endpoint>`, for both async and blocking submissions.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TryOnRequest<'a> {
    pub user_image_base64: &'a str,
    pub outfit_image_base64: &'a str,
    pub user_image_mime_type: &'a str,
    pub outfit_image_mime_type: &'a str,
    #[serde(rename = "async")]
    pub async_mode: bool,
    #[serde(rename = "saveToS3")]
    pub save_to_s3: bool,
}

impl<'a> TryOnRequest<'a> {
    pub fn new(user: &'a EncodedImage, outfit: &'a EncodedImage, async_mode: bool) -> Self {
        Self {
            user_image_base64: &user.base64_payload,
            outfit_image_base64: &outfit.base64_payload,
            user_image_mime_type: &user.mime_type,
            outfit_image_mime_type: &outfit.mime_type,
            async_mode,
            save_to_s3: true,
        }
    }
}

/// Body of a blocking (`async: false`) response.
///
/// Both fields are optional on the wire; a missing or blank `imageUrl` is
/// judged by the state machine, not by the decoder.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl SyncResponse {
    pub fn new(message: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            image_url: Some(image_url.into()),
        }
    }
}

/// The part of an error body the client reads.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: Option<String>,
}
