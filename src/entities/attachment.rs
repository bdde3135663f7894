// 📎 Attachment - receipt images registered against a transaction

use super::null_as_default;
use crate::request::Request;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Attachment {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub user_id: String,

    /// Transaction the attachment belongs to
    #[serde(deserialize_with = "null_as_default")]
    pub external_id: String,

    #[serde(deserialize_with = "null_as_default")]
    pub file_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub file_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created: String,
}

impl Attachment {
    pub fn tx_id(&self) -> &str {
        &self.external_id
    }

    /// Public URL, preferring `url` over the upload-time `file_url`
    pub fn url(&self) -> &str {
        if self.url.is_empty() {
            &self.file_url
        } else {
            &self.url
        }
    }

    pub fn self_deregister_request(&self) -> Request {
        Request::post("/attachment/deregister").body("id", self.id.as_str())
    }
}

/// Response of `/attachment/register`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentEnvelope {
    pub attachment: Attachment,
}

/// Response of `/attachment/upload`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentUploadResponse {
    pub file_url: String,
    pub upload_url: String,
}
