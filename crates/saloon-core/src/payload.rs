//! Transportable encoded image payloads.
//!
//! An [`ImagePayload`] is the bare base64 body of an encoded image plus its
//! MIME type. The data-URL header (`data:image/jpeg;base64,`) is never part of
//! `data`; it is added back only when a front end needs a displayable URL.

use crate::error::{Result, SaloonError};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use serde::{Deserialize, Serialize};
use std::fmt;

/// MIME type produced by the frame capturer.
pub const JPEG_MIME: &str = "image/jpeg";

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    mime_type: String,
    data: String,
}

impl ImagePayload {
    /// Wraps an already base64-encoded body.
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Encodes raw image bytes.
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self::new(mime_type, BASE64_STANDARD.encode(bytes))
    }

    /// Parses a `data:<mime>;base64,<body>` URL, stripping the header.
    pub fn from_data_url(url: &str) -> Result<Self> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| SaloonError::image("data URL must start with 'data:'"))?;
        let (header, body) = rest
            .split_once(',')
            .ok_or_else(|| SaloonError::image("data URL has no ',' separator"))?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| SaloonError::image("only base64 data URLs are supported"))?;
        if mime_type.is_empty() {
            return Err(SaloonError::image("data URL has an empty MIME type"));
        }
        Ok(Self::new(mime_type, body))
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The base64 body, without any format header.
    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Decodes the body back to raw image bytes.
    pub fn decode(&self) -> Result<Vec<u8>> {
        Ok(BASE64_STANDARD.decode(self.data.as_bytes())?)
    }

    /// File extension matching the MIME type.
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/png" => "png",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "bin",
        }
    }
}

// Payload bodies run to hundreds of kilobytes; keep them out of logs.
impl fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImagePayload")
            .field("mime_type", &self.mime_type)
            .field("data_len", &self.data.len())
            .finish()
    }
}
