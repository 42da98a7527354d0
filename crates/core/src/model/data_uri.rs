use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DataUriError {
    #[error("data URI must start with `data:`")]
    MissingScheme,

    #[error("data URI is missing the `,` separating header and payload")]
    MissingSeparator,

    #[error("data URI must declare a MIME type")]
    MissingMimeType,

    #[error("data URI payload must be base64 encoded")]
    NotBase64,

    #[error("data URI payload is empty")]
    EmptyPayload,

    #[error("data URI payload is not valid base64: {0}")]
    InvalidPayload(String),
}

//
// ─── DATA URI ─────────────────────────────────────────────────────────────────
//

/// Binary content inlined as `data:<mimetype>;base64,<data>`.
///
/// Images travel to the recognition model and synthesized audio travels back
/// in this form. The MIME type keeps any parameters the producer attached
/// (for example `audio/L16;codec=pcm;rate=24000`).
#[derive(Clone, PartialEq, Eq)]
pub struct DataUri {
    mime_type: String,
    data: String,
}

impl DataUri {
    /// Parse and validate a `data:` URI.
    ///
    /// # Errors
    ///
    /// Returns `DataUriError` if the scheme, MIME type, base64 marker or
    /// payload are missing or malformed.
    pub fn parse(raw: &str) -> Result<Self, DataUriError> {
        let rest = raw
            .trim()
            .strip_prefix("data:")
            .ok_or(DataUriError::MissingScheme)?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or(DataUriError::MissingSeparator)?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or(DataUriError::NotBase64)?;
        if mime_type.trim().is_empty() {
            return Err(DataUriError::MissingMimeType);
        }
        if payload.is_empty() {
            return Err(DataUriError::EmptyPayload);
        }
        STANDARD
            .decode(payload)
            .map_err(|err| DataUriError::InvalidPayload(err.to_string()))?;

        Ok(Self {
            mime_type: mime_type.trim().to_string(),
            data: payload.to_string(),
        })
    }

    /// Encode raw bytes under the given MIME type.
    ///
    /// # Errors
    ///
    /// Returns `DataUriError::MissingMimeType` for a blank MIME type and
    /// `DataUriError::EmptyPayload` for empty content.
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Result<Self, DataUriError> {
        let mime_type = mime_type.into();
        if mime_type.trim().is_empty() {
            return Err(DataUriError::MissingMimeType);
        }
        if bytes.is_empty() {
            return Err(DataUriError::EmptyPayload);
        }
        Ok(Self {
            mime_type: mime_type.trim().to_string(),
            data: STANDARD.encode(bytes),
        })
    }

    /// Full MIME type including parameters.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// MIME type without parameters, lowercased (`audio/L16;rate=24000` → `audio/l16`).
    #[must_use]
    pub fn essence(&self) -> String {
        self.mime_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
    }

    /// Looks up a `key=value` parameter of the MIME type.
    #[must_use]
    pub fn mime_param(&self, key: &str) -> Option<&str> {
        self.mime_type.split(';').skip(1).find_map(|param| {
            let (name, value) = param.split_once('=')?;
            name.trim()
                .eq_ignore_ascii_case(key)
                .then_some(value.trim())
        })
    }

    #[must_use]
    pub fn is_image(&self) -> bool {
        self.essence().starts_with("image/")
    }

    #[must_use]
    pub fn is_audio(&self) -> bool {
        self.essence().starts_with("audio/")
    }

    /// The base64 payload as it appears in the URI.
    #[must_use]
    pub fn base64_data(&self) -> &str {
        &self.data
    }

    /// Decode the payload into raw bytes.
    ///
    /// # Errors
    ///
    /// Returns `DataUriError::InvalidPayload` if the payload is not valid base64.
    pub fn decode(&self) -> Result<Vec<u8>, DataUriError> {
        STANDARD
            .decode(&self.data)
            .map_err(|err| DataUriError::InvalidPayload(err.to_string()))
    }
}

impl FromStr for DataUri {
    type Err = DataUriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.data)
    }
}

// Payloads are large; keep them out of logs and panics.
impl fmt::Debug for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataUri")
            .field("mime_type", &self.mime_type)
            .field("base64_len", &self.data.len())
            .finish()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_image_uri() {
        let uri = DataUri::parse("data:image/png;base64,iVBORw0KGgo=").unwrap();
        assert_eq!(uri.mime_type(), "image/png");
        assert_eq!(uri.base64_data(), "iVBORw0KGgo=");
        assert!(uri.is_image());
        assert!(!uri.is_audio());
    }

    #[test]
    fn keeps_mime_parameters() {
        let uri = DataUri::parse("data:audio/L16;codec=pcm;rate=24000;base64,AAAA").unwrap();
        assert_eq!(uri.mime_type(), "audio/L16;codec=pcm;rate=24000");
        assert_eq!(uri.essence(), "audio/l16");
        assert_eq!(uri.mime_param("rate"), Some("24000"));
        assert_eq!(uri.mime_param("channels"), None);
        assert!(uri.is_audio());
    }

    #[test]
    fn rejects_malformed_uris() {
        assert_eq!(
            DataUri::parse("image/png;base64,AAAA").unwrap_err(),
            DataUriError::MissingScheme
        );
        assert_eq!(
            DataUri::parse("data:image/png;base64").unwrap_err(),
            DataUriError::MissingSeparator
        );
        assert_eq!(
            DataUri::parse("data:image/png,AAAA").unwrap_err(),
            DataUriError::NotBase64
        );
        assert_eq!(
            DataUri::parse("data:;base64,AAAA").unwrap_err(),
            DataUriError::MissingMimeType
        );
        assert_eq!(
            DataUri::parse("data:image/png;base64,").unwrap_err(),
            DataUriError::EmptyPayload
        );
        assert!(matches!(
            DataUri::parse("data:image/png;base64,@@@").unwrap_err(),
            DataUriError::InvalidPayload(_)
        ));
    }

    #[test]
    fn encodes_bytes_and_displays_as_uri() {
        let uri = DataUri::from_bytes("audio/wav", b"RIFF").unwrap();
        assert_eq!(uri.to_string(), "data:audio/wav;base64,UklGRg==");
        assert_eq!(uri.decode().unwrap(), b"RIFF");

        let parsed: DataUri = uri.to_string().parse().unwrap();
        assert_eq!(parsed, uri);
    }

    #[test]
    fn debug_output_hides_payload() {
        let uri = DataUri::from_bytes("image/jpeg", &[1, 2, 3]).unwrap();
        let debug = format!("{uri:?}");
        assert!(debug.contains("image/jpeg"));
        assert!(!debug.contains(uri.base64_data()));
    }
}
