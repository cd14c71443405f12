//! Response types for the 1secmail API.

use serde::{Deserialize, Deserializer, Serialize};

/// Decode a field, treating explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One entry of a mailbox listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageSummary {
    /// Server-assigned id, unique within the mailbox.
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    /// Sender address.
    #[serde(deserialize_with = "null_as_default")]
    pub from: String,
    /// Subject line; may be empty.
    #[serde(deserialize_with = "null_as_default")]
    pub subject: String,
    /// Server-formatted timestamp, e.g. `2024-01-31 12:00:00`.
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
}

/// Full content of a single message.
///
/// Fields missing from the response, or sent as `null`, decode to their
/// defaults, so an empty JSON object yields a zero-valued detail (see
/// [`MessageDetail::is_empty`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageDetail {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub from: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subject: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub attachments: Vec<Attachment>,
    /// Raw combined body.
    #[serde(deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(rename = "textBody", deserialize_with = "null_as_default")]
    pub text_body: String,
    #[serde(rename = "htmlBody", deserialize_with = "null_as_default")]
    pub html_body: String,
}

impl MessageDetail {
    /// True for the zero-valued detail the service returns for unknown ids.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Attachment metadata.
///
/// The service describes attachments either as bare filenames or as
/// objects; both forms decode into this type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Attachment {
    pub filename: String,
    #[serde(rename = "contentType")]
    pub content_type: String,
    pub size: u64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AttachmentRepr {
    Name(String),
    Full {
        #[serde(default, deserialize_with = "null_as_default")]
        filename: String,
        #[serde(default, rename = "contentType", deserialize_with = "null_as_default")]
        content_type: String,
        #[serde(default, deserialize_with = "null_as_default")]
        size: u64,
    },
}

impl<'de> Deserialize<'de> for Attachment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match AttachmentRepr::deserialize(deserializer)? {
            AttachmentRepr::Name(filename) => Attachment {
                filename,
                ..Default::default()
            },
            AttachmentRepr::Full {
                filename,
                content_type,
                size,
            } => Attachment {
                filename,
                content_type,
                size,
            },
        })
    }
}
