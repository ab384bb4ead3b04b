use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Deserialize;

/// A single status as the platform API returns it.
///
/// The record is owned by the platform; the sweeper only reads it. `content`
/// carries the raw formatted body (HTML) and must go through
/// `core::content::plain_text` before any grammar matching.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Status {
    pub id: String,
    /// Raw formatted body (HTML).
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Set only when the status has been edited after posting.
    #[serde(default)]
    pub edited_at: Option<DateTime<Utc>>,
    /// Identifier of the status this one replies to, if any.
    #[serde(default)]
    pub in_reply_to_id: Option<String>,
}

impl Status {
    /// Last-modified instant of the status, normalized to `tz`.
    ///
    /// This is the base every defaulted or relative deadline computation
    /// works against: the edit time when the status was edited, the creation
    /// time otherwise.
    pub fn reference_time(&self, tz: Tz) -> DateTime<Tz> {
        self.edited_at.unwrap_or(self.created_at).with_timezone(&tz)
    }
}

/// The authenticated account, as returned by credential verification.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Account {
    pub id: String,
    pub username: String,
}

#[cfg(test)]
mod tests {
    use chrono_tz::Asia::Seoul;

    use super::*;

    #[test]
    fn deserializes_wire_shape() {
        let raw = r#"{
            "id": "113471119262",
            "content": "<p>#deleteit 1h</p>",
            "created_at": "2024-03-10T00:00:00.000Z",
            "edited_at": null,
            "in_reply_to_id": "113471119000",
            "visibility": "public",
            "favourites_count": 0
        }"#;

        let status: Status = serde_json::from_str(raw).unwrap();
        assert_eq!(status.id, "113471119262");
        assert_eq!(status.edited_at, None);
        assert_eq!(status.in_reply_to_id.as_deref(), Some("113471119000"));
    }

    #[test]
    fn reference_time_prefers_edit_over_creation() {
        let raw = r#"{
            "id": "1",
            "content": "<p>#deleteit</p>",
            "created_at": "2024-03-10T00:00:00Z",
            "edited_at": "2024-03-11T03:30:00Z"
        }"#;

        let status: Status = serde_json::from_str(raw).unwrap();
        let reference = status.reference_time(Seoul);
        // 03:30 UTC is 12:30 in Seoul (UTC+9)
        assert_eq!(reference.to_string(), "2024-03-11 12:30:00 KST");
    }
}
