use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A gallery shared with clients through its share token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gallery {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub photographer_name: String,
    /// Opaque credential granting read access without authentication
    pub share_token: String,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Gallery {
    /// A gallery is expired once its expiry time lies strictly in the past
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at < now)
    }
}

/// One uploaded image belonging to a gallery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: u64,
    pub gallery_id: u64,
    /// Original upload file name, possibly empty
    #[serde(default)]
    pub filename: String,
    /// Storage key of the original upload
    pub original_key: String,
    /// Storage key of the generated thumbnail
    #[serde(default)]
    pub thumb_key: Option<String>,
    #[serde(default)]
    pub size_bytes: Option<u64>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    pub uploaded_at: DateTime<Utc>,
}

impl GalleryImage {
    /// File name to offer clients, `None` when the upload had none
    pub fn desired_name(&self) -> Option<&str> {
        Some(self.filename.as_str()).filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rstest::rstest;

    fn gallery(expires_at: Option<DateTime<Utc>>) -> Gallery {
        Gallery {
            id: 1,
            title: "Summer Wedding".to_string(),
            description: None,
            photographer_name: "Ana".to_string(),
            share_token: "token".to_string(),
            expires_at,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    #[case::never_expires(None, false)]
    #[case::expires_later(Some(Duration::hours(1)), false)]
    #[case::expired(Some(Duration::hours(-1)), true)]
    fn expiry_is_relative_to_now(#[case] offset: Option<Duration>, #[case] expired: bool) {
        let now = Utc::now();
        let gallery = gallery(offset.map(|offset| now + offset));

        assert_eq!(gallery.is_expired_at(now), expired);
    }

    #[test]
    fn expiry_exactly_now_is_still_valid() {
        let now = Utc::now();

        assert!(!gallery(Some(now)).is_expired_at(now));
    }

    #[test]
    fn deserializes_with_optional_fields_missing() {
        let image: GalleryImage = serde_json::from_str(
            r#"{
                "id": 3,
                "gallery_id": 1,
                "original_key": "originals/1/abc.jpg",
                "uploaded_at": "2024-06-01T12:00:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(image.desired_name(), None);
        assert_eq!(image.thumb_key, None);
    }
}
