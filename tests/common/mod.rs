#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use bytes::Bytes;
use chrono::{DateTime, Duration, TimeZone, Utc};
use fake::Fake;
use fake::faker::lorem::en::Word;
use fake::faker::name::en::Name;
use phototransfer::areas::catalog::{CatalogDocument, JsonCatalog};
use phototransfer::areas::storage::MemoryObjectStore;
use phototransfer::areas::transfer::{Transfer, TransferOptions};
use phototransfer::artifacts::gallery::metadata::{Gallery, GalleryImage};
use phototransfer::server::router;
use rstest::fixture;
use std::sync::Arc;
use tower::ServiceExt;

pub const WEDDING_TOKEN: &str = "wedding-token";
pub const EMPTY_TOKEN: &str = "empty-token";
pub const EXPIRED_TOKEN: &str = "expired-token";
pub const BROKEN_TOKEN: &str = "broken-token";

pub fn timestamp(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap() + Duration::minutes(minutes)
}

pub fn gallery(id: u64, share_token: &str, title: &str) -> Gallery {
    Gallery {
        id,
        title: title.to_string(),
        description: Some(Word().fake()),
        photographer_name: Name().fake(),
        share_token: share_token.to_string(),
        expires_at: None,
        created_at: timestamp(0),
    }
}

pub fn image(id: u64, gallery_id: u64, filename: &str) -> GalleryImage {
    GalleryImage {
        id,
        gallery_id,
        filename: filename.to_string(),
        original_key: format!("originals/{gallery_id}/{id}.bin"),
        thumb_key: None,
        size_bytes: None,
        mime_type: Some("image/jpeg".to_string()),
        width: Some(4000),
        height: Some(3000),
        uploaded_at: timestamp(id as i64),
    }
}

/// Catalog with one gallery per failure mode plus a healthy wedding gallery
pub fn catalog_document() -> CatalogDocument {
    let mut expired = gallery(3, EXPIRED_TOKEN, "Last Year");
    expired.expires_at = Some(Utc::now() - Duration::days(1));

    let mut thumbed = image(2, 1, "photo.jpg");
    thumbed.thumb_key = Some("thumbs/1/2.jpg".to_string());

    CatalogDocument {
        galleries: vec![
            gallery(1, WEDDING_TOKEN, "Summer Wedding! 2024"),
            gallery(2, EMPTY_TOKEN, "Empty"),
            expired,
            gallery(4, BROKEN_TOKEN, "Broken"),
        ],
        images: vec![
            image(1, 1, "photo.jpg"),
            thumbed,
            image(3, 3, "old.jpg"),
            image(4, 4, "kept.jpg"),
            image(5, 4, "lost.jpg"),
        ],
    }
}

pub fn object_store() -> MemoryObjectStore {
    MemoryObjectStore::new()
        .with_object("originals/1/1.bin", b"X".to_vec())
        .with_object("originals/1/2.bin", b"Y".to_vec())
        .with_object("thumbs/1/2.jpg", b"y".to_vec())
        .with_object("originals/3/3.bin", b"old".to_vec())
        .with_object("originals/4/4.bin", b"kept".to_vec())
}

#[fixture]
pub fn app() -> Router {
    let catalog = JsonCatalog::from_document(catalog_document()).expect("valid catalog");
    let transfer = Transfer::new(object_store(), catalog, TransferOptions::new(4));

    router(Arc::new(transfer))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> &str {
        self.headers
            .get(name)
            .unwrap_or_else(|| panic!("missing header {name}"))
            .to_str()
            .expect("visible ASCII header")
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("JSON body")
    }
}

pub async fn get(app: Router, uri: &str) -> TestResponse {
    let request = Request::get(uri).body(Body::empty()).expect("valid request");
    let response = app.oneshot(request).await.expect("infallible router");

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");

    TestResponse {
        status,
        headers,
        body,
    }
}

// Helper function to create hexdump representation
pub fn to_hexdump(data: &[u8]) -> String {
    let mut result = String::new();
    for (i, chunk) in data.chunks(16).enumerate() {
        result.push_str(&format!("{:08x}: ", i * 16));

        for (j, byte) in chunk.iter().enumerate() {
            if j == 8 {
                result.push(' ');
            }
            result.push_str(&format!("{:02x} ", byte));
        }

        for j in chunk.len()..16 {
            if j == 8 {
                result.push(' ');
            }
            result.push_str("   ");
        }

        result.push_str(" |");
        for byte in chunk {
            if byte.is_ascii_graphic() {
                result.push(*byte as char);
            } else {
                result.push('.');
            }
        }

        result.push_str("|\n");
    }
    result
}

// Macro to compare archive bytes with hexdump output on failure
#[macro_export]
macro_rules! assert_archive_eq {
    ($actual:expr, $expected:expr) => {
        if $actual != $expected {
            pretty_assertions::assert_eq!(
                common::to_hexdump($actual),
                common::to_hexdump($expected),
                "\n=== ARCHIVES DIFFER ===\nactual ({} bytes) vs expected ({} bytes)",
                $actual.len(),
                $expected.len()
            );
        }
    };
}
