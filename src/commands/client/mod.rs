//! Client-facing operations, all addressed by a gallery share token
//!
//! - `gallery_view`: gallery metadata and image listing
//! - `download`: one original as an attachment
//! - `thumbnail`: one preview for inline display
//! - `download_all`: every original packed into a single archive
pub mod download;
pub mod download_all;
pub mod gallery_view;
pub mod thumbnail;
