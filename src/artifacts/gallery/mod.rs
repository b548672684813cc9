//! Gallery metadata and client-facing naming
//!
//! - `metadata`: gallery and image records as stored by the catalog
//! - `attachment`: archive naming and `Content-Disposition` values

pub mod attachment;
pub mod metadata;
