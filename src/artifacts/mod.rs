//! Photo transfer data structures and algorithms
//!
//! - `archive`: store-only ZIP construction (CRC-32, records, name
//!   deduplication, assembly, listing)
//! - `gallery`: gallery/image metadata and download naming

pub mod archive;
pub mod gallery;
