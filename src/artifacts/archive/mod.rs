//! Store-only ZIP archive format
//!
//! Archives are assembled entirely in memory from an ordered list of entries.
//! No compression, encryption or ZIP64 extension is ever used.
//!
//! ## Layout
//!
//! ```text
//! For each entry, in append order:
//!   Local file header (30 bytes + name)
//!   Raw entry content
//!
//! For each entry, in append order:
//!   Central directory header (46 bytes + name)
//!
//! End of central directory record (22 bytes)
//! ```
//!
//! Every multi-byte integer is little-endian. Every central directory header
//! records the byte offset of its local file header, so the archive is only
//! valid if those offsets match the real positions in the output.

pub mod archive_entry;
pub mod assembler;
pub mod central_directory_header;
pub mod checksum;
pub mod end_of_central_directory;
pub mod listing;
pub mod local_file_header;
pub mod name_registry;
pub mod record;

/// Signature of a local file header (`PK\x03\x04`)
pub const LOCAL_FILE_HEADER_SIGNATURE: u32 = 0x0403_4b50;

/// Signature of a central directory header (`PK\x01\x02`)
pub const CENTRAL_DIRECTORY_HEADER_SIGNATURE: u32 = 0x0201_4b50;

/// Signature of the end of central directory record (`PK\x05\x06`)
pub const END_OF_CENTRAL_DIRECTORY_SIGNATURE: u32 = 0x0605_4b50;

/// Fixed part of a local file header, without the name
pub const LOCAL_FILE_HEADER_SIZE: usize = 30;

/// Fixed part of a central directory header, without the name
pub const CENTRAL_DIRECTORY_HEADER_SIZE: usize = 46;

/// Size of the end of central directory record (no comment)
pub const END_OF_CENTRAL_DIRECTORY_SIZE: usize = 22;

/// ZIP specification version 2.0, written as both "made by" and "needed"
pub const ZIP_VERSION: u16 = 20;

/// Compression method 0: stored without compression
pub const COMPRESSION_STORED: u16 = 0;
