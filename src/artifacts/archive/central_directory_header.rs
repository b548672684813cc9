//! Central directory header
//!
//! One per entry, written after all entry data in append order. Each header
//! points back at its entry's local file header.
//!
//! ## Format
//!
//! ```text
//! signature                     4  0x02014b50
//! version made by               2  20
//! version needed                2  20
//! flags                         2  0
//! compression method            2  0 (stored)
//! modification time             2  0
//! modification date             2  0
//! crc-32                        4
//! compressed size               4  == uncompressed size
//! uncompressed size             4
//! name length                   2
//! extra field length            2  0
//! comment length                2  0
//! disk number start             2  0
//! internal attributes           2  0
//! external attributes           4  0
//! local header offset           4
//! name                          variable
//! ```

use crate::artifacts::archive::record::{Packable, Unpackable};
use crate::artifacts::archive::{
    CENTRAL_DIRECTORY_HEADER_SIGNATURE, CENTRAL_DIRECTORY_HEADER_SIZE, COMPRESSION_STORED,
    ZIP_VERSION,
};
use anyhow::Context;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct CentralDirectoryHeader {
    /// Entry name, identical to the one in the local file header
    pub name: String,
    /// CRC-32 of the entry content
    pub crc32: u32,
    /// Content length
    pub size: u32,
    /// Byte offset of the entry's local file header from the start of the archive
    pub local_header_offset: u32,
}

impl CentralDirectoryHeader {
    /// Number of bytes this header occupies in the archive
    pub fn encoded_len(&self) -> usize {
        CENTRAL_DIRECTORY_HEADER_SIZE + self.name.len()
    }
}

impl Packable for CentralDirectoryHeader {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let name_length = u16::try_from(self.name.len())
            .map_err(|_| anyhow::anyhow!("Entry name too long: {} bytes", self.name.len()))?;

        let mut header_bytes = Vec::with_capacity(self.encoded_len());
        header_bytes.write_u32::<LittleEndian>(CENTRAL_DIRECTORY_HEADER_SIGNATURE)?;
        header_bytes.write_u16::<LittleEndian>(ZIP_VERSION)?; // made by
        header_bytes.write_u16::<LittleEndian>(ZIP_VERSION)?; // needed
        header_bytes.write_u16::<LittleEndian>(0)?; // flags
        header_bytes.write_u16::<LittleEndian>(COMPRESSION_STORED)?;
        header_bytes.write_u16::<LittleEndian>(0)?; // modification time
        header_bytes.write_u16::<LittleEndian>(0)?; // modification date
        header_bytes.write_u32::<LittleEndian>(self.crc32)?;
        header_bytes.write_u32::<LittleEndian>(self.size)?;
        header_bytes.write_u32::<LittleEndian>(self.size)?;
        header_bytes.write_u16::<LittleEndian>(name_length)?;
        header_bytes.write_u16::<LittleEndian>(0)?; // extra field length
        header_bytes.write_u16::<LittleEndian>(0)?; // comment length
        header_bytes.write_u16::<LittleEndian>(0)?; // disk number start
        header_bytes.write_u16::<LittleEndian>(0)?; // internal attributes
        header_bytes.write_u32::<LittleEndian>(0)?; // external attributes
        header_bytes.write_u32::<LittleEndian>(self.local_header_offset)?;
        header_bytes.write_all(self.name.as_bytes())?;

        Ok(Bytes::from(header_bytes))
    }
}

impl Unpackable for CentralDirectoryHeader {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let signature = reader
            .read_u32::<LittleEndian>()
            .context("Truncated central directory header")?;
        if signature != CENTRAL_DIRECTORY_HEADER_SIGNATURE {
            return Err(anyhow::anyhow!(
                "Invalid central directory header signature: {signature:#010x}"
            ));
        }

        let _version_made_by = reader.read_u16::<LittleEndian>()?;
        let _version_needed = reader.read_u16::<LittleEndian>()?;
        let _flags = reader.read_u16::<LittleEndian>()?;
        let compression_method = reader.read_u16::<LittleEndian>()?;
        let _modification_time = reader.read_u16::<LittleEndian>()?;
        let _modification_date = reader.read_u16::<LittleEndian>()?;
        let crc32 = reader.read_u32::<LittleEndian>()?;
        let compressed_size = reader.read_u32::<LittleEndian>()?;
        let uncompressed_size = reader.read_u32::<LittleEndian>()?;
        let name_length = reader.read_u16::<LittleEndian>()? as usize;
        let extra_length = reader.read_u16::<LittleEndian>()? as usize;
        let comment_length = reader.read_u16::<LittleEndian>()? as usize;
        let _disk_number_start = reader.read_u16::<LittleEndian>()?;
        let _internal_attributes = reader.read_u16::<LittleEndian>()?;
        let _external_attributes = reader.read_u32::<LittleEndian>()?;
        let local_header_offset = reader.read_u32::<LittleEndian>()?;

        if compression_method != COMPRESSION_STORED {
            return Err(anyhow::anyhow!(
                "Unsupported compression method: {compression_method}"
            ));
        }
        if compressed_size != uncompressed_size {
            return Err(anyhow::anyhow!(
                "Stored entry sizes differ: {compressed_size} != {uncompressed_size}"
            ));
        }

        let mut name_bytes = vec![0; name_length];
        reader
            .read_exact(&mut name_bytes)
            .context("Truncated central directory header name")?;
        let name = String::from_utf8(name_bytes)
            .map_err(|_| anyhow::anyhow!("Invalid UTF-8 in central directory header name"))?;

        // extra field and comment are skipped
        let mut trailer = vec![0; extra_length + comment_length];
        reader
            .read_exact(&mut trailer)
            .context("Truncated central directory header trailer")?;

        Ok(CentralDirectoryHeader {
            name,
            crc32,
            size: uncompressed_size,
            local_header_offset,
        })
    }
}
