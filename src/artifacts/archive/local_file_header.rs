//! Local file header
//!
//! Precedes each entry's raw bytes.
//!
//! ## Format
//!
//! ```text
//! signature            4  0x04034b50
//! version needed       2  20
//! flags                2  0
//! compression method   2  0 (stored)
//! modification time    2  0
//! modification date    2  0
//! crc-32               4
//! compressed size      4  == uncompressed size
//! uncompressed size    4
//! name length          2
//! extra field length   2  0
//! name                 variable
//! ```

use crate::artifacts::archive::record::{Packable, Unpackable};
use crate::artifacts::archive::{
    COMPRESSION_STORED, LOCAL_FILE_HEADER_SIGNATURE, LOCAL_FILE_HEADER_SIZE, ZIP_VERSION,
};
use anyhow::Context;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct LocalFileHeader {
    /// Entry name as recorded in the archive
    pub name: String,
    /// CRC-32 of the entry content
    pub crc32: u32,
    /// Content length; stored entries have equal compressed and uncompressed sizes
    pub size: u32,
}

impl LocalFileHeader {
    /// Number of bytes this header occupies in the archive
    pub fn encoded_len(&self) -> usize {
        LOCAL_FILE_HEADER_SIZE + self.name.len()
    }
}

impl Packable for LocalFileHeader {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let name_length = u16::try_from(self.name.len())
            .map_err(|_| anyhow::anyhow!("Entry name too long: {} bytes", self.name.len()))?;

        let mut header_bytes = Vec::with_capacity(self.encoded_len());
        header_bytes.write_u32::<LittleEndian>(LOCAL_FILE_HEADER_SIGNATURE)?;
        header_bytes.write_u16::<LittleEndian>(ZIP_VERSION)?;
        header_bytes.write_u16::<LittleEndian>(0)?; // flags
        header_bytes.write_u16::<LittleEndian>(COMPRESSION_STORED)?;
        header_bytes.write_u16::<LittleEndian>(0)?; // modification time
        header_bytes.write_u16::<LittleEndian>(0)?; // modification date
        header_bytes.write_u32::<LittleEndian>(self.crc32)?;
        header_bytes.write_u32::<LittleEndian>(self.size)?;
        header_bytes.write_u32::<LittleEndian>(self.size)?;
        header_bytes.write_u16::<LittleEndian>(name_length)?;
        header_bytes.write_u16::<LittleEndian>(0)?; // extra field length
        header_bytes.write_all(self.name.as_bytes())?;

        Ok(Bytes::from(header_bytes))
    }
}

impl Unpackable for LocalFileHeader {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let signature = reader
            .read_u32::<LittleEndian>()
            .context("Truncated local file header")?;
        if signature != LOCAL_FILE_HEADER_SIGNATURE {
            return Err(anyhow::anyhow!(
                "Invalid local file header signature: {signature:#010x}"
            ));
        }

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
            .context("Truncated local file header name")?;
        let name = String::from_utf8(name_bytes)
            .map_err(|_| anyhow::anyhow!("Invalid UTF-8 in local file header name"))?;

        let mut extra = vec![0; extra_length];
        reader
            .read_exact(&mut extra)
            .context("Truncated local file header extra field")?;

        Ok(LocalFileHeader {
            name,
            crc32,
            size: uncompressed_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn header() -> LocalFileHeader {
        LocalFileHeader::new("photo.jpg".to_string(), 0xCBF4_3926, 9)
    }

    #[rstest]
    fn serializes_exact_layout(header: LocalFileHeader) {
        let bytes = header.serialize().unwrap();

        let mut expected = vec![
            0x50, 0x4b, 0x03, 0x04, // signature
            0x14, 0x00, // version needed
            0x00, 0x00, // flags
            0x00, 0x00, // stored
            0x00, 0x00, 0x00, 0x00, // time and date
            0x26, 0x39, 0xF4, 0xCB, // crc-32
            0x09, 0x00, 0x00, 0x00, // compressed size
            0x09, 0x00, 0x00, 0x00, // uncompressed size
            0x09, 0x00, // name length
            0x00, 0x00, // extra length
        ];
        expected.extend_from_slice(b"photo.jpg");

        assert_eq!(bytes.to_vec(), expected);
        assert_eq!(bytes.len(), header.encoded_len());
    }

    #[rstest]
    fn parses_its_own_output(header: LocalFileHeader) {
        let bytes = header.serialize().unwrap();

        let parsed = LocalFileHeader::deserialize(std::io::Cursor::new(bytes)).unwrap();
        assert_eq!(parsed, header);
    }

    #[rstest]
    fn rejects_wrong_signature(header: LocalFileHeader) {
        let mut bytes = header.serialize().unwrap().to_vec();
        bytes[3] = 0x05;

        assert!(LocalFileHeader::deserialize(std::io::Cursor::new(bytes)).is_err());
    }

    #[test]
    fn rejects_names_longer_than_field_width() {
        let header = LocalFileHeader::new("a".repeat(u16::MAX as usize + 1), 0, 0);

        assert!(header.serialize().is_err());
    }
}
