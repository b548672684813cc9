//! End of central directory record
//!
//! The fixed trailer that locates and sizes the central directory.
//! Multi-disk archives are not supported, so both disk numbers are zero and
//! the per-disk entry count always equals the total entry count.
//!
//! ## Format
//!
//! ```text
//! signature                      4  0x06054b50
//! number of this disk            2  0
//! disk with central directory    2  0
//! entries on this disk           2
//! total entries                  2
//! central directory size         4
//! central directory offset       4
//! comment length                 2  0
//! ```

use crate::artifacts::archive::record::{Packable, Unpackable};
use crate::artifacts::archive::{END_OF_CENTRAL_DIRECTORY_SIGNATURE, END_OF_CENTRAL_DIRECTORY_SIZE};
use anyhow::Context;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::io::BufRead;

#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct EndOfCentralDirectory {
    pub entry_count: u16,
    /// Total length in bytes of all central directory headers
    pub central_directory_size: u32,
    /// Byte offset at which the first central directory header starts
    pub central_directory_offset: u32,
}

impl Packable for EndOfCentralDirectory {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut record_bytes = Vec::with_capacity(END_OF_CENTRAL_DIRECTORY_SIZE);
        record_bytes.write_u32::<LittleEndian>(END_OF_CENTRAL_DIRECTORY_SIGNATURE)?;
        record_bytes.write_u16::<LittleEndian>(0)?; // this disk
        record_bytes.write_u16::<LittleEndian>(0)?; // disk with central directory
        record_bytes.write_u16::<LittleEndian>(self.entry_count)?;
        record_bytes.write_u16::<LittleEndian>(self.entry_count)?;
        record_bytes.write_u32::<LittleEndian>(self.central_directory_size)?;
        record_bytes.write_u32::<LittleEndian>(self.central_directory_offset)?;
        record_bytes.write_u16::<LittleEndian>(0)?; // comment length

        Ok(Bytes::from(record_bytes))
    }
}

impl Unpackable for EndOfCentralDirectory {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let signature = reader
            .read_u32::<LittleEndian>()
            .context("Truncated end of central directory record")?;
        if signature != END_OF_CENTRAL_DIRECTORY_SIGNATURE {
            return Err(anyhow::anyhow!(
                "Invalid end of central directory signature: {signature:#010x}"
            ));
        }

        let this_disk = reader.read_u16::<LittleEndian>()?;
        let central_directory_disk = reader.read_u16::<LittleEndian>()?;
        let disk_entry_count = reader.read_u16::<LittleEndian>()?;
        let entry_count = reader.read_u16::<LittleEndian>()?;
        let central_directory_size = reader.read_u32::<LittleEndian>()?;
        let central_directory_offset = reader.read_u32::<LittleEndian>()?;
        let _comment_length = reader.read_u16::<LittleEndian>()?;

        if this_disk != 0 || central_directory_disk != 0 || disk_entry_count != entry_count {
            return Err(anyhow::anyhow!("Multi-disk archives are not supported"));
        }

        Ok(EndOfCentralDirectory {
            entry_count,
            central_directory_size,
            central_directory_offset,
        })
    }
}
