//! Archive assembler
//!
//! Turns an ordered sequence of entries into one store-only ZIP archive.
//!
//! The assembler owns a running offset: the number of bytes emitted so far.
//! Each appended entry records the offset at which its local file header
//! starts, and the central directory written by [`ArchiveAssembler::finalize`]
//! references those offsets. Appends therefore have to happen strictly in
//! order, on one assembler per archive.

use crate::artifacts::archive::archive_entry::ArchiveEntry;
use crate::artifacts::archive::central_directory_header::CentralDirectoryHeader;
use crate::artifacts::archive::checksum::crc32;
use crate::artifacts::archive::end_of_central_directory::EndOfCentralDirectory;
use crate::artifacts::archive::local_file_header::LocalFileHeader;
use crate::artifacts::archive::record::Packable;
use bytes::Bytes;

#[derive(Debug, Default)]
pub struct ArchiveAssembler {
    /// Local file headers and raw content, in append order
    body: Vec<u8>,
    /// Pending central directory headers, in append order
    central_directory: Vec<CentralDirectoryHeader>,
    /// Byte position at which the next record will start
    offset: u64,
}

impl ArchiveAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an assembler that pre-allocates room for `capacity` body bytes
    pub fn with_capacity(capacity: usize) -> Self {
        ArchiveAssembler {
            body: Vec::with_capacity(capacity),
            ..Default::default()
        }
    }

    /// Number of entries appended so far
    pub fn len(&self) -> usize {
        self.central_directory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.central_directory.is_empty()
    }

    /// Append one entry at the current running offset
    ///
    /// Appending the same entry twice produces two archive entries.
    ///
    /// # Errors
    ///
    /// Fails if the entry would not fit the format's 32-bit size and offset
    /// fields or its name does not fit the 16-bit name length field. The
    /// assembler is left unchanged in that case.
    pub fn append(&mut self, entry: &ArchiveEntry) -> anyhow::Result<()> {
        if self.central_directory.len() >= u16::MAX as usize {
            return Err(anyhow::anyhow!(
                "Archive cannot hold more than {} entries",
                u16::MAX
            ));
        }

        let size = u32::try_from(entry.content().len()).map_err(|_| {
            anyhow::anyhow!(
                "Entry {} is too large: {} bytes",
                entry.name(),
                entry.content().len()
            )
        })?;
        let local_header_offset = u32::try_from(self.offset).map_err(|_| {
            anyhow::anyhow!("Archive offset {} exceeds 32-bit limit", self.offset)
        })?;
        let crc32 = crc32(entry.content());

        let local_header = LocalFileHeader::new(entry.name().to_string(), crc32, size);
        let local_header_bytes = local_header.serialize()?;

        self.body.extend_from_slice(&local_header_bytes);
        self.body.extend_from_slice(entry.content());
        self.offset += (local_header_bytes.len() + entry.content().len()) as u64;

        self.central_directory.push(CentralDirectoryHeader::new(
            entry.name().to_string(),
            crc32,
            size,
            local_header_offset,
        ));

        Ok(())
    }

    /// Write the central directory and trailer, returning the complete archive
    ///
    /// Consumes the assembler, so no entry can be appended afterwards.
    pub fn finalize(self) -> anyhow::Result<Bytes> {
        let ArchiveAssembler {
            mut body,
            central_directory,
            offset,
        } = self;
        debug_assert_eq!(offset, body.len() as u64);

        let central_directory_offset = u32::try_from(offset).map_err(|_| {
            anyhow::anyhow!("Central directory offset {offset} exceeds 32-bit limit")
        })?;
        let entry_count = u16::try_from(central_directory.len()).map_err(|_| {
            anyhow::anyhow!("Too many entries: {}", central_directory.len())
        })?;

        for header in &central_directory {
            body.extend_from_slice(&header.serialize()?);
        }

        let central_directory_size = u32::try_from(body.len() as u64 - offset)
            .map_err(|_| anyhow::anyhow!("Central directory exceeds 32-bit limit"))?;

        let trailer = EndOfCentralDirectory::new(
            entry_count,
            central_directory_size,
            central_directory_offset,
        );
        body.extend_from_slice(&trailer.serialize()?);

        Ok(Bytes::from(body))
    }
}
