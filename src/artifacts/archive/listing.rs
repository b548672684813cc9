//! Archive listing and verification
//!
//! Reads back a store-only archive produced by the assembler: locates the end
//! of central directory record, walks the central directory, and checks that
//! every declared local header offset, name, size and CRC-32 agrees with the
//! bytes actually present.

use crate::artifacts::archive::central_directory_header::CentralDirectoryHeader;
use crate::artifacts::archive::checksum::crc32;
use crate::artifacts::archive::end_of_central_directory::EndOfCentralDirectory;
use crate::artifacts::archive::local_file_header::LocalFileHeader;
use crate::artifacts::archive::record::Unpackable;
use crate::artifacts::archive::END_OF_CENTRAL_DIRECTORY_SIZE;
use std::io::Cursor;

/// One verified entry of an archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    pub name: String,
    pub crc32: u32,
    pub size: u32,
    /// Offset of the entry's local file header
    pub local_header_offset: u32,
    /// Offset of the entry's first content byte
    pub content_offset: usize,
}

impl ListedEntry {
    /// Slice this entry's stored content out of the archive it was listed from
    pub fn content<'a>(&self, archive: &'a [u8]) -> &'a [u8] {
        &archive[self.content_offset..self.content_offset + self.size as usize]
    }
}

#[derive(Debug, Clone)]
pub struct ArchiveListing {
    entries: Vec<ListedEntry>,
    trailer: EndOfCentralDirectory,
}

impl ArchiveListing {
    /// Parse and verify a complete archive held in memory
    ///
    /// Archive comments are not supported; the trailer must be the final
    /// 22 bytes.
    pub fn parse(archive: &[u8]) -> anyhow::Result<Self> {
        if archive.len() < END_OF_CENTRAL_DIRECTORY_SIZE {
            return Err(anyhow::anyhow!(
                "Archive too small: {} bytes",
                archive.len()
            ));
        }

        let trailer_offset = archive.len() - END_OF_CENTRAL_DIRECTORY_SIZE;
        let trailer = EndOfCentralDirectory::deserialize(Cursor::new(&archive[trailer_offset..]))?;

        let directory_start = trailer.central_directory_offset as usize;
        let directory_end = directory_start + trailer.central_directory_size as usize;
        if directory_end != trailer_offset {
            return Err(anyhow::anyhow!(
                "Central directory [{directory_start}, {directory_end}) does not end at trailer offset {trailer_offset}"
            ));
        }

        let mut directory = Cursor::new(&archive[directory_start..directory_end]);
        let mut entries = Vec::with_capacity(trailer.entry_count as usize);

        for _ in 0..trailer.entry_count {
            let header = CentralDirectoryHeader::deserialize(&mut directory)?;
            entries.push(Self::verify_entry(archive, directory_start, header)?);
        }

        if directory.position() as usize != directory_end - directory_start {
            return Err(anyhow::anyhow!(
                "Central directory holds more than {} entries",
                trailer.entry_count
            ));
        }

        Ok(ArchiveListing { entries, trailer })
    }

    fn verify_entry(
        archive: &[u8],
        directory_start: usize,
        header: CentralDirectoryHeader,
    ) -> anyhow::Result<ListedEntry> {
        let local_header_offset = header.local_header_offset as usize;
        if local_header_offset >= directory_start {
            return Err(anyhow::anyhow!(
                "Entry {} points past the file data at offset {local_header_offset}",
                header.name
            ));
        }

        let local_header = LocalFileHeader::deserialize(Cursor::new(
            &archive[local_header_offset..directory_start],
        ))
        .map_err(|e| {
            anyhow::anyhow!(
                "Entry {} has no local file header at offset {local_header_offset}: {e}",
                header.name
            )
        })?;

        if local_header.name != header.name
            || local_header.crc32 != header.crc32
            || local_header.size != header.size
        {
            return Err(anyhow::anyhow!(
                "Local file header at offset {local_header_offset} disagrees with central directory entry {}",
                header.name
            ));
        }

        let content_offset = local_header_offset + local_header.encoded_len();
        let content_end = content_offset + header.size as usize;
        if content_end > directory_start {
            return Err(anyhow::anyhow!(
                "Entry {} content overlaps the central directory",
                header.name
            ));
        }

        let actual_crc32 = crc32(&archive[content_offset..content_end]);
        if actual_crc32 != header.crc32 {
            return Err(anyhow::anyhow!(
                "CRC-32 mismatch for {}: expected {:08x}, found {actual_crc32:08x}",
                header.name,
                header.crc32
            ));
        }

        Ok(ListedEntry {
            name: header.name,
            crc32: header.crc32,
            size: header.size,
            local_header_offset: header.local_header_offset,
            content_offset,
        })
    }

    pub fn entries(&self) -> &[ListedEntry] {
        &self.entries
    }

    pub fn central_directory_offset(&self) -> u32 {
        self.trailer.central_directory_offset
    }

    pub fn central_directory_size(&self) -> u32 {
        self.trailer.central_directory_size
    }
}
