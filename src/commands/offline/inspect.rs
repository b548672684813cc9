use crate::artifacts::archive::listing::ArchiveListing;
use anyhow::Context;
use std::io::Write;
use std::path::Path;

/// Verify an archive and print its central directory
///
/// One line per entry: `<offset> <size> <crc32> <name>`, followed by the
/// central directory position.
pub async fn inspect(archive_path: &Path, writer: &mut impl Write) -> anyhow::Result<()> {
    let archive = tokio::fs::read(archive_path)
        .await
        .with_context(|| format!("Unable to read archive {}", archive_path.display()))?;
    let listing = ArchiveListing::parse(&archive)
        .with_context(|| format!("Invalid archive {}", archive_path.display()))?;

    for entry in listing.entries() {
        writeln!(
            writer,
            "{:>10} {:>10} {:08x} {}",
            entry.local_header_offset, entry.size, entry.crc32, entry.name
        )?;
    }
    writeln!(
        writer,
        "{} entries, central directory at {} ({} bytes)",
        listing.entries().len(),
        listing.central_directory_offset(),
        listing.central_directory_size()
    )?;

    Ok(())
}
