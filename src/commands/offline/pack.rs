use crate::artifacts::archive::archive_entry::ArchiveEntry;
use crate::artifacts::archive::assembler::ArchiveAssembler;
use crate::artifacts::archive::name_registry::NameRegistry;
use anyhow::Context;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Pack local files into a store-only archive
///
/// Entries are named after each file's base name, deduplicated the same way
/// as gallery downloads, and appear in argument order.
///
/// # Arguments
///
/// * `output` - path of the archive to write
/// * `inputs` - files to pack
/// * `writer` - receives one line per entry and a summary
pub async fn pack(output: &Path, inputs: &[PathBuf], writer: &mut impl Write) -> anyhow::Result<()> {
    let mut registry = NameRegistry::new();
    let mut assembler = ArchiveAssembler::new();

    for input in inputs {
        let content = tokio::fs::read(input)
            .await
            .with_context(|| format!("Unable to read {}", input.display()))?;
        let name = registry.resolve(input.file_name().and_then(|name| name.to_str()));

        assembler
            .append(&ArchiveEntry::try_new(name.as_str(), content)?)
            .with_context(|| format!("Unable to add {}", input.display()))?;
        writeln!(writer, "  adding: {name}")?;
    }

    let entries = assembler.len();
    let archive = assembler.finalize()?;

    tokio::fs::write(output, &archive)
        .await
        .with_context(|| format!("Unable to write archive {}", output.display()))?;
    writeln!(
        writer,
        "{} entries, {} bytes written to {}",
        entries,
        archive.len(),
        output.display()
    )?;

    tracing::debug!(output = %output.display(), entries, "Archive packed");

    Ok(())
}
