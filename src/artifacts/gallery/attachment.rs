//! Download file naming
//!
//! Builds the `Content-Disposition` header values offered to clients. Names
//! are percent-encoded with the same character set as JavaScript's
//! `encodeURIComponent`, so they are always safe inside a quoted header
//! parameter.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;
use std::sync::LazyLock;

/// Characters stripped from a gallery title before it names an archive
static DISALLOWED_TITLE_CHARACTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\- ]").expect("title pattern is valid"));

/// Archive name used when nothing of the title survives sanitizing
pub const DEFAULT_ARCHIVE_NAME: &str = "gallery";

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Ask the client to save the body
    Attachment,
    /// Let the client display the body
    Inline,
}

impl Disposition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Disposition::Attachment => "attachment",
            Disposition::Inline => "inline",
        }
    }
}

/// Reduce a gallery title to `[A-Za-z0-9_- ]`, trimmed, defaulting to `gallery`
pub fn sanitize_title(title: &str) -> String {
    let sanitized = DISALLOWED_TITLE_CHARACTERS.replace_all(title, "");
    let sanitized = sanitized.trim();

    if sanitized.is_empty() {
        DEFAULT_ARCHIVE_NAME.to_string()
    } else {
        sanitized.to_string()
    }
}

/// File name of the bulk-download archive for a gallery title
pub fn archive_file_name(title: &str) -> String {
    format!("{}.zip", sanitize_title(title))
}

/// `Content-Disposition` value for an archive file name
pub fn archive_content_disposition(file_name: &str) -> String {
    format!(
        "attachment; filename=\"{}\"",
        utf8_percent_encode(file_name, URI_COMPONENT)
    )
}

/// `Content-Disposition` value for a single image download
///
/// Spaces are written as `+`, which is how browsers have historically been
/// served these names.
pub fn image_content_disposition(disposition: Disposition, file_name: &str) -> String {
    let encoded = utf8_percent_encode(file_name, URI_COMPONENT)
        .to_string()
        .replace("%20", "+");

    format!("{}; filename=\"{encoded}\"", disposition.as_str())
}
