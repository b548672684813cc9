//! Photo transfer operations
//!
//! This module contains the operations behind the HTTP routes and the CLI,
//! organized into two categories:
//!
//! - `client`: share-token addressed operations served to gallery clients
//!   (gallery view, single download, thumbnail, bulk archive)
//! - `offline`: archive tooling over local files (pack, inspect)
//!
//! Client operations are `impl Transfer` blocks; offline operations are free
//! functions that write their report to a caller-supplied writer.

pub mod client;
pub mod offline;
