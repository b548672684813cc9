//! Service components
//!
//! This module contains the collaborators behind every client operation:
//!
//! - `catalog`: Gallery and image metadata lookup by share token
//! - `storage`: Object storage holding originals and thumbnails
//! - `transfer`: The transfer service tying catalog and storage together

pub mod catalog;
pub mod storage;
pub mod transfer;
