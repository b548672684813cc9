//! Archive tooling that works on local files, without a catalog or server
pub mod inspect;
pub mod pack;
