use bytes::Bytes;
use std::io::BufRead;

/// A record that can be written to its exact on-disk byte layout.
pub trait Packable {
    fn serialize(&self) -> anyhow::Result<Bytes>;
}

/// A record that can be parsed back from its on-disk byte layout.
pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self>
    where
        Self: Sized;
}
