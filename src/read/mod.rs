//! Readers for the binary input side of the converter.

pub mod omf51;
