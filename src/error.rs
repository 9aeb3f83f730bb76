//! Error types for OMF51 reading and pattern emission.

use thiserror::Error;

/// The error type for all conversion operations.
///
/// Every variant except [`OmfError::Io`] signals corrupt input. There is no
/// recovery path: the format is a strict linear stream, and a record's
/// interpretation depends on the exact cursor position left by the previous
/// one, so processing stops at the first failure.
#[derive(Debug, Error)]
pub enum OmfError {
    /// An error from the input stream or the output file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record whose bytes do not sum to zero modulo 256.
    #[error("record checksum mismatch: kind {kind:#04x}, residue {residue:#04x}")]
    Checksum { kind: u8, residue: u8 },

    /// A record length field above the configured guard, which in practice
    /// means the length bytes are garbage.
    #[error("record too long: kind {kind:#04x} declares {len} bytes (limit {limit})")]
    RecordTooLong { kind: u8, len: u16, limit: usize },

    /// A record declaring a zero-length payload. Every record carries at
    /// least its checksum byte.
    #[error("empty record: kind {kind:#04x} declares no payload")]
    EmptyRecord { kind: u8 },

    /// The stream ended in the middle of a record or of a module.
    #[error("unexpected end of stream while reading {context}")]
    UnexpectedEof { context: &'static str },

    /// A record body too short for the fields its kind requires.
    #[error("truncated {field} in record kind {kind:#04x}")]
    Truncated { kind: u8, field: &'static str },
}

/// A convenience `Result` alias using [`OmfError`].
pub type Result<T> = std::result::Result<T, OmfError>;
