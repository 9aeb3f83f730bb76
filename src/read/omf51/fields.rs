//! Field-level decoding of record bodies.
//!
//! All multi-byte scalars are little-endian. Index fields are one byte, or
//! two in the Keil wide-index record variants; the width is a property of
//! the record as a whole, never of an individual field.

use crate::error::{OmfError, Result};

use super::record::Record;

/// Longest name retained from any record. Longer names are truncated; the
/// cursor still advances past the full declared length.
pub const MAX_NAME_LEN: usize = 40;

/// Bounds-checked cursor over a record body.
#[derive(Debug)]
pub struct Fields<'a> {
    body: &'a [u8],
    pos: usize,
    kind: u8,
    wide: bool,
}

impl<'a> Fields<'a> {
    pub fn new(record: &'a Record) -> Self {
        Fields {
            body: record.body(),
            pos: 0,
            kind: record.kind,
            wide: record.wide_index(),
        }
    }

    /// True once every body byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.body.len()
    }

    fn take(&mut self, n: usize, field: &'static str) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(n).filter(|&end| end <= self.body.len());
        match end {
            Some(end) => {
                let slice = &self.body[self.pos..end];
                self.pos = end;
                Ok(slice)
            }
            None => Err(OmfError::Truncated {
                kind: self.kind,
                field,
            }),
        }
    }

    pub fn byte(&mut self, field: &'static str) -> Result<u8> {
        Ok(self.take(1, field)?[0])
    }

    pub fn word(&mut self, field: &'static str) -> Result<u16> {
        let bytes = self.take(2, field)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// An index field: one byte, or a little-endian word in wide records.
    pub fn index(&mut self, field: &'static str) -> Result<u16> {
        if self.wide {
            self.word(field)
        } else {
            Ok(u16::from(self.byte(field)?))
        }
    }

    /// A length-prefixed name, retained up to [`MAX_NAME_LEN`] bytes.
    pub fn name(&mut self, field: &'static str) -> Result<String> {
        let len = usize::from(self.byte(field)?);
        let bytes = self.take(len, field)?;
        let keep = &bytes[..len.min(MAX_NAME_LEN)];
        Ok(String::from_utf8_lossy(keep).into_owned())
    }

    /// Everything not yet consumed, emptying the cursor.
    pub fn rest(&mut self) -> &'a [u8] {
        let slice = &self.body[self.pos..];
        self.pos = self.body.len();
        slice
    }
}
