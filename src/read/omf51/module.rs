//! Per-module accumulation: code bytes, wildcard masking, public symbols.

use std::io::Read;

use tracing::{debug, warn};

use crate::error::{OmfError, Result};
use crate::pat::Pattern;

use super::consts::*;
use super::dump;
use super::fields::Fields;
use super::record::{Record, RecordReader};

/// A code-class public symbol retained for the pattern line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicSymbol {
    pub offset: u16,
    pub name: String,
}

/// Mutable state for the module currently being read.
///
/// `masked` runs parallel to `code`: a true slot marks a byte that a fixup
/// declared link-time relocatable, rendered as a wildcard at emission.
/// `fixup_base` is the code length before the most recent content append;
/// fixup records give reference locations relative to the start of that
/// block.
#[derive(Debug, Default)]
pub struct ModuleAccumulator {
    code: Vec<u8>,
    masked: Vec<bool>,
    fixup_base: usize,
    publics: Vec<PublicSymbol>,
}

impl ModuleAccumulator {
    pub fn new() -> Self {
        ModuleAccumulator::default()
    }

    pub fn code_len(&self) -> usize {
        self.code.len()
    }

    pub fn publics(&self) -> &[PublicSymbol] {
        &self.publics
    }

    /// PUBLIC DEF: keep code-class entries, parse every entry either way.
    ///
    /// The low three bits of the class byte select the address space; zero
    /// is code. Data, bit and register-bank publics are useless for
    /// pattern matching and are dropped after decoding.
    pub fn add_publics(&mut self, record: &Record) -> Result<()> {
        let mut f = Fields::new(record);
        while !f.is_empty() {
            let id = f.index("public id")?;
            let class = f.byte("public class")?;
            let offset = f.word("public offset")?;
            let _reserved = f.byte("public reserved")?;
            let name = f.name("public name")?;
            debug!(id, class, offset, name = %name, "public");
            if class & 0x07 == 0 {
                self.publics.push(PublicSymbol { offset, name });
            }
        }
        Ok(())
    }

    /// CONTENT: append the record's code bytes.
    ///
    /// Code accumulates in stream order; the declared block offset does not
    /// place it.
    pub fn add_code(&mut self, record: &Record) -> Result<()> {
        let mut f = Fields::new(record);
        let block = f.index("content block id")?;
        let offset = f.word("content offset")?;
        let data = f.rest();
        debug!(block, offset, len = data.len(), "content");
        self.code.extend_from_slice(data);
        self.masked.resize(self.code.len(), false);
        Ok(())
    }

    /// FIXUP: wildcard the link-relocatable bytes of the preceding block.
    ///
    /// Reference locations are relative to `fixup_base`. Once every entry
    /// is applied the baseline moves to the current code length, so the
    /// next content block starts a fresh frame of reference.
    pub fn add_fixups(&mut self, record: &Record) -> Result<()> {
        let mut f = Fields::new(record);
        while !f.is_empty() {
            let refloc = f.word("fixup refloc")?;
            let ref_type = f.byte("fixup type")?;
            let block = f.byte("fixup operand block")?;
            let id = f.index("fixup operand id")?;
            let offset = f.word("fixup operand offset")?;
            debug!(refloc, ref_type, block, id, offset, "fixup");

            let pos = self.fixup_base + usize::from(refloc);
            match ref_type {
                // low, byte, char, high, bit: one relocated byte
                0x00..=0x03 | 0x06 => self.mask(pos, 1),
                // word: two relocated bytes
                0x04 => self.mask(pos, 2),
                // in-block: opcode byte stays, the displacement is patched
                0x05 => self.mask(pos + 1, 1),
                other => warn!(ref_type = other, "unhandled fixup type"),
            }
        }
        self.fixup_base = self.code.len();
        Ok(())
    }

    fn mask(&mut self, pos: usize, len: usize) {
        for i in pos..pos + len {
            match self.masked.get_mut(i) {
                Some(slot) => *slot = true,
                None => warn!(
                    position = i,
                    code_len = self.code.len(),
                    "fixup outside accumulated code"
                ),
            }
        }
    }

    /// Close the module: apply the output gate and sort the publics.
    ///
    /// Modules below the minimum code length or without a single retained
    /// public produce nothing.
    pub fn finish(mut self, min_code_len: usize) -> Option<Pattern> {
        if self.code.len() < min_code_len || self.publics.is_empty() {
            return None;
        }
        self.publics.sort_by_key(|public| public.offset);
        Some(Pattern::new(self.code, self.masked, self.publics))
    }
}

/// Run the in-module record loop up to and including MODULE END.
///
/// Only public, content and fixup records touch the accumulator; segment,
/// external, scope, debug and register-mask records are decoded to keep the
/// stream position honest and dumped at debug level.
pub fn read_module<R: Read>(
    reader: &mut RecordReader<R>,
    min_code_len: usize,
) -> Result<Option<Pattern>> {
    let mut module = ModuleAccumulator::new();
    loop {
        let record = reader
            .next_record()?
            .ok_or(OmfError::UnexpectedEof {
                context: "module records",
            })?;
        match record.kind {
            PUBLIC_DEF | PUBLIC_DEF_WIDE => module.add_publics(&record)?,
            CONTENT | CONTENT_WIDE => module.add_code(&record)?,
            FIXUP | FIXUP_WIDE => module.add_fixups(&record)?,
            SEGMENT_DEF | SEGMENT_DEF_WIDE => dump::segments(&record)?,
            EXTERNAL_DEF | EXTERNAL_DEF_WIDE => dump::externals(&record)?,
            SCOPE_DEF => dump::scope(&record)?,
            DEBUG_ITEMS | DEBUG_ITEMS_EXT | DEBUG_ITEMS_EXT_WIDE => dump::debug_items(&record)?,
            REGISTER_MASK => dump::register_masks(&record)?,
            MODULE_END => return Ok(module.finish(min_code_len)),
            kind => {
                warn!(kind = format_args!("{kind:#04x}"), "unhandled record in module");
                dump::hex(&record);
            }
        }
    }
}
