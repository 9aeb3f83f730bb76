//! Display-only record decoding.
//!
//! None of these records influence the emitted patterns. They are still
//! walked field by field, so a malformed body aborts the run instead of
//! desynchronizing the stream, and each entry is logged at debug level.

use std::fmt::Write as _;

use tracing::{debug, info};

use crate::error::Result;

use super::fields::Fields;
use super::record::Record;

/// LIBRARY HEADER: module count plus the block/byte position of the
/// trailing directory records.
pub(super) fn lib_header(record: &Record) -> Result<()> {
    let mut f = Fields::new(record);
    let modules = f.word("library module count")?;
    let blocks = f.word("library block count")?;
    let bytes = f.byte("library byte count")?;
    let offset = u32::from(blocks) * 0x80 + u32::from(bytes);
    info!(modules, blocks, bytes, offset, "library header");
    Ok(())
}

/// SEGMENT DEF: one entry per segment in the module.
pub(super) fn segments(record: &Record) -> Result<()> {
    let mut f = Fields::new(record);
    while !f.is_empty() {
        let id = f.index("segment id")?;
        let info = f.byte("segment info")?;
        let seg_type = f.byte("segment type")?;
        let _reserved = f.byte("segment reserved")?;
        let base = f.word("segment base")?;
        let size = f.word("segment size")?;
        let name = f.name("segment name")?;
        debug!(id, info, seg_type, base, size, name = %name, "segment");
    }
    Ok(())
}

/// EXTERNAL DEF: imported symbols, never part of a pattern.
pub(super) fn externals(record: &Record) -> Result<()> {
    let mut f = Fields::new(record);
    while !f.is_empty() {
        let block = f.byte("external block")?;
        let id = f.index("external id")?;
        let class = f.byte("external class")?;
        let _reserved = f.byte("external reserved")?;
        let name = f.name("external name")?;
        debug!(block, id, class, name = %name, "external");
    }
    Ok(())
}

/// SCOPE DEF: block scope marker with a type byte and a name.
pub(super) fn scope(record: &Record) -> Result<()> {
    let mut f = Fields::new(record);
    let info = f.byte("scope info")?;
    let name = f.name("scope name")?;
    debug!(info, name = %name, "scope");
    Ok(())
}

/// DEBUG ITEMS: a leading storage byte, then symbol entries.
pub(super) fn debug_items(record: &Record) -> Result<()> {
    let mut f = Fields::new(record);
    let storage = f.byte("debug storage")?;
    while !f.is_empty() {
        let id = f.index("debug id")?;
        let item_type = f.byte("debug type")?;
        let value = f.word("debug value")?;
        let _reserved = f.byte("debug reserved")?;
        let name = f.name("debug name")?;
        debug!(storage, id, item_type, value, name = %name, "debug item");
    }
    Ok(())
}

/// REGISTER MASK: Keil per-function register usage entries.
pub(super) fn register_masks(record: &Record) -> Result<()> {
    let mut f = Fields::new(record);
    while !f.is_empty() {
        let mask_type = f.byte("register mask type")?;
        let mask = f.word("register mask")?;
        let name = f.name("register mask name")?;
        debug!(mask_type, mask, name = %name, "register mask");
    }
    Ok(())
}

/// Hex dump of an unrecognized record's payload.
pub(super) fn hex(record: &Record) {
    let mut dump = String::with_capacity(record.payload().len() * 2);
    for byte in record.payload() {
        let _ = write!(dump, "{byte:02X}");
    }
    debug!(kind = format_args!("{:#04x}", record.kind), payload = %dump, "record dump");
}
