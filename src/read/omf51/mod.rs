//! OMF51 library reader (supports the Keil wide-index record variant).
//!
//! A library is a flat record stream: a library header, then for each
//! module a header record, the module's body records, and a module end;
//! directory records trail the last module. [`convert_library`] drives the
//! stream once, front to back, and writes the pattern output as it goes.

mod consts;
mod dump;
mod fields;
mod module;
mod record;

pub use fields::{Fields, MAX_NAME_LEN};
pub use module::{ModuleAccumulator, PublicSymbol};
pub use record::{Record, RecordReader};

use std::io::{Read, Write};

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::Options;

use consts::*;

/// Counters reported after a conversion run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Modules seen in the library.
    pub modules: usize,
    /// Pattern lines written.
    pub patterns: usize,
}

/// Convert one OMF51 library stream into `.pat` text.
///
/// Reads records until the input is exhausted, writes one pattern line per
/// module that passes the minimum-length and has-publics gate, and closes
/// the output with the `---` sentinel line. Any framing, checksum or
/// truncation problem aborts the run; unknown record kinds are dumped and
/// skipped.
pub fn convert_library<R: Read, W: Write>(
    input: R,
    mut output: W,
    options: &Options,
) -> Result<Stats> {
    let mut reader = RecordReader::new(input, options.max_record_len());
    let mut stats = Stats::default();

    // The stream should open with a library header. A bare object file or
    // other OMF variant is still worth walking, so this only warns.
    match reader.next_record()? {
        Some(record) if record.kind == LIB_HEADER => dump::lib_header(&record)?,
        Some(record) => {
            warn!(
                kind = format_args!("{:#04x}", record.kind),
                "input does not start with an OMF51 library header"
            );
            dump::hex(&record);
        }
        None => warn!("empty input stream"),
    }

    while let Some(record) = reader.next_record()? {
        match record.kind {
            MODULE_HEADER => {
                stats.modules += 1;
                start_module(&mut reader, &record, &mut output, options, &mut stats)?;
            }
            // Directory records after the last module; nothing for us.
            LIB_MODULE_LOCATIONS | LIB_MODULE_NAMES | LIB_DICTIONARY => {}
            kind => {
                warn!(kind = format_args!("{kind:#04x}"), "unhandled record");
                dump::hex(&record);
            }
        }
    }

    output.write_all(b"---\n")?;
    output.flush()?;
    info!(
        modules = stats.modules,
        patterns = stats.patterns,
        "conversion finished"
    );
    Ok(stats)
}

fn start_module<R: Read, W: Write>(
    reader: &mut RecordReader<R>,
    header: &Record,
    output: &mut W,
    options: &Options,
    stats: &mut Stats,
) -> Result<()> {
    let mut f = Fields::new(header);
    let name = f.name("module name")?;
    debug!(module = %name, "module start");

    if let Some(pattern) = module::read_module(reader, options.min_code_len())? {
        output.write_all(pattern.render().as_bytes())?;
        output.write_all(b"\n")?;
        stats.patterns += 1;
    }
    Ok(())
}
