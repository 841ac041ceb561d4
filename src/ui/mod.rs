//! Output rendering for command results
//!
//! Text renderers write styled, human-readable reports; JSON output is the
//! pretty-printed serde form of the same report types. Both go to a
//! caller-supplied writer so commands can pass stdout and tests a buffer.

pub mod display;

use std::io::Write;

use serde::Serialize;

use crate::error::Result;

pub use display::{
    write_analysis, write_cycles, write_descriptors, write_order, write_usage,
};

/// Write `value` as pretty-printed JSON followed by a newline
pub fn write_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
