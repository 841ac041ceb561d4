//! Cycles command implementation

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::graph::find_cycles;
use crate::ui;

use super::ProjectOptions;
use super::helpers::open_index;

/// Run cycles command
///
/// Cycles are a report, not a failure: this exits successfully either way.
pub fn run(options: &ProjectOptions) -> Result<()> {
    let index = open_index(options)?;
    let cycles = find_cycles(&index.graph());

    let mut out = std::io::stdout().lock();
    match options.format {
        OutputFormat::Json => ui::write_json(&mut out, &cycles),
        OutputFormat::Text => {
            ui::write_cycles(&mut out, &cycles)?;
            Ok(())
        }
    }
}
