//! Show command implementation

use crate::cli::{OutputFormat, ShowArgs};
use crate::error::Result;
use crate::graph::usage;
use crate::ui;

use super::ProjectOptions;
use super::helpers::open_index;

pub fn run(options: &ProjectOptions, args: ShowArgs) -> Result<()> {
    let index = open_index(options)?;
    let report = usage(&index.graph(), &args.name)?;

    let mut out = std::io::stdout().lock();
    match options.format {
        OutputFormat::Json => ui::write_json(&mut out, &report),
        OutputFormat::Text => {
            ui::write_usage(&mut out, &report)?;
            Ok(())
        }
    }
}
