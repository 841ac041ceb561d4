//! List command implementation
//!
//! Lists every extracted descriptor with its module, source file and
//! declared dependencies, plus any name conflicts.

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::descriptor::AssetDescriptor;
use crate::error::Result;
use crate::project::NameConflict;
use crate::ui;

use super::ProjectOptions;
use super::helpers::open_index;

#[derive(Serialize)]
struct ListReport<'a> {
    descriptors: &'a [AssetDescriptor],
    conflicts: &'a [NameConflict],
}

/// Run list command
pub fn run(options: &ProjectOptions) -> Result<()> {
    let index = open_index(options)?;
    let mut out = std::io::stdout().lock();

    match options.format {
        OutputFormat::Json => ui::write_json(
            &mut out,
            &ListReport {
                descriptors: index.descriptors(),
                conflicts: index.conflicts(),
            },
        ),
        OutputFormat::Text => {
            let graph = index.graph();
            ui::write_descriptors(&mut out, index.root(), &graph, index.conflicts())?;
            Ok(())
        }
    }
}
