//! Analyze command implementation

use crate::cli::{AnalyzeArgs, OutputFormat};
use crate::error::{Result, deps};
use crate::graph::{Analysis, analyze};
use crate::ui;

use super::ProjectOptions;
use super::helpers::open_index;

/// Run analyze command
///
/// With `--strict`, a cyclic result is reported and then returned as a
/// circular dependency error.
pub fn run(options: &ProjectOptions, args: AnalyzeArgs) -> Result<()> {
    let index = open_index(options)?;
    let graph = index.graph();
    let analysis = analyze(&graph);

    {
        let mut out = std::io::stdout().lock();
        match options.format {
            OutputFormat::Json => ui::write_json(&mut out, &analysis)?,
            OutputFormat::Text => ui::write_analysis(&mut out, &analysis)?,
        }
    }

    match analysis {
        Analysis::Cyclic(cycle) if args.strict => Err(deps::circular(cycle.join(" -> "))),
        _ => Ok(()),
    }
}
