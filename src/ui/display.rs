//! Text rendering of descriptors and graph reports

use std::io::{self, Write};
use std::path::Path;

use console::Style;

use crate::descriptor::AssetDescriptor;
use crate::graph::{Analysis, Cycle, DependencyGraph, UsageReport};
use crate::project::NameConflict;

fn relative<'p>(root: &Path, path: &'p Path) -> std::borrow::Cow<'p, str> {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
}

/// One dependency line; unmatched identifiers are marked external or
/// unresolved
fn write_dependency(
    out: &mut impl Write,
    indent: &str,
    dep: &str,
    resolved: bool,
    external: bool,
) -> io::Result<()> {
    if resolved {
        writeln!(out, "{indent}{dep}")
    } else if external {
        writeln!(out, "{indent}{dep} {}", Style::new().dim().apply_to("(external)"))
    } else {
        writeln!(out, "{indent}{dep} {}", Style::new().yellow().apply_to("(unresolved)"))
    }
}

fn write_dependency_list(
    out: &mut impl Write,
    graph: &DependencyGraph<'_>,
    dependencies: &[String],
) -> io::Result<()> {
    for dep in dependencies {
        let resolved = graph.resolve(dep).is_some();
        write_dependency(out, "      ", dep, resolved, graph.is_external(dep))?;
    }
    Ok(())
}

/// Every descriptor with its module, file and declared dependencies
pub fn write_descriptors(
    out: &mut impl Write,
    root: &Path,
    graph: &DependencyGraph<'_>,
    conflicts: &[NameConflict],
) -> io::Result<()> {
    let bold = Style::new().bold();

    if graph.is_empty() {
        writeln!(out, "No asset descriptors found.")?;
        return Ok(());
    }

    writeln!(out, "Asset descriptors ({}):", graph.len())?;
    writeln!(out)?;

    for descriptor in graph.descriptors() {
        writeln!(out, "  {}", Style::new().bold().yellow().apply_to(&descriptor.name))?;
        if let Some(fqcn) = descriptor.qualified_name() {
            writeln!(out, "    {} {fqcn}", bold.apply_to("Class:"))?;
        }
        writeln!(
            out,
            "    {} {} ({})",
            bold.apply_to("Module:"),
            descriptor.module_label(),
            descriptor.origin
        )?;
        writeln!(
            out,
            "    {} {}",
            bold.apply_to("File:"),
            relative(root, &descriptor.source_file_path)
        )?;
        if !descriptor.declared_dependencies.is_empty() {
            writeln!(out, "    {}", bold.apply_to("Depends:"))?;
            write_dependency_list(out, graph, &descriptor.declared_dependencies)?;
        }
        for issue in &descriptor.issues {
            writeln!(
                out,
                "    {} line {}: ${}: {}",
                Style::new().yellow().apply_to("warning:"),
                issue.line,
                issue.field,
                issue.message
            )?;
        }
        writeln!(out)?;
    }

    if !conflicts.is_empty() {
        writeln!(out, "{}", Style::new().yellow().bold().apply_to("Name conflicts:"))?;
        for conflict in conflicts {
            writeln!(
                out,
                "  {}: {} shadows {}",
                conflict.name,
                relative(root, &conflict.kept),
                relative(root, &conflict.shadowed)
            )?;
        }
    }
    Ok(())
}

/// Numbered registration order
pub fn write_order(out: &mut impl Write, order: &[&AssetDescriptor]) -> io::Result<()> {
    if order.is_empty() {
        writeln!(out, "Nothing to register.")?;
        return Ok(());
    }

    writeln!(out, "Registration order ({}):", order.len())?;
    let width = order.len().to_string().len();
    for (i, descriptor) in order.iter().enumerate() {
        writeln!(
            out,
            "  {:>width$}. {}",
            i + 1,
            Style::new().cyan().apply_to(&descriptor.name)
        )?;
    }
    Ok(())
}

/// Cycle chains, one per line
pub fn write_cycles(out: &mut impl Write, cycles: &[Cycle]) -> io::Result<()> {
    if cycles.is_empty() {
        writeln!(out, "{}", Style::new().green().apply_to("No dependency cycles found."))?;
        return Ok(());
    }

    writeln!(
        out,
        "{}",
        Style::new()
            .red()
            .bold()
            .apply_to(format!("Dependency cycles ({}):", cycles.len()))
    )?;
    for cycle in cycles {
        writeln!(out, "  {}", cycle.join(" -> "))?;
    }
    Ok(())
}

/// Either the full order or the blocking cycle
pub fn write_analysis(out: &mut impl Write, analysis: &Analysis<'_>) -> io::Result<()> {
    match analysis {
        Analysis::Ordered(order) => write_order(out, order),
        Analysis::Cyclic(cycle) => {
            writeln!(
                out,
                "{} {}",
                Style::new().red().bold().apply_to("Cycle detected:"),
                cycle.join(" -> ")
            )
        }
    }
}

/// Direct dependencies and dependents of one descriptor
pub fn write_usage(out: &mut impl Write, report: &UsageReport) -> io::Result<()> {
    let bold = Style::new().bold();
    let dim = Style::new().dim();

    writeln!(out, "{}", Style::new().bold().yellow().apply_to(&report.name))?;

    writeln!(out, "  {}", bold.apply_to("Depends on:"))?;
    if report.dependencies.is_empty() {
        writeln!(out, "    {}", dim.apply_to("(none)"))?;
    }
    for dep in &report.dependencies {
        let resolved = !report.unresolved.contains(dep);
        write_dependency(out, "    ", dep, resolved, report.external.contains(dep))?;
    }

    writeln!(out, "  {}", bold.apply_to("Used by:"))?;
    if report.used_by.is_empty() {
        writeln!(out, "    {}", dim.apply_to("(none)"))?;
    }
    for user in &report.used_by {
        writeln!(out, "    {user}")?;
    }
    Ok(())
}
