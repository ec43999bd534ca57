//! Summary and listing output

use console::Style;

use crate::domain::ResolvedPackage;
use crate::reconcile::Summary;

/// Lines for the end-of-pass summary
pub fn summary_lines(summary: &Summary) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {} declaration(s)",
        Style::new().bold().apply_to("Processed"),
        summary.declarations
    )];

    let counts = [
        ("added", summary.added, Style::new().green()),
        ("already present", summary.already_present, Style::new().dim()),
        (
            "no providing channels",
            summary.no_providing_channels,
            Style::new().yellow(),
        ),
        ("add failed", summary.add_failed, Style::new().red()),
        ("package not found", summary.package_not_found, Style::new().red()),
        ("invalid", summary.invalid, Style::new().red()),
        ("lookup failed", summary.lookup_failed, Style::new().red()),
    ];

    for (label, count, style) in counts {
        if count > 0 {
            lines.push(format!("  {:<22} {}", style.apply_to(label), count));
        }
    }

    lines
}

pub fn print_summary(summary: &Summary) {
    println!();
    for line in summary_lines(summary) {
        println!("{line}");
    }
}

/// Print packages as an aligned table
pub fn print_packages(channel: &str, packages: &[ResolvedPackage]) {
    println!(
        "Found {} packages in channel {}",
        packages.len(),
        Style::new().cyan().apply_to(channel)
    );
    if packages.is_empty() {
        return;
    }

    let name_width = column_width(packages.iter().map(|p| p.name.len()), "NAME");
    let version_width = column_width(packages.iter().map(|p| p.version.len()), "VERSION");
    let release_width = column_width(packages.iter().map(|p| p.release.len()), "RELEASE");
    let arch_width = column_width(packages.iter().map(|p| p.arch_label.len()), "ARCH");

    println!(
        "{}",
        Style::new().bold().apply_to(format!(
            "{:<name_width$}  {:<version_width$}  {:<release_width$}  {:<arch_width$}  ID",
            "NAME", "VERSION", "RELEASE", "ARCH"
        ))
    );
    for package in packages {
        println!(
            "{:<name_width$}  {:<version_width$}  {:<release_width$}  {:<arch_width$}  {}",
            package.name, package.version, package.release, package.arch_label, package.id
        );
    }
}

fn column_width(lengths: impl Iterator<Item = usize>, header: &str) -> usize {
    lengths.max().unwrap_or_default().max(header.len())
}
