use anyhow::Result;
use colored::Colorize;
use saloon_core::analysis::AnalysisResult;
use saloon_core::style::{StyleCatalog, builtin_catalog};

pub fn list() -> Result<()> {
    println!("{}", "=== Saloon styles ===".bright_magenta().bold());
    print_catalog(builtin_catalog(), None);
    Ok(())
}

/// Prints one line per style, starring those `analysis` recommends.
pub fn print_catalog(catalog: &StyleCatalog, analysis: Option<&AnalysisResult>) {
    for style in catalog.iter() {
        let recommended = analysis.is_some_and(|a| a.recommends(&style.name));
        let marker = if recommended { "★".yellow().bold() } else { " ".normal() };
        println!(
            "{marker} {} {:<12} {} - {}",
            style.icon,
            style.id.cyan(),
            style.name.bold(),
            style.description.dimmed()
        );
    }
}
