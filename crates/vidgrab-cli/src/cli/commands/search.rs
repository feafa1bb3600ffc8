//! `vidgrab search <file>` – run the extractor over a saved page.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use vidgrab_core::extractor::{self, rules};
use vidgrab_core::probe;

use super::print_extraction;

fn print_rules() {
    println!("  {:<14}  {:<17}  {}", "RULE", "FAMILY", "PATTERN");
    for rule in rules() {
        println!(
            "  {:<14}  {:<17}  {}",
            rule.name,
            rule.family.label(),
            rule.pattern.as_str()
        );
    }
    println!();
}

pub fn run_search(path: &Path, verbose: bool) -> Result<()> {
    if verbose {
        print_rules();
    }
    let body = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let extraction = extractor::extract(&body);
    print_extraction(&extraction);

    if extraction.is_empty() {
        if let Some(marker) = probe::diagnose_page(&body).marker {
            println!("Page: {}", marker.describe());
        }
    }
    Ok(())
}
