//! Print the built-in language table.
//!
//! Usage:
//!   cargo run --bin list-languages
//!
//! Prints one line per language (code and display name) and logs how many
//! pair checks a full run performs.

use anyhow::Result;
use std::io::{self, Write};
use tracing::info;
use translator_probe::i18n::LanguageRegistry;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("list_languages=info".parse()?),
        )
        .init();

    let registry = LanguageRegistry::builtin();
    let mut out = io::stdout().lock();
    for entry in registry.iter() {
        let marker = if entry.is_base_language() { " (base)" } else { "" };
        writeln!(out, "{:<4} {}{}", entry.code, entry.name, marker)?;
    }

    info!(
        "{} languages, {} checks per run",
        registry.len(),
        registry.total_checks()
    );
    Ok(())
}
