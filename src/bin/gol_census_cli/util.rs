use anyhow::{anyhow, Context, Result};
use chrono::Local;
use gol_census::{PatternLibrary, PatternMask};
use num_format::{CustomFormat, Grouping, ToFormattedString};

pub(super) fn format_count<T: ToFormattedString>(value: T) -> String {
    let fmt = CustomFormat::builder()
        .grouping(Grouping::Standard)
        .separator("_")
        .build()
        .expect("A bug in the number format");
    value.to_formatted_string(&fmt)
}

pub(super) fn local_time() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.3f").to_string()
}

/// Builds the standard library and registers every `NAME=FILE.rle` entry on top of it.
pub(super) fn build_library(extra: &[String]) -> Result<PatternLibrary> {
    let mut library = PatternLibrary::standard();
    for spec in extra {
        let (name, path) = spec
            .split_once('=')
            .ok_or_else(|| anyhow!("Expected NAME=FILE, got {:?}", spec))?;
        let data = std::fs::read(path).with_context(|| format!("Failed to read {}", path))?;
        let mask = PatternMask::from_rle(&data)
            .with_context(|| format!("Failed to parse pattern {:?} from {}", name, path))?;
        library
            .register(name, mask)
            .with_context(|| format!("Failed to register pattern {:?}", name))?;
    }
    Ok(library)
}
