use std::path::PathBuf;

use clap::Parser;
use envdeck_core::ViewKind;
use envdeck_model::SortDirection;
use envdeck_observe::{LoggerFormat, LoggerLevel};

/// Print one page of an envdeck list view from a catalog snapshot.
#[derive(Debug, Parser)]
#[command(name = "catalog-browser", version)]
pub struct Args {
    /// JSON catalog snapshot as delivered by the backend.
    #[arg(long, default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/catalog.json"))]
    pub snapshot: PathBuf,

    /// applications | variables | access-keys | groups | roles | permissions | history
    #[arg(long, default_value = "applications")]
    pub view: ViewKind,

    #[arg(long, default_value = "")]
    pub search: String,

    /// Filter as `key=value`; repeatable.
    #[arg(long = "filter", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    /// Sort field (camelCase record field name).
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort direction; defaults to the field's own default.
    #[arg(long, requires = "sort")]
    pub direction: Option<SortDirection>,

    #[arg(long, default_value_t = 1)]
    pub page: usize,

    #[arg(long)]
    pub per_page: Option<usize>,

    /// Record id whose secret is shown unmasked; repeatable.
    #[arg(long = "reveal")]
    pub reveal: Vec<String>,

    /// Print the page as JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    #[arg(long, default_value = "text")]
    pub log_format: LoggerFormat,

    #[arg(long, default_value = "warn")]
    pub log_level: LoggerLevel,
}

fn parse_filter(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("filter key cannot be empty in '{s}'"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}
