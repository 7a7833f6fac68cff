mod cli;
mod render;

use std::{fs::File, io::BufReader, sync::Arc};

use anyhow::Context;
use clap::Parser;
use envdeck_core::{Catalog, ListPipeline, ListView, RevealSet, ViewKind, presets};
use envdeck_model::RecordId;
use envdeck_observe::{LoggerConfig, logger_init};
use tracing::{debug, info};

use crate::{
    cli::Args,
    render::{JsonPage, Row},
};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let cfg = LoggerConfig {
        format: args.log_format,
        level: args.log_level.clone(),
        ..Default::default()
    };
    logger_init(&cfg)?;

    let file = File::open(&args.snapshot)
        .with_context(|| format!("opening snapshot {}", args.snapshot.display()))?;
    let catalog = Catalog::from_json(BufReader::new(file))?;
    info!(snapshot = %args.snapshot.display(), view = %args.view, "catalog loaded");

    match args.view {
        ViewKind::Applications => browse(presets::applications(), catalog.applications.snapshot(), &args),
        ViewKind::Variables => browse(presets::variables(), catalog.variables.snapshot(), &args),
        ViewKind::AccessKeys => browse(presets::access_keys(), catalog.access_keys.snapshot(), &args),
        ViewKind::Groups => browse(presets::groups(), catalog.groups.snapshot(), &args),
        ViewKind::Roles => browse(presets::roles(), catalog.roles.snapshot(), &args),
        ViewKind::Permissions => browse(presets::permissions(), catalog.permissions.snapshot(), &args),
        ViewKind::History => browse(presets::history(), catalog.history.snapshot(), &args),
    }
}

fn browse<T: Row + Clone>(pipeline: ListPipeline<T>, items: Vec<T>, args: &Args) -> anyhow::Result<()> {
    let pipeline = match args.per_page {
        Some(n) => pipeline.with_items_per_page(n),
        None => pipeline,
    };
    let mut view = ListView::new(Arc::new(pipeline), items);

    view.set_search(args.search.as_str());
    for (key, value) in &args.filters {
        view.set_filter(key.as_str(), Some(value.clone()));
    }
    if let Some(field) = &args.sort {
        // Sorting by the active field flips it, so at most two clicks reach any direction.
        let mut direction = view.sort_by(field)?;
        let wanted = args
            .direction
            .or_else(|| view.pipeline().default_direction(field))
            .unwrap_or(direction);
        if direction != wanted {
            direction = view.sort_by(field)?;
        }
        debug!(field = %field, %direction, "sort applied");
    }
    view.go_to(args.page);

    let page = view.page();
    let labels = view.labels();

    let mut reveal = RevealSet::new();
    for id in &args.reveal {
        reveal.reveal(&RecordId::from(id.as_str()));
    }

    if args.json {
        let out = JsonPage {
            columns: T::columns(),
            labels,
            page: page.map(|r| r.cells(&reveal)),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", render::table(&page, &reveal));
    println!();
    println!("{page}");
    if !labels.is_empty() {
        println!("pages: {}", render::labels_line(&labels, page.page));
    }
    Ok(())
}
