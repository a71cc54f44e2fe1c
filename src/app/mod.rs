// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Command-line front end: seed a session, apply a query, and print the view.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ColumnConstraint, ContentArrangement, Table, Width};
use serde_json::json;
use tracing::warn;

use crate::config::{self, AppConfig};
use crate::logic::{Query, QueryParams};
use crate::models::{Asset, FixedValue};
use crate::mvu::{DashboardModel, Msg, Theme};
use crate::provider::{RestConfig, SourceConfig};
use crate::utils::{direct_download_url, format_bytes, format_date};
use crate::worker::Dashboard;

/// Browse, filter, and bundle digital assets from a CMS or a local fixture.
#[derive(Debug, Parser)]
#[command(name = "damdesk", version, about)]
pub struct Args {
    /// Config file (defaults to the platform config directory).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Load assets from a JSON array file.
    #[arg(long, value_name = "PATH", conflicts_with = "endpoint")]
    pub fixture: Option<PathBuf>,

    /// CMS site root to fetch assets from.
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Bearer token for the CMS.
    #[arg(long, env = "DAMDESK_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Use the public asset listing (never sends the token).
    #[arg(long)]
    pub public: bool,

    /// Read plain CMS posts instead of the asset plugin endpoint.
    #[arg(long)]
    pub posts_api: bool,

    /// Free-text search over name, description, and tags.
    #[arg(long, short)]
    pub search: Option<String>,

    /// Category filter (`all`, Brand, Photo, Video, Document, Graphics).
    #[arg(long)]
    pub category: Option<String>,

    /// Confidentiality filter (`all`, public, internal, confidential).
    #[arg(long)]
    pub confidentiality: Option<String>,

    /// Approval status filter (`all`, pending, approved, rejected).
    #[arg(long)]
    pub status: Option<String>,

    /// Sort field (name, dateAdded, downloadCount, fileSize).
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort direction (asc, desc).
    #[arg(long)]
    pub direction: Option<String>,

    /// Select an asset by id; repeatable.
    #[arg(long = "select", value_name = "ID")]
    pub select: Vec<String>,

    /// Toggle selection of every asset in the view.
    #[arg(long)]
    pub select_all: bool,

    /// Create a kit from the selected assets in the view.
    #[arg(long, value_name = "NAME")]
    pub kit: Option<String>,

    /// Print direct-download links for the selected assets.
    #[arg(long)]
    pub links: bool,

    /// Open the selected assets in the default handler.
    #[arg(long)]
    pub open: bool,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Parse arguments and run one session.
pub fn run() -> Result<()> {
    run_with(Args::parse(), &mut io::stdout().lock())
}

/// Run a session with explicit arguments and output sink.
pub fn run_with(args: Args, out: &mut impl Write) -> Result<()> {
    let config = match args.config.clone().or_else(config::default_path) {
        Some(path) => {
            let loaded = config::load(&path);
            if let Some(reason) = &loaded.reset_reason {
                warn!("{reason}; using defaults");
            }
            loaded.config
        }
        None => AppConfig::default(),
    };

    let query = Query::from_params(&QueryParams {
        search: args.search.as_deref(),
        category: args.category.as_deref(),
        confidentiality: args.confidentiality.as_deref(),
        status: args.status.as_deref(),
        sort_field: args.sort.as_deref(),
        sort_direction: args.direction.as_deref(),
    })
    .context("Invalid query")?;

    let source = source_from(&args, &config);
    let model = DashboardModel::new(source, Theme::from_dark_mode(config.dark_mode));
    let mut dash = Dashboard::new(model);

    dash.dispatch(Msg::Refresh);
    dash.run_until_idle();
    if let Some(err) = &dash.model().error {
        bail!("{err}");
    }

    dash.dispatch(Msg::SearchChanged(query.search));
    dash.dispatch(Msg::SetCategory(query.category));
    dash.dispatch(Msg::SetConfidentiality(query.confidentiality));
    dash.dispatch(Msg::SetStatus(query.status));
    dash.dispatch(Msg::SetSort(query.sort));

    for id in &args.select {
        dash.dispatch(Msg::Select {
            id: id.clone(),
            selected: true,
        });
    }
    if args.select_all {
        dash.dispatch(Msg::SelectAll);
    }

    // Link actions leave the selection in place, so they run before a kit consumes it.
    if args.links {
        write_links(dash.model(), out)?;
    }
    if args.open {
        dash.dispatch(Msg::OpenSelected);
        dash.run_until_idle();
        report_error(&mut dash)?;
    }
    if let Some(name) = &args.kit {
        dash.dispatch(Msg::CreateKit(name.clone()));
        report_error(&mut dash)?;
    }

    if args.json {
        write_json(dash.model(), out)
    } else {
        write_table(dash.model(), out)
    }
}

/// CLI flags override the configured source.
fn source_from(args: &Args, config: &AppConfig) -> SourceConfig {
    if let Some(path) = &args.fixture {
        return SourceConfig::File(path.clone());
    }

    let rest = match &args.endpoint {
        Some(url) => Some(config.rest_config().map_or_else(
            || RestConfig {
                per_page: config.per_page,
                timeout: Duration::from_secs(config.timeout_secs.max(1)),
                ..RestConfig::new(url.clone())
            },
            |cfg| RestConfig {
                base_url: url.clone(),
                ..cfg
            },
        )),
        None => config.rest_config(),
    };

    match rest {
        Some(mut rest) => {
            if args.token.is_some() {
                rest.auth_token = args.token.clone();
            }
            rest.public_portal |= args.public;
            rest.posts_api |= args.posts_api;
            SourceConfig::Rest(rest)
        }
        None => config.source_config(),
    }
}

fn report_error(dash: &mut Dashboard) -> Result<()> {
    if let Some(err) = dash.model().error.clone() {
        dash.dispatch(Msg::DismissError);
        bail!("{err}");
    }
    Ok(())
}

fn write_links(model: &DashboardModel, out: &mut impl Write) -> Result<()> {
    for asset in model.view() {
        if !model.selection.is_selected(&asset.id) {
            continue;
        }
        match direct_download_url(&asset.external_link) {
            Ok(url) => writeln!(out, "{url}")?,
            Err(err) => warn!(id = %asset.id, "{err:#}"),
        }
    }
    Ok(())
}

fn write_json(model: &DashboardModel, out: &mut impl Write) -> Result<()> {
    let view = model.view();
    let doc = json!({
        "assets": view,
        "selected": model.selection.selected_in(&view),
        "selectedCount": model.selected_count(),
        "kits": model.kits,
        "sort": {
            "field": model.query.sort.field.as_str(),
            "direction": model.query.sort.direction.as_str(),
        },
    });
    serde_json::to_writer_pretty(&mut *out, &doc).context("Failed to write JSON")?;
    writeln!(out)?;
    Ok(())
}

fn write_table(model: &DashboardModel, out: &mut impl Write) -> Result<()> {
    let view = model.view();
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "", "ID", "Name", "Category", "Access", "Status", "Added", "Size", "Downloads",
        ]);
    for asset in &view {
        table.add_row(table_row(asset, model.selection.is_selected(&asset.id)));
    }
    table.set_constraints(vec![
        ColumnConstraint::ContentWidth,
        ColumnConstraint::UpperBoundary(Width::Fixed(38)),
        ColumnConstraint::UpperBoundary(Width::Fixed(36)),
    ]);
    writeln!(out, "{table}")?;

    let mut summary = format!("{} of {} assets", view.len(), model.collection.len());
    if model.selected_count() > 0 {
        summary.push_str(&format!(" \u{2022} {} selected", model.selected_count()));
    }
    if model.rejected > 0 {
        summary.push_str(&format!(" \u{2022} {} records skipped", model.rejected));
    }
    writeln!(out, "{summary}")?;
    if let Some(kit) = model.kits.last() {
        writeln!(out, "Kit \"{}\" tagged {} assets with {}", kit.name, kit.asset_ids.len(), kit.tag)?;
    }
    Ok(())
}

fn table_row(asset: &Asset, selected: bool) -> Vec<Cell> {
    vec![
        Cell::new(if selected { "*" } else { "" }),
        Cell::new(&asset.id),
        Cell::new(&asset.name),
        Cell::new(asset.category.as_str()),
        Cell::new(asset.confidentiality.as_str()),
        Cell::new(asset.approval_status.as_str()),
        Cell::new(format_date(asset.date_added)),
        Cell::new(format_bytes(asset.file_size)).set_alignment(CellAlignment::Right),
        Cell::new(asset.download_count).set_alignment(CellAlignment::Right),
    ]
}
