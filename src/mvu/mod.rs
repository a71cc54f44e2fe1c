// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Root Model-View-Update kernel for a dashboard session.
//!
//! `update` is the only writer of [`DashboardModel`]; side effects (fetching,
//! opening links) are returned as [`Command`]s and come back as [`Msg`]s.

use time::OffsetDateTime;
use tracing::{debug, warn};
use url::Url;

use crate::logic::{AssetCollection, Filter, Query, SelectionSet, SortOption};
use crate::models::{
    ApprovalStatus, Asset, AssetDraft, Category, Confidentiality, Kit, KitError,
};
use crate::provider::{self, IngestReport, SourceConfig};
use crate::utils::direct_download_url;

/// Session-scoped colour scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark_mode(dark: bool) -> Self {
        if dark { Theme::Dark } else { Theme::Light }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Top-level session state.
#[derive(Debug, Default)]
pub struct DashboardModel {
    /// Where refreshes load from.
    pub source: SourceConfig,
    pub collection: AssetCollection,
    pub query: Query,
    pub selection: SelectionSet,
    /// Kits created during this session, oldest first.
    pub kits: Vec<Kit>,
    pub theme: Theme,
    /// A fetch is in flight.
    pub loading: bool,
    /// Records skipped by the most recent load.
    pub rejected: usize,
    /// Latest status message to display.
    pub status: Option<String>,
    /// Latest error message to display.
    pub error: Option<String>,
    /// Count of queued background commands.
    pub pending_commands: usize,
}

impl DashboardModel {
    pub fn new(source: SourceConfig, theme: Theme) -> Self {
        Self {
            source,
            theme,
            ..Default::default()
        }
    }

    /// Current query applied to the collection.
    pub fn view(&self) -> Vec<&Asset> {
        self.query.apply(self.collection.as_slice())
    }

    /// Number of selected ids, including ones hidden by the filters.
    pub fn selected_count(&self) -> usize {
        self.selection.count()
    }
}

/// Session messages routed through [`update`].
#[derive(Debug)]
pub enum Msg {
    SearchChanged(String),
    SetCategory(Filter<Category>),
    SetConfidentiality(Filter<Confidentiality>),
    SetStatus(Filter<ApprovalStatus>),
    SetSort(SortOption),
    /// Clear search text and categorical filters; the sort order is kept.
    ResetFilters,
    Select { id: String, selected: bool },
    SelectAll,
    ClearSelection,
    Refresh,
    AssetsLoaded(Result<IngestReport, String>),
    /// Create (`id: None`) or update an asset from a form draft.
    SaveAsset { id: Option<String>, draft: AssetDraft },
    CreateKit(String),
    OpenSelected,
    LinksOpened(Result<usize, String>),
    ToggleTheme,
    DismissError,
}

/// Side effects executed off the update path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchAssets(SourceConfig),
    OpenLinks(Vec<Url>),
}

/// Update the model and enqueue commands.
pub fn update(model: &mut DashboardModel, msg: Msg, cmds: &mut Vec<Command>) {
    match msg {
        Msg::SearchChanged(text) => model.query.search = text,
        Msg::SetCategory(filter) => model.query.category = filter,
        Msg::SetConfidentiality(filter) => model.query.confidentiality = filter,
        Msg::SetStatus(filter) => model.query.status = filter,
        Msg::SetSort(sort) => model.query.sort = sort,
        Msg::ResetFilters => {
            model.query = Query {
                sort: model.query.sort,
                ..Query::default()
            };
        }
        Msg::Select { id, selected } => model.selection.select(&id, selected),
        Msg::SelectAll => {
            let view = model.query.apply(model.collection.as_slice());
            model.selection.select_all(&view);
        }
        Msg::ClearSelection => model.selection.clear(),
        Msg::Refresh => {
            model.loading = true;
            cmds.push(Command::FetchAssets(model.source.clone()));
        }
        Msg::AssetsLoaded(result) => {
            model.loading = false;
            match result {
                Ok(report) => {
                    let count = report.assets.len();
                    model.rejected = report.rejected.len();
                    model.collection.seed(report.assets);
                    model.selection.clear();
                    let message = if model.rejected > 0 {
                        format!("Loaded {count} assets ({} records skipped).", model.rejected)
                    } else {
                        format!("Loaded {count} assets.")
                    };
                    surface_event(model, message, false);
                }
                Err(err) => surface_event(model, format!("Failed to load assets:\n\n{err}"), true),
            }
        }
        Msg::SaveAsset { id, draft } => {
            let now = OffsetDateTime::now_utc();
            let result = match id {
                None => model.collection.create(&draft, now).map(|_| "Asset created."),
                Some(id) => model
                    .collection
                    .update(&id, &draft, now)
                    .map(|_| "Asset updated."),
            };
            match result {
                Ok(message) => surface_event(model, message.to_string(), false),
                Err(err) => surface_event(model, err.to_string(), true),
            }
        }
        Msg::CreateKit(name) => create_kit(model, &name),
        Msg::OpenSelected => {
            let view = model.query.apply(model.collection.as_slice());
            let selected: Vec<&Asset> = view
                .into_iter()
                .filter(|a| model.selection.is_selected(&a.id))
                .collect();
            let urls: Vec<Url> = selected
                .iter()
                .filter_map(|a| match direct_download_url(&a.external_link) {
                    Ok(url) => Some(url),
                    Err(err) => {
                        warn!(id = %a.id, %err, "skipping unusable link");
                        None
                    }
                })
                .collect();

            if selected.is_empty() {
                surface_event(model, KitError::NoAssets.to_string(), true);
            } else if urls.is_empty() {
                surface_event(
                    model,
                    "None of the selected assets has a usable link.".to_string(),
                    true,
                );
            } else {
                surface_event(model, format!("Opening {} links...", urls.len()), false);
                cmds.push(Command::OpenLinks(urls));
            }
        }
        Msg::LinksOpened(result) => match result {
            Ok(n) => surface_event(model, format!("Opened {n} links."), false),
            Err(err) => surface_event(model, format!("Failed to open links:\n\n{err}"), true),
        },
        Msg::ToggleTheme => model.theme = model.theme.toggled(),
        Msg::DismissError => model.error = None,
    }
}

/// Tag the selected-and-visible assets with a kit tag, record the kit, and reset the selection.
fn create_kit(model: &mut DashboardModel, name: &str) {
    let view = model.query.apply(model.collection.as_slice());
    let ids = model.selection.selected_in(&view);

    let kit = Kit::new(name, ids, OffsetDateTime::now_utc()).and_then(|kit| {
        if model.kits.iter().any(|k| k.tag == kit.tag) {
            Err(KitError::DuplicateTag(kit.tag))
        } else {
            Ok(kit)
        }
    });
    let kit = match kit {
        Ok(kit) => kit,
        Err(err) => {
            surface_event(model, err.to_string(), true);
            return;
        }
    };
    model.selection.consume(&view);

    let tagged = model.collection.tag(&kit.asset_ids, &kit.tag);
    debug!(kit = %kit.name, tag = %kit.tag, tagged, "kit created");
    let message = format!(
        "Created kit \"{}\" with {} assets.",
        kit.name,
        kit.asset_ids.len()
    );
    model.kits.push(kit);
    surface_event(model, message, false);
}

/// Execute a command synchronously and return the resulting message.
pub fn run_command(cmd: Command) -> Msg {
    match cmd {
        Command::FetchAssets(source) => {
            Msg::AssetsLoaded(provider::load(&source).map_err(|e| format!("{e:#}")))
        }
        Command::OpenLinks(urls) => {
            let mut failures = Vec::new();
            for url in &urls {
                if let Err(err) = open::that(url.as_str()) {
                    failures.push(format!("{url}: {err}"));
                }
            }
            if failures.is_empty() {
                Msg::LinksOpened(Ok(urls.len()))
            } else {
                Msg::LinksOpened(Err(failures.join("\n")))
            }
        }
    }
}

/// Update status/error fields consistently for user feedback.
fn surface_event(model: &mut DashboardModel, message: String, is_error: bool) {
    if is_error {
        model.error = Some(message.clone());
    }
    model.status = Some(message);
}
