// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt::Debug;

use damdesk::logic::query::sort_view;
use damdesk::logic::{Filter, Query, SelectionSet, SortDirection, SortField, SortOption};
use damdesk::models::{ApprovalStatus, Asset, Category, Confidentiality, FixedValue, Tags};
use proptest::prelude::*;
use time::{Duration, OffsetDateTime};

// Small pools so ties, case variants, and transliteration collisions are common.
const NAMES: &[&str] = &[
    "Logo", "logo", "LOGO", "Émile", "emile", "Zebra", "Ålesund", "alesund", "Q3 Deck", "deck",
];
const TAGS: &[&str] = &["brand", "Launch", "kit:launch", "kit:c++-launch", "video"];
const SEARCHES: &[&str] = &["", "logo", "LOGO", "e", "deck", "launch", "kit:", "missing"];
const FIELDS: &[SortField] = &[
    SortField::Name,
    SortField::DateAdded,
    SortField::DownloadCount,
    SortField::FileSize,
];
const DIRECTIONS: &[SortDirection] = &[SortDirection::Asc, SortDirection::Desc];
const POOL: usize = 8;

fn arb_asset() -> impl Strategy<Value = Asset> {
    (
        prop::sample::select(NAMES),
        prop::option::of(prop::sample::select(NAMES)),
        prop::sample::select(Category::all()),
        prop::sample::select(Confidentiality::all()),
        prop::sample::select(ApprovalStatus::all()),
        0i64..4,
        0u64..3,
        0u64..3,
        prop::collection::vec(prop::sample::select(TAGS), 0..3),
    )
        .prop_map(
            |(name, description, category, confidentiality, status, day, downloads, size, tags)| {
                let mut asset = Asset::new("", name, "https://example.com/file.png");
                asset.description = description.map(str::to_string);
                asset.category = category;
                asset.confidentiality = confidentiality;
                asset.approval_status = status;
                asset.date_added = OffsetDateTime::UNIX_EPOCH + Duration::days(day);
                asset.download_count = downloads;
                asset.file_size = size;
                asset.tags = Tags::new(tags.into_iter().map(str::to_string).collect());
                asset
            },
        )
}

/// Assets with ids `a0`, `a1`, ... in input order.
fn arb_assets(max: usize) -> impl Strategy<Value = Vec<Asset>> {
    prop::collection::vec(arb_asset(), 0..max).prop_map(|mut assets| {
        for (i, asset) in assets.iter_mut().enumerate() {
            asset.id = format!("a{i}");
        }
        assets
    })
}

fn arb_filter<T: FixedValue + Debug>() -> impl Strategy<Value = Filter<T>> {
    prop_oneof![
        Just(Filter::All),
        prop::sample::select(T::all()).prop_map(Filter::Only),
    ]
}

fn arb_sort() -> impl Strategy<Value = SortOption> {
    (prop::sample::select(FIELDS), prop::sample::select(DIRECTIONS))
        .prop_map(|(field, direction)| SortOption::new(field, direction))
}

fn arb_query() -> impl Strategy<Value = Query> {
    (
        prop::sample::select(SEARCHES),
        arb_filter::<Category>(),
        arb_filter::<Confidentiality>(),
        arb_filter::<ApprovalStatus>(),
        arb_sort(),
    )
        .prop_map(|(search, category, confidentiality, status, sort)| Query {
            search: search.to_string(),
            category,
            confidentiality,
            status,
            sort,
        })
}

fn position(asset: &Asset) -> usize {
    asset.id[1..].parse().unwrap()
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn passes(query: &Query, asset: &Asset) -> bool {
    let search = query.search.is_empty()
        || contains_folded(&asset.name, &query.search)
        || asset
            .description
            .as_deref()
            .is_some_and(|d| contains_folded(d, &query.search))
        || asset.tags.iter().any(|t| contains_folded(t, &query.search));
    search
        && query.category.matches(&asset.category)
        && query.confidentiality.matches(&asset.confidentiality)
        && query.status.matches(&asset.approval_status)
}

/// Ascending comparison of the sort keys alone.
fn key_order(a: &Asset, b: &Asset, field: SortField) -> Ordering {
    match field {
        SortField::Name => {
            let fold = |s: &str| deunicode::deunicode(s).to_lowercase();
            fold(&a.name)
                .cmp(&fold(&b.name))
                .then_with(|| a.name.cmp(&b.name))
        }
        SortField::DateAdded => a.date_added.cmp(&b.date_added),
        SortField::DownloadCount => a.download_count.cmp(&b.download_count),
        SortField::FileSize => a.file_size.cmp(&b.file_size),
    }
}

#[derive(Clone, Debug)]
enum SelectionOp {
    Select(usize, bool),
    /// Select all over the assets whose mask bit is set.
    SelectAll(Vec<bool>),
    Clear,
}

fn arb_ops() -> impl Strategy<Value = Vec<SelectionOp>> {
    let op = prop_oneof![
        4 => (0..POOL, any::<bool>()).prop_map(|(i, on)| SelectionOp::Select(i, on)),
        3 => prop::collection::vec(any::<bool>(), POOL).prop_map(SelectionOp::SelectAll),
        1 => Just(SelectionOp::Clear),
    ];
    prop::collection::vec(op, 0..24)
}

fn pool() -> Vec<Asset> {
    (0..POOL)
        .map(|i| Asset::new(format!("a{i}"), format!("Asset {i}"), "https://example.com/x"))
        .collect()
}

fn masked<'a>(assets: &'a [Asset], mask: &[bool]) -> Vec<&'a Asset> {
    assets
        .iter()
        .zip(mask)
        .filter(|(_, on)| **on)
        .map(|(asset, _)| asset)
        .collect()
}

/// Replay `ops` on both the real selection and a plain set of selected ids.
fn replay(assets: &[Asset], ops: &[SelectionOp]) -> (SelectionSet, HashSet<String>) {
    let mut selection = SelectionSet::new();
    let mut expected = HashSet::new();
    for op in ops {
        match op {
            SelectionOp::Select(i, on) => {
                let id = &assets[*i].id;
                selection.select(id, *on);
                if *on {
                    expected.insert(id.clone());
                } else {
                    expected.remove(id);
                }
            }
            SelectionOp::SelectAll(mask) => {
                let view = masked(assets, mask);
                selection.select_all(&view);
                let all = view.iter().all(|a| expected.contains(&a.id));
                for asset in view {
                    if all {
                        expected.remove(&asset.id);
                    } else {
                        expected.insert(asset.id.clone());
                    }
                }
            }
            SelectionOp::Clear => {
                selection.clear();
                expected.clear();
            }
        }
    }
    (selection, expected)
}

proptest! {
    #[test]
    fn filter_returns_matching_subsequence(assets in arb_assets(24), query in arb_query()) {
        let view = query.filter(&assets);

        let expected: Vec<&str> = assets
            .iter()
            .filter(|a| passes(&query, a))
            .map(|a| a.id.as_str())
            .collect();
        let got: Vec<&str> = view.iter().map(|a| a.id.as_str()).collect();
        prop_assert_eq!(&got, &expected);
        prop_assert!(view.windows(2).all(|w| position(w[0]) < position(w[1])));

        // The sorted view holds the same assets.
        let mut applied: Vec<&str> = query.apply(&assets).iter().map(|a| a.id.as_str()).collect();
        applied.sort_by_key(|id| id[1..].parse::<usize>().unwrap());
        prop_assert_eq!(applied, got);
    }

    #[test]
    fn empty_query_keeps_everything(assets in arb_assets(24)) {
        let view = Query::default().filter(&assets);
        prop_assert_eq!(view.len(), assets.len());
        prop_assert!(view.iter().zip(&assets).all(|(a, b)| a.id == b.id));
    }

    #[test]
    fn sort_is_ordered_and_stable(assets in arb_assets(24), sort in arb_sort()) {
        let sorted = sort_view(assets.iter().collect(), sort);
        prop_assert_eq!(sorted.len(), assets.len());

        for pair in sorted.windows(2) {
            let order = key_order(pair[0], pair[1], sort.field);
            match sort.direction {
                SortDirection::Asc => {
                    prop_assert_ne!(order, Ordering::Greater);
                }
                SortDirection::Desc => {
                    prop_assert_ne!(order, Ordering::Less);
                }
            }
            if order == Ordering::Equal {
                prop_assert!(
                    position(pair[0]) < position(pair[1]),
                    "{} and {} tie but swapped",
                    pair[0].id,
                    pair[1].id
                );
            }
        }
    }

    #[test]
    fn selection_count_tracks_selected_ids(ops in arb_ops()) {
        let assets = pool();
        let (selection, expected) = replay(&assets, &ops);

        prop_assert_eq!(selection.count(), expected.len());
        for asset in &assets {
            prop_assert_eq!(selection.is_selected(&asset.id), expected.contains(&asset.id));
        }
    }

    #[test]
    fn double_select_all_restores_uniform_view(
        ops in arb_ops(),
        mask in prop::collection::vec(any::<bool>(), POOL),
    ) {
        let assets = pool();
        let (mut selection, _) = replay(&assets, &ops);
        let view = masked(&assets, &mask);
        let before = selection.clone();
        let uniform = selection.all_selected(&view)
            || view.iter().all(|a| !selection.is_selected(&a.id));

        selection.select_all(&view);
        prop_assert!(
            selection.all_selected(&view) || view.iter().all(|a| !selection.is_selected(&a.id))
        );
        selection.select_all(&view);

        if uniform {
            for asset in &assets {
                prop_assert_eq!(selection.is_selected(&asset.id), before.is_selected(&asset.id));
            }
            prop_assert_eq!(selection.count(), before.count());
        }
    }

    #[test]
    fn consume_hands_over_visible_ids_and_resets(
        ops in arb_ops(),
        mask in prop::collection::vec(any::<bool>(), POOL),
    ) {
        let assets = pool();
        let (mut selection, expected) = replay(&assets, &ops);
        let view = masked(&assets, &mask);

        let wanted: Vec<String> = view
            .iter()
            .filter(|a| expected.contains(&a.id))
            .map(|a| a.id.clone())
            .collect();
        prop_assert_eq!(selection.consume(&view), wanted);
        prop_assert_eq!(selection.count(), 0);
    }
}
