// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! In-session asset collection: ordered, id-unique, never shrinks.

use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use crate::models::{Asset, AssetDraft, DraftError};

/// Ordered asset list seeded from a provider and edited locally.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssetCollection {
    assets: Vec<Asset>,
}

impl AssetCollection {
    /// Replace the contents with a freshly ingested list (ids already unique).
    pub fn seed(&mut self, assets: Vec<Asset>) {
        debug!(count = assets.len(), "collection seeded");
        self.assets = assets;
    }

    pub fn as_slice(&self) -> &[Asset] {
        &self.assets
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == id)
    }

    /// Validate a draft and prepend it as a new asset. Returns the new id.
    pub fn create(&mut self, draft: &AssetDraft, now: OffsetDateTime) -> Result<String, DraftError> {
        draft.validate()?;

        let id = Uuid::new_v4().to_string();
        let mut asset = Asset::new(id.clone(), String::new(), String::new());
        draft.apply_to(&mut asset);
        asset.date_added = now;

        debug!(id = %asset.id, name = %asset.name, "asset created");
        self.assets.insert(0, asset);
        Ok(id)
    }

    /// Replace the editable fields of an existing asset in place.
    pub fn update(
        &mut self,
        id: &str,
        draft: &AssetDraft,
        now: OffsetDateTime,
    ) -> Result<(), DraftError> {
        draft.validate()?;

        let asset = self
            .assets
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| DraftError::UnknownId(id.to_string()))?;
        draft.apply_to(asset);
        asset.extras.date_modified = Some(now);

        debug!(id, "asset updated");
        Ok(())
    }

    /// Append `tag` to every listed asset. Returns how many assets gained the tag.
    pub fn tag(&mut self, ids: &[String], tag: &str) -> usize {
        self.assets
            .iter_mut()
            .filter(|a| ids.contains(&a.id))
            .map(|a| a.tags.push(tag))
            .filter(|added| *added)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::models::{AssetKind, Confidentiality, Tags};

    fn seeded() -> AssetCollection {
        let mut coll = AssetCollection::default();
        coll.seed(vec![
            Asset::new("1", "Logo", "https://example.com/logo.png"),
            Asset::new("2", "Tour", "https://example.com/tour.mp4"),
        ]);
        coll
    }

    fn draft(name: &str) -> AssetDraft {
        AssetDraft {
            name: name.into(),
            external_link: "https://www.dropbox.com/s/new/photo.jpg?dl=0".into(),
            confidentiality: Confidentiality::Public,
            tags: Tags::parse_list("hero, product"),
            ..Default::default()
        }
    }

    #[test]
    fn create_prepends_with_fresh_id() {
        let mut coll = seeded();
        let now = datetime!(2024-07-01 9:00 UTC);

        let id = coll.create(&draft("Hero shot"), now).unwrap();

        assert_eq!(coll.len(), 3);
        let first = &coll.as_slice()[0];
        assert_eq!(first.id, id);
        assert_eq!(first.name, "Hero shot");
        assert_eq!(first.kind, AssetKind::Image);
        assert_eq!(first.date_added, now);
        assert_eq!(first.download_count, 0);
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn create_rejects_invalid_draft_without_mutating() {
        let mut coll = seeded();
        let err = coll
            .create(&draft("   "), OffsetDateTime::UNIX_EPOCH)
            .unwrap_err();
        assert_eq!(err, DraftError::EmptyName);
        assert_eq!(coll.len(), 2);
    }

    #[test]
    fn update_keeps_identity_and_position() {
        let mut coll = seeded();
        let now = datetime!(2024-07-02 9:00 UTC);

        coll.update("2", &draft("Tour v2"), now).unwrap();

        let updated = &coll.as_slice()[1];
        assert_eq!(updated.id, "2");
        assert_eq!(updated.name, "Tour v2");
        assert_eq!(updated.confidentiality, Confidentiality::Public);
        assert_eq!(updated.date_added, OffsetDateTime::UNIX_EPOCH);
        assert_eq!(updated.extras.date_modified, Some(now));
    }

    #[test]
    fn update_unknown_id_is_an_error() {
        let mut coll = seeded();
        assert_eq!(
            coll.update("nope", &draft("x"), OffsetDateTime::UNIX_EPOCH),
            Err(DraftError::UnknownId("nope".into()))
        );
    }

    #[test]
    fn tag_adds_once() {
        let mut coll = seeded();
        let ids = vec!["1".to_string(), "2".to_string()];

        assert_eq!(coll.tag(&ids, "kit:launch"), 2);
        assert_eq!(coll.tag(&ids, "kit:launch"), 0);
        assert!(coll.get("1").unwrap().tags.contains("kit:launch"));
    }
}
