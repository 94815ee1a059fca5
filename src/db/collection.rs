use std::marker::PhantomData;

use crate::db::migration::backfill_order;
use crate::db::ordering::{next_position, reorder_by_ids};
use crate::db::record::{now, IdPolicy, Record};
use crate::db::slug::{generate_slug, unique_hex_id, unique_slug};
use crate::db::store::JsonStore;

/// An ordered collection of `R` records persisted as one JSON array.
///
/// Every mutation is a full read-modify-write of the resource with no locking:
/// two concurrent writers to the same collection race and the last save wins.
/// Mutations report success as `bool`; failures are logged, never raised.
pub struct Collection<R> {
    store: JsonStore,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for Collection<R> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _record: PhantomData,
        }
    }
}

impl<R: Record> Collection<R> {
    pub fn new(store: JsonStore) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    /// Records in file order.
    pub async fn load(&self) -> Vec<R> {
        self.store.load(R::RESOURCE).await
    }

    pub async fn save(&self, records: &[R]) -> bool {
        self.store.save(R::RESOURCE, records).await
    }

    /// All records, stable-sorted by `order` (missing order sorts as 0).
    pub async fn get_all(&self) -> Vec<R> {
        let mut records = self.load().await;
        records.sort_by_key(|r| r.meta().order_or_zero());
        records
    }

    pub async fn get_by_id(&self, id: &str) -> Option<R> {
        self.get_all().await.into_iter().find(|r| r.id() == id)
    }

    /// Add a record; see [`Collection::insert`].
    pub async fn add(&self, record: R) -> bool {
        self.insert(record).await.is_some()
    }

    /// Add a record and return it as stored.
    ///
    /// Assigns an id when the record has none, puts it last when it has no
    /// `order`, and stamps both timestamps.
    pub async fn insert(&self, mut record: R) -> Option<R> {
        let mut records = self.get_all().await;

        if record.id().is_empty() {
            let id = next_id(&records, &record)?;
            record.meta_mut().id = id;
        }

        if record.meta().order.is_none() {
            let order = next_position(records.iter().map(|r| r.meta().order_or_zero()));
            record.meta_mut().order = Some(order);
        }

        let stamp = now();
        record.meta_mut().created_at = Some(stamp);
        record.meta_mut().updated_at = Some(stamp);
        record.normalize();

        records.push(record.clone());
        if self.save(&records).await {
            tracing::info!("Added {} '{}'", R::KIND, record.id());
            Some(record)
        } else {
            None
        }
    }

    /// Replace the record `id`; see [`Collection::replace`].
    pub async fn update(&self, id: &str, record: R) -> bool {
        self.replace(id, record).await.is_some()
    }

    /// Replace the record `id` and return it as stored.
    ///
    /// Under the slug policy a changed title renames the record; otherwise the
    /// id stays. `created_at` is carried over, and so is `order` when the new
    /// record does not set one. `None` if `id` is unknown or the save failed.
    pub async fn replace(&self, id: &str, mut record: R) -> Option<R> {
        let mut records = self.get_all().await;
        let position = records.iter().position(|r| r.id() == id)?;
        let existing = &records[position];

        let new_id = match R::ID_POLICY {
            IdPolicy::Slug { fallback } => {
                let new_title = record.slug_source();
                if !new_title.is_empty() && new_title != existing.slug_source() {
                    let base = generate_slug(new_title, fallback);
                    unique_slug(&base, records.iter().map(|r| r.id()), Some(id))
                } else {
                    id.to_string()
                }
            }
            IdPolicy::NumericCounter | IdPolicy::RandomHex => id.to_string(),
        };

        let created_at = existing.meta().created_at.unwrap_or_else(now);
        let order = record.meta().order.or(existing.meta().order);

        let meta = record.meta_mut();
        meta.id = new_id;
        meta.order = order;
        meta.created_at = Some(created_at);
        meta.updated_at = Some(now());
        record.normalize();

        records[position] = record.clone();
        if self.save(&records).await {
            if record.id() != id {
                tracing::info!("Renamed {} '{}' to '{}'", R::KIND, id, record.id());
            }
            Some(record)
        } else {
            None
        }
    }

    /// Remove every record whose id is `id`.
    ///
    /// Returns the save result, so deleting an unknown id still reports success.
    pub async fn delete(&self, id: &str) -> bool {
        let mut records = self.get_all().await;
        records.retain(|r| r.id() != id);
        self.save(&records).await
    }

    /// Set `order` from each id's 1-based position in `ids`.
    ///
    /// Ids not in the collection are skipped. Records not mentioned in `ids`
    /// keep their old order, which can collide with the new positions.
    pub async fn reorder<S: AsRef<str>>(&self, ids: &[S]) -> bool {
        let mut records = self.load().await;
        let stamp = now();

        reorder_by_ids(&mut records, ids, |r| r.id(), |r, position| {
            let meta = r.meta_mut();
            meta.order = Some(position);
            meta.updated_at = Some(stamp);
        });

        self.save(&records).await
    }

    /// Run the legacy-data migrations, saving only if something changed.
    pub async fn migrate(&self) -> bool {
        let mut records = self.load().await;
        let stamp = now();

        let mut updated = backfill_order(&mut records, stamp);
        updated |= R::migrate_legacy(&mut records, stamp);

        if updated {
            tracing::info!("Migrated legacy {} records", R::KIND);
            self.save(&records).await
        } else {
            true
        }
    }
}

/// Id for a new record under the collection's policy.
///
/// `None` when the numeric counter meets an id it cannot parse: guessing a
/// number there could hand out a duplicate.
fn next_id<R: Record>(records: &[R], record: &R) -> Option<String> {
    match R::ID_POLICY {
        IdPolicy::Slug { fallback } => {
            let base = generate_slug(record.slug_source(), fallback);
            Some(unique_slug(&base, records.iter().map(|r| r.id()), None))
        }
        IdPolicy::NumericCounter => {
            let mut max_id: i64 = 0;
            for existing in records {
                match existing.id().parse::<i64>() {
                    Ok(n) => max_id = max_id.max(n),
                    Err(_) => {
                        tracing::error!(
                            "Cannot number new {}: existing id '{}' is not numeric",
                            R::KIND,
                            existing.id()
                        );
                        return None;
                    }
                }
            }
            match max_id.checked_add(1) {
                Some(next) => Some(next.to_string()),
                None => {
                    tracing::error!("Cannot number new {}: id counter is exhausted", R::KIND);
                    None
                }
            }
        }
        IdPolicy::RandomHex => Some(unique_hex_id(records.iter().map(|r| r.id()))),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::db::models::{Blog, Event, Gallery, Objective, Photo};
    use crate::db::record::RecordMeta;
    use crate::storage::client::LocalStorageClient;

    fn collection<R: Record>(dir: &tempfile::TempDir) -> Collection<R> {
        let storage = Arc::new(LocalStorageClient::new(dir.path()));
        Collection::new(JsonStore::new(storage))
    }

    fn blog_titled(title_en: &str) -> Blog {
        Blog {
            title: title_en.to_string(),
            title_en: title_en.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_add_assigns_slug_and_order() {
        let dir = tempfile::tempdir().unwrap();
        let blogs = collection::<Blog>(&dir);

        assert!(blogs.add(blog_titled("Hello World")).await);
        assert!(blogs.add(blog_titled("Hello World")).await);

        let first = blogs.get_by_id("hello-world").await.unwrap();
        assert_eq!(first.meta.order, Some(1));
        let second = blogs.get_by_id("hello-world-1").await.unwrap();
        assert_eq!(second.meta.order, Some(2));
        assert!(second.meta.created_at.is_some());
        assert_eq!(second.meta.created_at, second.meta.updated_at);
    }

    #[tokio::test]
    async fn test_add_round_trips_record() {
        let dir = tempfile::tempdir().unwrap();
        let blogs = collection::<Blog>(&dir);

        let stored = blogs
            .insert(Blog {
                excerpt_en: "An excerpt".to_string(),
                image: Some("/uploads/x.png".to_string()),
                ..blog_titled("Round Trip")
            })
            .await
            .unwrap();

        let fetched = blogs.get_by_id(stored.id()).await.unwrap();
        assert_eq!(fetched, stored);
    }

    #[tokio::test]
    async fn test_add_keeps_explicit_id_and_order() {
        let dir = tempfile::tempdir().unwrap();
        let objectives = collection::<Objective>(&dir);

        let objective = Objective {
            meta: RecordMeta {
                id: "custom".to_string(),
                order: Some(42),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(objectives.add(objective).await);

        let stored = objectives.get_by_id("custom").await.unwrap();
        assert_eq!(stored.meta.order, Some(42));
    }

    #[tokio::test]
    async fn test_event_ids_count_up() {
        let dir = tempfile::tempdir().unwrap();
        let events = collection::<Event>(&dir);

        assert!(events.add(Event::default()).await);
        assert!(events.add(Event::default()).await);

        let ids: Vec<_> = events
            .get_all()
            .await
            .iter()
            .map(|e| e.id().to_string())
            .collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_event_counter_refuses_non_numeric_ids() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("events_data.json"),
            r#"[{"id": "legacy-event", "title": "Old"}]"#,
        )
        .unwrap();
        let events = collection::<Event>(&dir);

        assert!(!events.add(Event::default()).await);
        assert_eq!(events.get_all().await.len(), 1);
    }

    #[tokio::test]
    async fn test_random_hex_ids() {
        let dir = tempfile::tempdir().unwrap();
        let objectives = collection::<Objective>(&dir);

        let stored = objectives.insert(Objective::default()).await.unwrap();
        assert_eq!(stored.id().len(), crate::db::slug::TOKEN_ID_LEN);
    }

    #[tokio::test]
    async fn test_update_renames_on_title_change() {
        let dir = tempfile::tempdir().unwrap();
        let blogs = collection::<Blog>(&dir);
        blogs.add(blog_titled("Hello World")).await;
        blogs.add(blog_titled("Other Post")).await;
        let original = blogs.get_by_id("hello-world").await.unwrap();

        assert!(blogs.update("hello-world", blog_titled("Other Post")).await);

        assert!(blogs.get_by_id("hello-world").await.is_none());
        let renamed = blogs.get_by_id("other-post-1").await.unwrap();
        assert_eq!(renamed.meta.created_at, original.meta.created_at);
        assert_eq!(renamed.meta.order, Some(1));
    }

    #[tokio::test]
    async fn test_update_same_title_keeps_id() {
        let dir = tempfile::tempdir().unwrap();
        let blogs = collection::<Blog>(&dir);
        blogs.add(blog_titled("Hello World")).await;

        let edited = Blog {
            content_en: "New body".to_string(),
            ..blog_titled("Hello World")
        };
        assert!(blogs.update("hello-world", edited).await);

        let stored = blogs.get_by_id("hello-world").await.unwrap();
        assert_eq!(stored.content_en, "New body");
    }

    #[tokio::test]
    async fn test_update_unknown_id_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blogs = collection::<Blog>(&dir);

        assert!(!blogs.update("missing", blog_titled("Anything")).await);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let blogs = collection::<Blog>(&dir);
        blogs.add(blog_titled("Keep Me")).await;
        let before = blogs.get_all().await;

        assert!(blogs.delete("not-there").await);
        assert_eq!(blogs.get_all().await, before);

        assert!(blogs.delete("keep-me").await);
        assert!(blogs.get_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_reorder_by_ids() {
        let dir = tempfile::tempdir().unwrap();
        let blogs = collection::<Blog>(&dir);
        blogs.add(blog_titled("Hello World")).await;
        blogs.add(blog_titled("Hello World")).await;

        assert!(blogs.reorder(&["hello-world-1", "hello-world", "ghost"]).await);

        assert_eq!(
            blogs.get_by_id("hello-world-1").await.unwrap().meta.order,
            Some(1)
        );
        assert_eq!(
            blogs.get_by_id("hello-world").await.unwrap().meta.order,
            Some(2)
        );
        let ids: Vec<_> = blogs
            .get_all()
            .await
            .iter()
            .map(|b| b.id().to_string())
            .collect();
        assert_eq!(ids, vec!["hello-world-1", "hello-world"]);
    }

    #[tokio::test]
    async fn test_partial_reorder_keeps_unlisted_orders() {
        let dir = tempfile::tempdir().unwrap();
        let blogs = collection::<Blog>(&dir);
        blogs.add(blog_titled("A")).await;
        blogs.add(blog_titled("B")).await;
        blogs.add(blog_titled("C")).await;

        assert!(blogs.reorder(&["c"]).await);

        // "a" keeps order 1 and now shares it with "c"
        assert_eq!(blogs.get_by_id("a").await.unwrap().meta.order, Some(1));
        assert_eq!(blogs.get_by_id("b").await.unwrap().meta.order, Some(2));
        assert_eq!(blogs.get_by_id("c").await.unwrap().meta.order, Some(1));
    }

    #[tokio::test]
    async fn test_get_all_sorts_stably_with_missing_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("objectives_data.json"),
            r#"[
                {"id": "late", "order": 5},
                {"id": "unordered-1"},
                {"id": "early", "order": 1},
                {"id": "unordered-2"}
            ]"#,
        )
        .unwrap();
        let objectives = collection::<Objective>(&dir);

        let ids: Vec<_> = objectives
            .get_all()
            .await
            .iter()
            .map(|o| o.id().to_string())
            .collect();
        assert_eq!(ids, vec!["unordered-1", "unordered-2", "early", "late"]);
    }

    #[tokio::test]
    async fn test_get_by_id_matches_numeric_ids_as_strings() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("events_data.json"),
            r#"[{"id": 12, "title": "Numeric"}]"#,
        )
        .unwrap();
        let events = collection::<Event>(&dir);

        let event = events.get_by_id("12").await.unwrap();
        assert_eq!(event.title, "Numeric");
    }

    #[tokio::test]
    async fn test_gallery_derived_fields_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let galleries = collection::<Gallery>(&dir);

        let gallery = Gallery {
            title_en: "Festival".to_string(),
            photos: vec![Photo {
                url: "/uploads/f1.jpg".to_string(),
                ..Default::default()
            }],
            photo_count: 12,
            ..Default::default()
        };
        assert!(galleries.add(gallery).await);

        let stored = galleries.get_by_id("festival").await.unwrap();
        assert_eq!(stored.photo_count, 1);
        assert_eq!(stored.cover_image.as_deref(), Some("/uploads/f1.jpg"));

        let emptied = Gallery {
            title_en: "Festival".to_string(),
            ..Default::default()
        };
        assert!(galleries.update("festival", emptied).await);
        let stored = galleries.get_by_id("festival").await.unwrap();
        assert_eq!(stored.photo_count, 0);
        assert_eq!(stored.cover_image, None);
    }

    #[tokio::test]
    async fn test_migrate_blogs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("blogs_data.json"),
            r#"[
                {"id": 1, "titleEn": "First Post"},
                {"id": "2", "titleEn": "First Post"}
            ]"#,
        )
        .unwrap();
        let blogs = collection::<Blog>(&dir);

        assert!(blogs.migrate().await);
        let migrated = blogs.get_all().await;
        let ids: Vec<_> = migrated.iter().map(|b| b.id().to_string()).collect();
        assert_eq!(ids, vec!["first-post", "first-post-1"]);
        assert_eq!(migrated[0].meta.order, Some(1));
        assert_eq!(migrated[1].meta.order, Some(2));

        // Running again changes nothing
        let raw_before = std::fs::read_to_string(dir.path().join("blogs_data.json")).unwrap();
        assert!(blogs.migrate().await);
        let raw_after = std::fs::read_to_string(dir.path().join("blogs_data.json")).unwrap();
        assert_eq!(raw_before, raw_after);
    }

    #[tokio::test]
    async fn test_migrate_digit_title_does_not_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("blogs_data.json"),
            r#"[{"id": "1", "titleEn": "2025", "order": 1}]"#,
        )
        .unwrap();
        let blogs = collection::<Blog>(&dir);

        assert!(blogs.migrate().await);
        assert_eq!(blogs.get_all().await[0].id(), "2025");

        let raw_before = std::fs::read_to_string(dir.path().join("blogs_data.json")).unwrap();
        assert!(blogs.migrate().await);
        let raw_after = std::fs::read_to_string(dir.path().join("blogs_data.json")).unwrap();
        assert_eq!(raw_before, raw_after);
    }

    #[tokio::test]
    async fn test_event_counter_refuses_to_overflow() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("events_data.json"),
            format!(r#"[{{"id": "{}", "title": "Last", "order": 1}}]"#, i64::MAX),
        )
        .unwrap();
        let events = collection::<Event>(&dir);

        assert!(!events.add(Event::default()).await);
        assert_eq!(events.get_all().await.len(), 1);
    }
}
