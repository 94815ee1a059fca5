use crate::db::collection::Collection;
use crate::db::models::{Gallery, Photo};
use crate::db::record::{now, Record};
use crate::db::slug::unique_hex_id;

/// Photo-level edits. These never rename the gallery, unlike a full update.
impl Collection<Gallery> {
    /// Append a photo to a gallery and return it with its id filled in.
    pub async fn add_photo(&self, gallery_id: &str, mut photo: Photo) -> Option<Photo> {
        let mut galleries = self.load().await;
        let gallery = galleries.iter_mut().find(|g| g.id() == gallery_id)?;

        if photo.id.is_empty() {
            photo.id = unique_hex_id(gallery.photos.iter().map(|p| p.id.as_str()));
        }
        gallery.photos.push(photo.clone());
        gallery.normalize();
        gallery.meta.updated_at = Some(now());

        self.save(&galleries).await.then_some(photo)
    }

    /// Remove a photo and hand it back so the caller can delete the file.
    pub async fn remove_photo(&self, gallery_id: &str, photo_id: &str) -> Option<Photo> {
        let mut galleries = self.load().await;
        let gallery = galleries.iter_mut().find(|g| g.id() == gallery_id)?;
        let position = gallery.photos.iter().position(|p| p.id == photo_id)?;

        let removed = gallery.photos.remove(position);
        if gallery.cover_image.as_deref() == Some(removed.url.as_str()) {
            gallery.cover_image = None;
        }
        gallery.normalize();
        gallery.meta.updated_at = Some(now());

        self.save(&galleries).await.then_some(removed)
    }

    /// Listed photos first in the given order, the rest after in their old order.
    pub async fn reorder_photos<S: AsRef<str>>(&self, gallery_id: &str, photo_ids: &[S]) -> bool {
        let mut galleries = self.load().await;
        let Some(gallery) = galleries.iter_mut().find(|g| g.id() == gallery_id) else {
            return false;
        };

        let mut remaining = std::mem::take(&mut gallery.photos);
        let mut reordered = Vec::with_capacity(remaining.len());
        for id in photo_ids {
            if let Some(position) = remaining.iter().position(|p| p.id == id.as_ref()) {
                reordered.push(remaining.remove(position));
            }
        }
        reordered.append(&mut remaining);

        gallery.photos = reordered;
        gallery.normalize();
        gallery.meta.updated_at = Some(now());

        self.save(&galleries).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::db::store::JsonStore;
    use crate::storage::client::LocalStorageClient;

    fn photo(url: &str) -> Photo {
        Photo {
            url: url.to_string(),
            ..Default::default()
        }
    }

    async fn gallery_with_photos(dir: &tempfile::TempDir, urls: &[&str]) -> Collection<Gallery> {
        let galleries = Collection::new(JsonStore::new(Arc::new(LocalStorageClient::new(dir.path()))));
        galleries
            .insert(Gallery {
                title_en: "Diwali".to_string(),
                photos: urls.iter().map(|u| photo(u)).collect(),
                ..Default::default()
            })
            .await
            .unwrap();
        galleries
    }

    fn urls(gallery: &Gallery) -> Vec<&str> {
        gallery.photos.iter().map(|p| p.url.as_str()).collect()
    }

    #[tokio::test]
    async fn test_add_photo_updates_count_and_cover() {
        let dir = tempfile::tempdir().unwrap();
        let galleries = gallery_with_photos(&dir, &[]).await;

        let added = galleries
            .add_photo("diwali", photo("/uploads/a.jpg"))
            .await
            .unwrap();
        assert!(!added.id.is_empty());

        let stored = galleries.get_by_id("diwali").await.unwrap();
        assert_eq!(stored.photo_count, 1);
        assert_eq!(stored.cover_image.as_deref(), Some("/uploads/a.jpg"));
    }

    #[tokio::test]
    async fn test_add_photo_to_missing_gallery() {
        let dir = tempfile::tempdir().unwrap();
        let galleries = gallery_with_photos(&dir, &[]).await;

        assert!(galleries.add_photo("nope", photo("/uploads/a.jpg")).await.is_none());
    }

    #[tokio::test]
    async fn test_remove_cover_photo_moves_cover() {
        let dir = tempfile::tempdir().unwrap();
        let galleries = gallery_with_photos(&dir, &["/uploads/a.jpg", "/uploads/b.jpg"]).await;
        let first_id = galleries.get_by_id("diwali").await.unwrap().photos[0].id.clone();

        let removed = galleries.remove_photo("diwali", &first_id).await.unwrap();
        assert_eq!(removed.url, "/uploads/a.jpg");

        let stored = galleries.get_by_id("diwali").await.unwrap();
        assert_eq!(stored.photo_count, 1);
        assert_eq!(stored.cover_image.as_deref(), Some("/uploads/b.jpg"));
    }

    #[tokio::test]
    async fn test_reorder_photos_puts_unlisted_last() {
        let dir = tempfile::tempdir().unwrap();
        let galleries =
            gallery_with_photos(&dir, &["/uploads/a.jpg", "/uploads/b.jpg", "/uploads/c.jpg"]).await;
        let ids: Vec<String> = galleries
            .get_by_id("diwali")
            .await
            .unwrap()
            .photos
            .iter()
            .map(|p| p.id.clone())
            .collect();

        assert!(galleries.reorder_photos("diwali", &[ids[2].as_str(), "ghost"]).await);

        let stored = galleries.get_by_id("diwali").await.unwrap();
        assert_eq!(urls(&stored), vec!["/uploads/c.jpg", "/uploads/a.jpg", "/uploads/b.jpg"]);
        // The cover stays the one chosen when the gallery was created
        assert_eq!(stored.cover_image.as_deref(), Some("/uploads/a.jpg"));
    }
}
