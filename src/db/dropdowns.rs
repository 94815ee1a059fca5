//! Navigation dropdown resources.
//!
//! Unlike the record collections these are single JSON objects holding nested
//! ordered lists. Each list level can be reordered on its own, and removing a
//! parent removes what it contains.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::db::ordering::{next_position, reorder_by_ids};
use crate::db::record::{micros_timestamp, now, string_or_number};
use crate::db::slug::unique_hex_id;
use crate::db::store::JsonStore;
use crate::error::AppError;

pub const VIDEOS_DROPDOWN_RESOURCE: &str = "videos_dropdown_data.json";
pub const NAVBAR_DROPDOWNS_RESOURCE: &str = "navbar_dropdowns_data.json";

/// Social links shown next to the dropdowns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialMedia {
    #[serde(default)]
    pub youtube: String,
    #[serde(default)]
    pub instagram: String,
    /// Any other networks an older admin panel stored.
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Videos dropdown
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoCategory {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub font_size: String,
    #[serde(default)]
    pub order: i64,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "micros_timestamp"
    )]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoLink {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    /// Id of the category this link is filed under; empty for top-level links.
    #[serde(default, deserialize_with = "string_or_number")]
    pub category: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub font_size: String,
    #[serde(default)]
    pub order: i64,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "micros_timestamp"
    )]
    pub created_at: Option<NaiveDateTime>,
}

/// Contents of `videos_dropdown_data.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideosDropdown {
    #[serde(default)]
    pub categories: Vec<VideoCategory>,
    #[serde(default)]
    pub links: Vec<VideoLink>,
    #[serde(default)]
    pub social_media: SocialMedia,
}

/// Admin form for a video category.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub font_size: String,
}

/// Admin form for a video link.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LinkInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub font_size: String,
}

fn require(value: &str, message: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        Err(AppError::BadRequest(message.to_string()))
    } else {
        Ok(())
    }
}

async fn save_resource<T: Serialize>(store: &JsonStore, resource: &str, data: &T) -> Result<(), AppError> {
    if store.save(resource, data).await {
        Ok(())
    } else {
        Err(AppError::Storage(format!("Failed to save {}", resource)))
    }
}

/// Videos dropdown operations over `videos_dropdown_data.json`.
#[derive(Clone)]
pub struct VideosDropdownStore {
    store: JsonStore,
}

impl VideosDropdownStore {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// The resource with categories and links sorted by `order`.
    pub async fn get(&self) -> VideosDropdown {
        let mut data: VideosDropdown = self.store.load(VIDEOS_DROPDOWN_RESOURCE).await;
        data.categories.sort_by_key(|c| c.order);
        data.links.sort_by_key(|l| l.order);
        data
    }

    async fn save(&self, data: &VideosDropdown) -> Result<(), AppError> {
        save_resource(&self.store, VIDEOS_DROPDOWN_RESOURCE, data).await
    }

    pub async fn add_category(&self, input: CategoryInput) -> Result<VideoCategory, AppError> {
        require(&input.title, "Category title is required")?;

        let mut data = self.get().await;
        let category = VideoCategory {
            id: unique_hex_id(data.categories.iter().map(|c| c.id.as_str())),
            title: input.title,
            link: input.link,
            font_size: input.font_size,
            order: next_position(data.categories.iter().map(|c| c.order)),
            created_at: Some(now()),
        };
        data.categories.push(category.clone());
        self.save(&data).await?;
        Ok(category)
    }

    pub async fn update_category(
        &self,
        id: &str,
        input: CategoryInput,
    ) -> Result<VideoCategory, AppError> {
        require(&input.title, "Category title is required")?;

        let mut data = self.get().await;
        let category = data
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", id)))?;
        category.title = input.title;
        category.link = input.link;
        category.font_size = input.font_size;
        let updated = category.clone();

        self.save(&data).await?;
        Ok(updated)
    }

    /// Remove a category together with the links filed under it.
    pub async fn delete_category(&self, id: &str) -> Result<(), AppError> {
        let mut data = self.get().await;
        data.categories.retain(|c| c.id != id);
        data.links.retain(|l| l.category != id);
        self.save(&data).await
    }

    pub async fn reorder_categories<S: AsRef<str>>(&self, ids: &[S]) -> Result<(), AppError> {
        let mut data = self.get().await;
        reorder_by_ids(&mut data.categories, ids, |c| c.id.as_str(), |c, p| c.order = p);
        self.save(&data).await
    }

    pub async fn add_link(&self, input: LinkInput) -> Result<VideoLink, AppError> {
        require(&input.title, "Title and link are required")?;
        require(&input.link, "Title and link are required")?;

        let mut data = self.get().await;
        Self::check_category(&data, &input.category)?;
        let link = VideoLink {
            id: unique_hex_id(data.links.iter().map(|l| l.id.as_str())),
            title: input.title,
            link: input.link,
            category: input.category,
            font_size: input.font_size,
            order: next_position(data.links.iter().map(|l| l.order)),
            created_at: Some(now()),
        };
        data.links.push(link.clone());
        self.save(&data).await?;
        Ok(link)
    }

    pub async fn update_link(&self, id: &str, input: LinkInput) -> Result<VideoLink, AppError> {
        require(&input.title, "Title and link are required")?;
        require(&input.link, "Title and link are required")?;

        let mut data = self.get().await;
        Self::check_category(&data, &input.category)?;
        let link = data
            .links
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Link '{}' not found", id)))?;
        link.title = input.title;
        link.link = input.link;
        link.category = input.category;
        link.font_size = input.font_size;
        let updated = link.clone();

        self.save(&data).await?;
        Ok(updated)
    }

    pub async fn delete_link(&self, id: &str) -> Result<(), AppError> {
        let mut data = self.get().await;
        data.links.retain(|l| l.id != id);
        self.save(&data).await
    }

    pub async fn reorder_links<S: AsRef<str>>(&self, ids: &[S]) -> Result<(), AppError> {
        let mut data = self.get().await;
        reorder_by_ids(&mut data.links, ids, |l| l.id.as_str(), |l, p| l.order = p);
        self.save(&data).await
    }

    pub async fn update_social_media(&self, social_media: SocialMedia) -> Result<(), AppError> {
        let mut data = self.get().await;
        data.social_media = social_media;
        self.save(&data).await
    }

    fn check_category(data: &VideosDropdown, category: &str) -> Result<(), AppError> {
        if category.is_empty() || data.categories.iter().any(|c| c.id == category) {
            Ok(())
        } else {
            Err(AppError::BadRequest(format!("Unknown category '{}'", category)))
        }
    }
}

// ---------------------------------------------------------------------------
// Navbar dropdowns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DropdownItem {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub title_hi: String,
    #[serde(default)]
    pub link: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub font_size: String,
    #[serde(default)]
    pub order: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DropdownColumn {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub title_hi: String,
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub heading_hi: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub items: Vec<DropdownItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DropdownDefinition {
    #[serde(default)]
    pub enabled: bool,
    /// Position among the navbar's dropdowns; unset until first reordered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(default)]
    pub columns: Vec<DropdownColumn>,
}

impl DropdownDefinition {
    fn sort(&mut self) {
        self.columns.sort_by_key(|c| c.order);
        for column in &mut self.columns {
            column.items.sort_by_key(|i| i.order);
        }
    }

    fn column_mut(&mut self, column_id: &str) -> Result<&mut DropdownColumn, AppError> {
        self.columns
            .iter_mut()
            .find(|c| c.id == column_id)
            .ok_or_else(|| AppError::NotFound(format!("Column '{}' not found", column_id)))
    }
}

/// Contents of `navbar_dropdowns_data.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavbarDropdowns {
    #[serde(default)]
    pub social_media: SocialMedia,
    #[serde(default)]
    pub dropdowns: BTreeMap<String, DropdownDefinition>,
}

impl NavbarDropdowns {
    fn dropdown_mut(&mut self, nav_item: &str) -> Result<&mut DropdownDefinition, AppError> {
        self.dropdowns
            .get_mut(nav_item)
            .ok_or_else(|| AppError::NotFound(format!("Dropdown '{}' not found", nav_item)))
    }

    /// Nav item keys in display order (explicit `order` first, then by key).
    pub fn ordered_keys(&self) -> Vec<&str> {
        let mut keys: Vec<(&String, &DropdownDefinition)> = self.dropdowns.iter().collect();
        keys.sort_by_key(|(_, d)| d.order.unwrap_or(i64::MAX));
        keys.into_iter().map(|(k, _)| k.as_str()).collect()
    }
}

/// Admin form for a dropdown column.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColumnInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub title_hi: String,
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub heading_hi: String,
}

/// Admin form for a dropdown item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub title_hi: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub font_size: String,
}

/// Navbar dropdown operations over `navbar_dropdowns_data.json`.
#[derive(Clone)]
pub struct NavbarDropdownStore {
    store: JsonStore,
}

impl NavbarDropdownStore {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// The resource with columns and items sorted by `order`.
    pub async fn get(&self) -> NavbarDropdowns {
        let mut data: NavbarDropdowns = self.store.load(NAVBAR_DROPDOWNS_RESOURCE).await;
        for dropdown in data.dropdowns.values_mut() {
            dropdown.sort();
        }
        data
    }

    async fn save(&self, data: &NavbarDropdowns) -> Result<(), AppError> {
        save_resource(&self.store, NAVBAR_DROPDOWNS_RESOURCE, data).await
    }

    /// Turn a dropdown on or off, creating an empty one for a new nav item.
    pub async fn set_enabled(&self, nav_item: &str, enabled: bool) -> Result<(), AppError> {
        require(nav_item, "Navigation item is required")?;

        let mut data = self.get().await;
        data.dropdowns.entry(nav_item.to_string()).or_default().enabled = enabled;
        self.save(&data).await
    }

    pub async fn reorder_dropdowns<S: AsRef<str>>(&self, nav_items: &[S]) -> Result<(), AppError> {
        let mut data = self.get().await;
        for (index, nav_item) in nav_items.iter().enumerate() {
            if let Some(dropdown) = data.dropdowns.get_mut(nav_item.as_ref()) {
                dropdown.order = Some(index as i64 + 1);
            }
        }
        self.save(&data).await
    }

    /// Add a column; a nav item without a dropdown gets a disabled one.
    pub async fn add_column(
        &self,
        nav_item: &str,
        input: ColumnInput,
    ) -> Result<DropdownColumn, AppError> {
        require(nav_item, "Navigation item is required")?;

        let mut data = self.get().await;
        let dropdown = data.dropdowns.entry(nav_item.to_string()).or_default();
        let column = DropdownColumn {
            id: unique_hex_id(dropdown.columns.iter().map(|c| c.id.as_str())),
            title: input.title,
            title_hi: input.title_hi,
            heading: input.heading,
            heading_hi: input.heading_hi,
            order: next_position(dropdown.columns.iter().map(|c| c.order)),
            items: Vec::new(),
        };
        dropdown.columns.push(column.clone());
        self.save(&data).await?;
        Ok(column)
    }

    pub async fn update_column(
        &self,
        nav_item: &str,
        column_id: &str,
        input: ColumnInput,
    ) -> Result<DropdownColumn, AppError> {
        let mut data = self.get().await;
        let column = data.dropdown_mut(nav_item)?.column_mut(column_id)?;
        column.title = input.title;
        column.title_hi = input.title_hi;
        column.heading = input.heading;
        column.heading_hi = input.heading_hi;
        let updated = column.clone();

        self.save(&data).await?;
        Ok(updated)
    }

    /// Remove a column and all of its items.
    pub async fn delete_column(&self, nav_item: &str, column_id: &str) -> Result<(), AppError> {
        let mut data = self.get().await;
        data.dropdown_mut(nav_item)?
            .columns
            .retain(|c| c.id != column_id);
        self.save(&data).await
    }

    pub async fn reorder_columns<S: AsRef<str>>(
        &self,
        nav_item: &str,
        column_ids: &[S],
    ) -> Result<(), AppError> {
        let mut data = self.get().await;
        let dropdown = data.dropdown_mut(nav_item)?;
        reorder_by_ids(&mut dropdown.columns, column_ids, |c| c.id.as_str(), |c, p| c.order = p);
        self.save(&data).await
    }

    pub async fn add_item(
        &self,
        nav_item: &str,
        column_id: &str,
        input: ItemInput,
    ) -> Result<DropdownItem, AppError> {
        require(&input.title, "Title and link are required")?;
        require(&input.link, "Title and link are required")?;

        let mut data = self.get().await;
        let column = data.dropdown_mut(nav_item)?.column_mut(column_id)?;
        let item = DropdownItem {
            id: unique_hex_id(column.items.iter().map(|i| i.id.as_str())),
            title: input.title,
            title_hi: input.title_hi,
            link: input.link,
            font_size: input.font_size,
            order: next_position(column.items.iter().map(|i| i.order)),
        };
        column.items.push(item.clone());
        self.save(&data).await?;
        Ok(item)
    }

    pub async fn update_item(
        &self,
        nav_item: &str,
        column_id: &str,
        item_id: &str,
        input: ItemInput,
    ) -> Result<DropdownItem, AppError> {
        require(&input.title, "Title and link are required")?;
        require(&input.link, "Title and link are required")?;

        let mut data = self.get().await;
        let item = data
            .dropdown_mut(nav_item)?
            .column_mut(column_id)?
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| AppError::NotFound(format!("Item '{}' not found", item_id)))?;
        item.title = input.title;
        item.title_hi = input.title_hi;
        item.link = input.link;
        item.font_size = input.font_size;
        let updated = item.clone();

        self.save(&data).await?;
        Ok(updated)
    }

    pub async fn delete_item(
        &self,
        nav_item: &str,
        column_id: &str,
        item_id: &str,
    ) -> Result<(), AppError> {
        let mut data = self.get().await;
        data.dropdown_mut(nav_item)?
            .column_mut(column_id)?
            .items
            .retain(|i| i.id != item_id);
        self.save(&data).await
    }

    pub async fn reorder_items<S: AsRef<str>>(
        &self,
        nav_item: &str,
        column_id: &str,
        item_ids: &[S],
    ) -> Result<(), AppError> {
        let mut data = self.get().await;
        let column = data.dropdown_mut(nav_item)?.column_mut(column_id)?;
        reorder_by_ids(&mut column.items, item_ids, |i| i.id.as_str(), |i, p| i.order = p);
        self.save(&data).await
    }

    pub async fn update_social_media(&self, social_media: SocialMedia) -> Result<(), AppError> {
        let mut data = self.get().await;
        data.social_media = social_media;
        self.save(&data).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::client::LocalStorageClient;

    fn json_store(dir: &tempfile::TempDir) -> JsonStore {
        JsonStore::new(Arc::new(LocalStorageClient::new(dir.path())))
    }

    fn link(title: &str, url: &str, category: &str) -> LinkInput {
        LinkInput {
            title: title.to_string(),
            link: url.to_string(),
            category: category.to_string(),
            font_size: String::new(),
        }
    }

    #[tokio::test]
    async fn test_videos_categories_and_links() {
        let dir = tempfile::tempdir().unwrap();
        let videos = VideosDropdownStore::new(json_store(&dir));

        let bhajans = videos
            .add_category(CategoryInput {
                title: "Bhajans".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(bhajans.order, 1);

        let first = videos
            .add_link(link("Morning", "https://youtu.be/1", &bhajans.id))
            .await
            .unwrap();
        let second = videos
            .add_link(link("Evening", "https://youtu.be/2", ""))
            .await
            .unwrap();
        assert_eq!(second.order, first.order + 1);

        videos
            .reorder_links(&[second.id.as_str(), first.id.as_str()])
            .await
            .unwrap();
        let data = videos.get().await;
        let titles: Vec<_> = data.links.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["Evening", "Morning"]);
    }

    #[tokio::test]
    async fn test_link_requires_title_and_link() {
        let dir = tempfile::tempdir().unwrap();
        let videos = VideosDropdownStore::new(json_store(&dir));

        let result = videos.add_link(link("No url", "", "")).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
        // Nothing was written
        assert!(!dir.path().join(VIDEOS_DROPDOWN_RESOURCE).exists());
    }

    #[tokio::test]
    async fn test_link_with_unknown_category_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let videos = VideosDropdownStore::new(json_store(&dir));

        let result = videos.add_link(link("Talk", "https://youtu.be/3", "nope")).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_delete_category_cascades_to_links() {
        let dir = tempfile::tempdir().unwrap();
        let videos = VideosDropdownStore::new(json_store(&dir));

        let category = videos
            .add_category(CategoryInput {
                title: "Talks".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        videos
            .add_link(link("Inside", "https://youtu.be/4", &category.id))
            .await
            .unwrap();
        videos
            .add_link(link("Outside", "https://youtu.be/5", ""))
            .await
            .unwrap();

        videos.delete_category(&category.id).await.unwrap();

        let data = videos.get().await;
        assert!(data.categories.is_empty());
        assert_eq!(data.links.len(), 1);
        assert_eq!(data.links[0].title, "Outside");
    }

    #[tokio::test]
    async fn test_legacy_videos_file_with_numeric_fields() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(VIDEOS_DROPDOWN_RESOURCE),
            r#"{
                "categories": [{"id": 1, "title": "Old", "link": "", "font_size": 14, "order": 1}],
                "links": [],
                "social_media": {"youtube": "https://youtube.com/@org", "facebook": "https://fb.com/org"}
            }"#,
        )
        .unwrap();
        let videos = VideosDropdownStore::new(json_store(&dir));

        let data = videos.get().await;
        assert_eq!(data.categories[0].id, "1");
        assert_eq!(data.categories[0].font_size, "14");
        assert_eq!(data.social_media.youtube, "https://youtube.com/@org");
        assert_eq!(
            data.social_media.other.get("facebook"),
            Some(&serde_json::json!("https://fb.com/org"))
        );
    }

    #[tokio::test]
    async fn test_navbar_columns_and_items() {
        let dir = tempfile::tempdir().unwrap();
        let navbar = NavbarDropdownStore::new(json_store(&dir));

        navbar.set_enabled("about", true).await.unwrap();
        let left = navbar
            .add_column(
                "about",
                ColumnInput {
                    title: "Who we are".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let right = navbar
            .add_column("about", ColumnInput::default())
            .await
            .unwrap();

        let item = navbar
            .add_item(
                "about",
                &left.id,
                ItemInput {
                    title: "History".to_string(),
                    link: "/history".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(item.order, 1);

        navbar
            .reorder_columns("about", &[right.id.as_str(), left.id.as_str()])
            .await
            .unwrap();

        let data = navbar.get().await;
        let about = &data.dropdowns["about"];
        assert!(about.enabled);
        assert_eq!(about.columns[0].id, right.id);
        assert_eq!(about.columns[1].items[0].title, "History");
    }

    #[tokio::test]
    async fn test_navbar_item_validation_and_missing_parents() {
        let dir = tempfile::tempdir().unwrap();
        let navbar = NavbarDropdownStore::new(json_store(&dir));

        let result = navbar
            .add_item("about", "col", ItemInput::default())
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        let result = navbar
            .add_item(
                "about",
                "col",
                ItemInput {
                    title: "x".to_string(),
                    link: "/x".to_string(),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_column_removes_items() {
        let dir = tempfile::tempdir().unwrap();
        let navbar = NavbarDropdownStore::new(json_store(&dir));

        let column = navbar
            .add_column("seva", ColumnInput::default())
            .await
            .unwrap();
        navbar
            .add_item(
                "seva",
                &column.id,
                ItemInput {
                    title: "Food drive".to_string(),
                    link: "/food".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        navbar.delete_column("seva", &column.id).await.unwrap();

        let data = navbar.get().await;
        assert!(!data.dropdowns["seva"].enabled);
        assert!(data.dropdowns["seva"].columns.is_empty());
    }

    #[tokio::test]
    async fn test_reorder_dropdowns() {
        let dir = tempfile::tempdir().unwrap();
        let navbar = NavbarDropdownStore::new(json_store(&dir));
        navbar.set_enabled("about", true).await.unwrap();
        navbar.set_enabled("events", true).await.unwrap();
        navbar.set_enabled("media", false).await.unwrap();

        navbar.reorder_dropdowns(&["media", "about"]).await.unwrap();

        let data = navbar.get().await;
        assert_eq!(data.ordered_keys(), vec!["media", "about", "events"]);
    }
}
