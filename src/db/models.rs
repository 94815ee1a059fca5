use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::db::migration::numeric_ids_to_slugs;
use crate::db::record::{string_or_number, IdPolicy, Record, RecordMeta};
use crate::db::slug::unique_hex_id;

/// Preferred title for slugs: the English title, else the primary one.
fn title_for_slug<'a>(title_en: &'a str, title: &'a str) -> &'a str {
    if title_en.trim().is_empty() {
        title
    } else {
        title_en
    }
}

/// A blog post. Persisted in `blogs_data.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub title_en: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub excerpt_en: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub content_en: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub category_en: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub date_en: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Record for Blog {
    const RESOURCE: &'static str = "blogs_data.json";
    const KIND: &'static str = "blog";
    const ID_POLICY: IdPolicy = IdPolicy::Slug {
        fallback: "blog-post",
    };

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn slug_source(&self) -> &str {
        title_for_slug(&self.title_en, &self.title)
    }

    fn owned_files(&self) -> Vec<&str> {
        self.image.as_deref().into_iter().collect()
    }

    fn migrate_legacy(records: &mut [Self], now: NaiveDateTime) -> bool {
        numeric_ids_to_slugs(records, "blog-post", now)
    }
}

/// An event listing. Persisted in `events_data.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub title_en: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub location_en: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_en: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Record for Event {
    const RESOURCE: &'static str = "events_data.json";
    const KIND: &'static str = "event";
    const ID_POLICY: IdPolicy = IdPolicy::NumericCounter;

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn owned_files(&self) -> Vec<&str> {
        self.image.as_deref().into_iter().collect()
    }
}

/// One photo inside a gallery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub caption_en: String,
}

/// A photo gallery (category of photos). Persisted in `photos_data.json`.
///
/// `cover_image` and `photo_count` are derived on every write; whatever the
/// client sent for `photoCount` is discarded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gallery {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub title_en: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub date_en: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_en: String,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub photo_count: usize,
}

impl Record for Gallery {
    const RESOURCE: &'static str = "photos_data.json";
    const KIND: &'static str = "gallery";
    const ID_POLICY: IdPolicy = IdPolicy::Slug { fallback: "gallery" };

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn slug_source(&self) -> &str {
        title_for_slug(&self.title_en, &self.title)
    }

    fn normalize(&mut self) {
        for i in 0..self.photos.len() {
            if self.photos[i].id.is_empty() {
                let id = unique_hex_id(self.photos.iter().map(|p| p.id.as_str()));
                self.photos[i].id = id;
            }
        }

        self.photo_count = self.photos.len();
        let cover_missing = self
            .cover_image
            .as_deref()
            .map_or(true, |url| url.trim().is_empty());
        if cover_missing {
            self.cover_image = self.photos.first().map(|p| p.url.clone());
        }
    }

    /// Photos are managed through their own endpoints, so an edit of the
    /// gallery's text fields leaves them and the cover alone.
    fn keep_omitted(&mut self, existing: &Self, sent: &serde_json::Map<String, serde_json::Value>) {
        if !sent.contains_key("photos") {
            self.photos = existing.photos.clone();
        }
        if !sent.contains_key("coverImage") {
            self.cover_image = existing.cover_image.clone();
        }
    }

    fn owned_files(&self) -> Vec<&str> {
        self.photos.iter().map(|p| p.url.as_str()).collect()
    }
}

/// A homepage slider image. Persisted in `slider_data.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderImage {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub alt: String,
}

impl Record for SliderImage {
    const RESOURCE: &'static str = "slider_data.json";
    const KIND: &'static str = "slider image";
    const ID_POLICY: IdPolicy = IdPolicy::RandomHex;

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn owned_files(&self) -> Vec<&str> {
        vec![self.image_url.as_str()]
    }
}

/// A donation objective. Persisted in `objectives_data.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Objective {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub title_en: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_en: String,
    #[serde(default)]
    pub icon: String,
}

impl Record for Objective {
    const RESOURCE: &'static str = "objectives_data.json";
    const KIND: &'static str = "objective";
    const ID_POLICY: IdPolicy = IdPolicy::RandomHex;

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }
}
