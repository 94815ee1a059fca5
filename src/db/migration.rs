//! Idempotent fixes for records written by older versions of the site.
//!
//! Both passes are cheap and safe to run on every read of a collection.

use chrono::NaiveDateTime;

use crate::db::record::Record;
use crate::db::slug::{generate_slug, unique_slug};

/// Give every record without an `order` its 1-based position in the file.
pub fn backfill_order<R: Record>(records: &mut [R], now: NaiveDateTime) -> bool {
    let mut updated = false;
    for (index, record) in records.iter_mut().enumerate() {
        let meta = record.meta_mut();
        if meta.order.is_none() {
            meta.order = Some(index as i64 + 1);
            meta.updated_at = Some(now);
            updated = true;
        }
    }
    updated
}

/// Replace legacy all-digit ids with slugs derived from the record's title.
///
/// Uniqueness is checked against the collection as it is being migrated, so
/// two legacy posts with the same title end up as `x` and `x-1`. Records
/// without a usable title keep their numeric id, and so do records whose
/// title slugifies to that same id.
pub fn numeric_ids_to_slugs<R: Record>(
    records: &mut [R],
    fallback: &str,
    now: NaiveDateTime,
) -> bool {
    let mut updated = false;
    for i in 0..records.len() {
        let current_id = records[i].id().to_string();
        let is_numeric = !current_id.is_empty() && current_id.chars().all(|c| c.is_ascii_digit());
        if !is_numeric {
            continue;
        }

        let title = records[i].slug_source().trim().to_string();
        if title.is_empty() {
            continue;
        }

        let base = generate_slug(&title, fallback);
        let new_id = {
            let ids: Vec<&str> = records.iter().map(|r| r.id()).collect();
            unique_slug(&base, ids.iter().copied(), Some(current_id.as_str()))
        };
        if new_id == current_id {
            continue;
        }

        tracing::info!("Migrating {} id '{}' to '{}'", R::KIND, current_id, new_id);
        let meta = records[i].meta_mut();
        meta.id = new_id;
        meta.updated_at = Some(now);
        updated = true;
    }
    updated
}
