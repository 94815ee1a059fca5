use chrono::{DateTime, Local, NaiveDateTime, SubsecRound};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Persisted timestamp layout, microsecond precision.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// How a collection hands out ids to new records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdPolicy {
    /// Slug derived from the record's title, `fallback` when the title yields nothing.
    Slug { fallback: &'static str },
    /// Highest numeric id in the collection plus one.
    NumericCounter,
    /// Random fixed-length hex token.
    RandomHex,
}

/// Bookkeeping fields shared by every stored record.
///
/// Flattened into each record so the persisted JSON keeps the flat
/// `{id, ..., order, created_at, updated_at}` shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordMeta {
    /// Unique within the collection. Legacy files may store it as a number.
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    /// Display position; missing in legacy data until migrated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "micros_timestamp",
        deserialize_with = "lenient_timestamp"
    )]
    pub created_at: Option<NaiveDateTime>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "micros_timestamp",
        deserialize_with = "lenient_timestamp"
    )]
    pub updated_at: Option<NaiveDateTime>,
}

impl RecordMeta {
    /// Sort key: records without an explicit order sort as 0.
    pub fn order_or_zero(&self) -> i64 {
        self.order.unwrap_or(0)
    }
}

/// Timestamp used for `created_at` / `updated_at` (local wall clock, no offset).
pub fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(6)
}

/// A typed record persisted in one JSON collection resource.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Name of the JSON resource holding the collection.
    const RESOURCE: &'static str;
    /// Human-readable kind, used in log lines and error messages.
    const KIND: &'static str;
    const ID_POLICY: IdPolicy;

    fn meta(&self) -> &RecordMeta;
    fn meta_mut(&mut self) -> &mut RecordMeta;

    fn id(&self) -> &str {
        &self.meta().id
    }

    /// Text the slug is derived from. Only consulted under [`IdPolicy::Slug`].
    fn slug_source(&self) -> &str {
        ""
    }

    /// Recompute derived fields. Runs on every add and update.
    fn normalize(&mut self) {}

    /// On update, restore fields the client left out of `sent` from `existing`.
    fn keep_omitted(&mut self, _existing: &Self, _sent: &serde_json::Map<String, serde_json::Value>) {}

    /// URLs of uploaded files that belong to this record and go away with it.
    fn owned_files(&self) -> Vec<&str> {
        Vec::new()
    }

    /// Collection-specific legacy fixes. Returns `true` if anything changed.
    fn migrate_legacy(_records: &mut [Self], _now: NaiveDateTime) -> bool {
        false
    }
}

pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Float(f64),
        Null,
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
        RawId::Float(n) => n.to_string(),
        RawId::Null => String::new(),
    })
}

pub(crate) fn micros_timestamp<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(ts) => serializer.collect_str(&ts.format(TIMESTAMP_FORMAT)),
        None => serializer.serialize_none(),
    }
}

/// Accepts naive ISO timestamps and RFC 3339 ones; anything else reads as unset
/// rather than failing the whole collection.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        s.parse::<NaiveDateTime>()
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(&s)
                    .ok()
                    .map(|dt| dt.with_timezone(&Local).naive_local())
            })
    }))
}
