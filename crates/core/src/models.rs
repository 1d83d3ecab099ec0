//! Typed records for the mirrored resources.
//!
//! The remote service nests references as `{"$id": n}` objects and leaves
//! optional fields out entirely. Everything is decoded once, here, into
//! plain typed records; downstream code never touches dynamic JSON. The
//! serialized form round-trips to the exact wire shape, so cache files
//! keep the same layout as the remote responses.

use serde::{Deserialize, Serialize};

/// Reserved collection id for bookmarks the user has not filed anywhere.
pub const UNSORTED_COLLECTION_ID: i64 = -1;

/// A single mirrored bookmark. Immutable snapshot, never mutated locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    #[serde(rename = "_id")]
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub important: bool,
    /// `-1` is the reserved "Unsorted" collection, `0` means no collection.
    #[serde(rename = "collection", with = "id_ref", default)]
    pub collection_id: i64,
}

/// One node of the collection hierarchy.
///
/// The remote service serves roots and non-roots as two disjoint arrays;
/// both decode into this record. `parent_id == 0` marks a root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(rename = "_id")]
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "parent", with = "id_ref", default)]
    pub parent_id: i64,
    #[serde(rename = "cover", with = "cover_list", default)]
    pub cover_url: Option<String>,
}

/// A tag, identified by its own string value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = "_id")]
    pub name: String,
    #[serde(default)]
    pub count: u64,
}

/// The four mirrored resources, each backed by one cache file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Bookmarks,
    CollectionsTop,
    CollectionsSub,
    Tags,
}

impl ResourceKind {
    pub fn file_name(self) -> &'static str {
        match self {
            ResourceKind::Bookmarks => "bookmarks.json",
            ResourceKind::CollectionsTop => "collections.json",
            ResourceKind::CollectionsSub => "collections_sublevel.json",
            ResourceKind::Tags => "tags.json",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ResourceKind::Bookmarks => "bookmarks",
            ResourceKind::CollectionsTop => "collections",
            ResourceKind::CollectionsSub => "collections_sublevel",
            ResourceKind::Tags => "tags",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// `{"$id": n}` reference objects, flattened to the inner id.
/// Absent or null references decode to 0.
mod id_ref {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct IdRef {
        #[serde(rename = "$id")]
        id: i64,
    }

    pub fn serialize<S: Serializer>(id: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        IdRef { id: *id }.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let reference = Option::<IdRef>::deserialize(deserializer)?;
        Ok(reference.map(|r| r.id).unwrap_or(0))
    }
}

/// Cover image lists. The remote sends an array of URLs; only the first
/// non-empty entry is kept.
mod cover_list {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(url: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
        match url {
            Some(url) => vec![url.as_str()].serialize(serializer),
            None => Vec::<&str>::new().serialize(serializer),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        let urls = Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default();
        Ok(urls.into_iter().find(|u| !u.is_empty()))
    }
}
