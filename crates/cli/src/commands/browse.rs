//! The collection browser.
//!
//! Renders the whole hierarchy in the configured style under a fixed
//! header and the reserved "Unsorted" entry. Works without credentials by
//! falling back to whatever the cache holds; browsing never demands a
//! sign-in.

use droplet_core::hierarchy::{self, RenderStyle};
use droplet_core::models::{Collection, ResourceKind, UNSORTED_COLLECTION_ID};
use droplet_core::refresh::{self, RefreshMarker};
use droplet_core::{AppConfig, FileCache, ReadPolicy};

use crate::commands::{display_order, open_mirror};
use crate::feedback::{Feedback, Item};
use crate::render;
use crate::spawn::ProcessSpawner;

pub async fn run(config: &AppConfig, query: &str) -> anyhow::Result<()> {
    let cache = FileCache::new(&config.cache_dir);
    let marker = RefreshMarker::in_dir(&config.cache_dir);
    refresh::maybe_refresh(&cache, &marker, &ProcessSpawner, config.refresh_interval());

    let (top, sub) = match open_mirror(config) {
        Ok(mirror) => (
            mirror.collections_top(ReadPolicy::Trust).await,
            mirror.collections_sub(ReadPolicy::Trust).await,
        ),
        Err(err) => {
            tracing::debug!(error = %err, "browsing from cache only, no credentials");
            (
                cache.read(ResourceKind::CollectionsTop, ReadPolicy::Trust).unwrap_or_default(),
                cache.read(ResourceKind::CollectionsSub, ReadPolicy::Trust).unwrap_or_default(),
            )
        }
    };

    let style = if config.subcollections_as_full_paths { RenderStyle::Paths } else { RenderStyle::Tree };
    assemble(query, &display_order(top), &display_order(sub), style).emit()
}

pub(crate) fn assemble(query: &str, top: &[Collection], sub: &[Collection], style: RenderStyle) -> Feedback {
    let mut feedback = Feedback::new();

    feedback.push(
        Item::new("Bookmark collections")
            .subtitle("⬅︎ Go back to searching all bookmarks")
            .icon(render::APP_ICON)
            .var("goto", "back"),
    );
    feedback.push(
        Item::new("Unsorted")
            .icon(render::FOLDER_ICON)
            .var("collection_id", UNSORTED_COLLECTION_ID.to_string())
            .var("collection_path", "Unsorted")
            .var("goto", "collection"),
    );

    let mut entries: Vec<Item> =
        hierarchy::render(top, sub, style).iter().map(render::collection_item).collect();
    if !query.is_empty() {
        let needle = query.to_lowercase();
        entries.retain(|item| item.filter_key().contains(&needle));
    }
    feedback.extend(entries);

    feedback
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(id: i64, parent_id: i64, title: &str) -> Collection {
        Collection { id, parent_id, title: title.into(), cover_url: None }
    }

    fn titles(feedback: &Feedback) -> Vec<String> {
        let value = serde_json::to_value(feedback).unwrap();
        value["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["title"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_header_and_unsorted_lead_the_list() {
        let top = vec![collection(1, 0, "Work")];
        let feedback = assemble("", &top, &[], RenderStyle::Tree);
        assert_eq!(titles(&feedback), vec!["Bookmark collections", "Unsorted", "Work"]);
    }

    #[test]
    fn test_tree_style_indents_children() {
        let top = vec![collection(1, 0, "Work")];
        let sub = vec![collection(2, 1, "Projects")];
        let feedback = assemble("", &top, &sub, RenderStyle::Tree);
        assert_eq!(titles(&feedback)[3], "   ↳ Projects");
    }

    #[test]
    fn test_paths_style_flattens() {
        let top = vec![collection(1, 0, "Work")];
        let sub = vec![collection(2, 1, "Projects")];
        let feedback = assemble("", &top, &sub, RenderStyle::Paths);
        assert_eq!(titles(&feedback)[3], "Work/Projects");
    }

    #[test]
    fn test_query_filters_by_descendants_too() {
        let top = vec![collection(1, 0, "Work"), collection(3, 0, "Home")];
        let sub = vec![collection(2, 1, "Projects")];

        // "projects" keeps the parent Work (a descendant matches) and the
        // child itself, but drops Home.
        let feedback = assemble("projects", &top, &sub, RenderStyle::Tree);
        let got = titles(&feedback);
        assert!(got.contains(&"Work".to_string()));
        assert!(got.contains(&"   ↳ Projects".to_string()));
        assert!(!got.contains(&"Home".to_string()));
    }
}
