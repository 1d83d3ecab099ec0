//! The interactive search path.
//!
//! Never blocks on the network: the refresh coordinator is consulted
//! first (fire-and-forget), then every resource is read with the Trust
//! policy and whatever the mirror has is filtered, ordered and emitted.

use std::collections::HashMap;

use droplet_core::hierarchy::{self, RenderStyle};
use droplet_core::models::{Bookmark, Collection, Tag, UNSORTED_COLLECTION_ID};
use droplet_core::refresh::{self, RefreshMarker};
use droplet_core::search::{self, BookmarkFilter};
use droplet_core::{AppConfig, FileCache, ReadPolicy};

use crate::commands::{display_order, open_mirror};
use crate::feedback::{Feedback, Item};
use crate::render;
use crate::spawn::ProcessSpawner;

pub async fn run(
    config: &AppConfig,
    query: &str,
    collection: Option<i64>,
    tag: Option<String>,
) -> anyhow::Result<()> {
    let cache = FileCache::new(&config.cache_dir);
    let marker = RefreshMarker::in_dir(&config.cache_dir);
    refresh::maybe_refresh(&cache, &marker, &ProcessSpawner, config.refresh_interval());

    let mirror = match open_mirror(config) {
        Ok(mirror) => mirror,
        Err(err) => {
            tracing::warn!(error = %err, "searching without credentials");
            let mut feedback = Feedback::new();
            feedback.push(render::auth_notice());
            return feedback.emit();
        }
    };

    let bookmarks = mirror.bookmarks(ReadPolicy::Trust).await;
    let top = display_order(mirror.collections_top(ReadPolicy::Trust).await);
    let sub = display_order(mirror.collections_sub(ReadPolicy::Trust).await);
    let tags = mirror.tags(ReadPolicy::Trust).await;

    let context = SearchContext {
        query,
        collection_id: collection,
        tag: tag.as_deref(),
        favourites_first: config.favourites_first,
        description_primary: config.description_in_boomark_listing,
    };
    assemble(&context, &bookmarks, &top, &sub, &tags).emit()
}

pub(crate) struct SearchContext<'a> {
    pub query: &'a str,
    pub collection_id: Option<i64>,
    pub tag: Option<&'a str>,
    pub favourites_first: bool,
    pub description_primary: bool,
}

impl SearchContext<'_> {
    /// Scoped means limited to one collection or one tag; the trailing
    /// collection and tag sections only appear unscoped.
    fn scoped_collection(&self) -> Option<i64> {
        self.collection_id.filter(|id| *id != 0)
    }

    fn scoped_tag(&self) -> Option<&str> {
        self.tag.filter(|t| !t.is_empty())
    }
}

pub(crate) fn assemble(
    context: &SearchContext<'_>,
    bookmarks: &[Bookmark],
    top: &[Collection],
    sub: &[Collection],
    tags: &[Tag],
) -> Feedback {
    let mut feedback = Feedback::new();
    let collection_paths = hierarchy::build_path_index(top, sub);

    if let Some(id) = context.scoped_collection() {
        feedback.push(collection_scope_header(id, &collection_paths));
    }
    if let Some(tag) = context.scoped_tag() {
        feedback.push(
            Item::new(format!("Bookmarks tagged with #{tag}"))
                .subtitle("⬅︎ Go back to searching all bookmarks")
                .icon(render::TAG_ICON)
                .var("goto", "back"),
        );
    }

    if bookmarks.is_empty() {
        feedback.push(render::notice(
            "No bookmarks found in cache",
            "Try refreshing the cache or check your account",
        ));
        return feedback;
    }

    let filter = BookmarkFilter {
        collection_id: context.scoped_collection(),
        tag: context.scoped_tag().map(str::to_string),
        query: Some(context.query.to_string()),
    };

    if filter.is_empty() {
        feedback.push(
            Item::new("Search your Raindrop.io bookmarks")
                .subtitle("Or press enter to open Raindrop.io")
                .arg(render::APP_URL)
                .var("goto", "open"),
        );
        feedback.push(
            Item::new("Browse your bookmark collections")
                .icon(render::FOLDER_ICON)
                .var("goto", "browse"),
        );
    }

    let matching = search::filter(bookmarks, &filter);
    let ordered = search::favourites_first(matching, context.favourites_first);
    let found_any = !ordered.is_empty();
    for bookmark in ordered {
        feedback.push(render::bookmark_item(bookmark, &collection_paths, context.description_primary));
    }
    if !found_any && !filter.is_empty() {
        feedback.push(render::notice("No matching bookmarks found", "Try a different search query"));
    }

    // Collections and tags close out every unscoped search.
    if context.scoped_collection().is_none() && context.scoped_tag().is_none() {
        for entry in hierarchy::render(top, sub, RenderStyle::Paths) {
            feedback.push(render::collection_item(&entry));
        }
        for tag in tags {
            feedback.push(render::tag_item(tag));
        }
    }

    feedback
}

fn collection_scope_header(id: i64, collection_paths: &HashMap<i64, String>) -> Item {
    let name = if id == UNSORTED_COLLECTION_ID {
        "Unsorted".to_string()
    } else {
        collection_paths.get(&id).cloned().unwrap_or_else(|| format!("collection {id}"))
    };
    Item::new(format!("Bookmarks in {name}"))
        .subtitle("⬅︎ Go back to searching all bookmarks")
        .icon(render::FOLDER_ICON)
        .var("goto", "back")
}
