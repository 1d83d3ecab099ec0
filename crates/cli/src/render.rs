//! Turns mirrored records into picker rows.
//!
//! Pure assembly: filtering and ordering happened upstream, the sequence
//! handed in here is rendered verbatim.

use std::collections::HashMap;

use droplet_core::hierarchy::CollectionEntry;
use droplet_core::models::{Bookmark, Tag};

use crate::feedback::Item;

/// Bundled icon names, resolved by the host picker.
pub const FOLDER_ICON: &str = "folder.png";
pub const TAG_ICON: &str = "tag.png";
pub const APP_ICON: &str = "icon.png";

/// Web frontend of the bookmark service, the fallback action when
/// nothing is searched for yet.
pub const APP_URL: &str = "https://app.raindrop.io/";

const FIELD_SEPARATOR: &str = " •  ";
const FAVOURITE_SYMBOL: &str = "♥︎ ";

/// One bookmark row. The main subtitle is the collection/tags/host line,
/// the alternate the description; `description_primary` swaps the two.
pub fn bookmark_item(
    bookmark: &Bookmark,
    collection_paths: &HashMap<i64, String>,
    description_primary: bool,
) -> Item {
    let favourite = if bookmark.important { FAVOURITE_SYMBOL } else { "" };

    let mut tag_list = String::new();
    for tag in &bookmark.tags {
        tag_list.push('#');
        tag_list.push_str(tag);
        tag_list.push(' ');
    }
    if !tag_list.is_empty() {
        tag_list.push_str(FIELD_SEPARATOR);
    }

    let mut collection_name = collection_paths.get(&bookmark.collection_id).cloned().unwrap_or_default();
    if !collection_name.is_empty() {
        collection_name.push_str(FIELD_SEPARATOR);
    }

    let general = format!("{favourite}{collection_name}{tag_list}{}", display_host(&bookmark.link));
    let description = if bookmark.excerpt.is_empty() {
        format!("{favourite}{}", bookmark.link)
    } else {
        format!("{favourite}{}", bookmark.excerpt)
    };

    let (main, alternate) = if description_primary { (description, general) } else { (general, description) };

    Item::new(&bookmark.title)
        .arg(&bookmark.link)
        .subtitle(main)
        .alt_subtitle(alternate)
        .var("goto", "open")
}

/// One collection row, for the browse list or the trailing section of a
/// search. The match text lets a parent answer for its descendants.
pub fn collection_item(entry: &CollectionEntry) -> Item {
    Item::new(&entry.label)
        .match_text(&entry.match_text)
        .icon(entry.cover_url.as_deref().unwrap_or(FOLDER_ICON))
        .var("collection_id", entry.id.to_string())
        .var("collection_path", &entry.path)
        .var("goto", "collection")
}

pub fn tag_item(tag: &Tag) -> Item {
    Item::new(&tag.name)
        .icon(TAG_ICON)
        .var("current_tag", &tag.name)
        .var("goto", "tag")
}

/// Non-actionable notice row.
pub fn notice(title: &str, subtitle: &str) -> Item {
    Item::new(title).subtitle(subtitle).valid(false)
}

pub fn auth_notice() -> Item {
    notice(
        "Authentication required",
        "Sign in to the bookmark service again to search your bookmarks",
    )
}

/// Hostname of `link` without a leading "www.", or an empty string when
/// the link does not parse.
pub fn display_host(link: &str) -> String {
    let Ok(parsed) = url::Url::parse(link) else {
        return String::new();
    };
    let host = parsed.host_str().unwrap_or("");
    host.strip_prefix("www.").unwrap_or(host).to_string()
}
