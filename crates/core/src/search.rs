//! Bookmark filtering and ordering.
//!
//! Filters are conjunctive across collection, tag and free text, and the
//! free-text match is disjunctive across title, excerpt, link and tags.
//! Both the filter and the favourites partition are stable: survivors keep
//! the order the mirror handed them over in.

use crate::models::Bookmark;

/// Constraints for one search pass. `None` (or a collection id of 0, or an
/// empty string) means "no constraint", never "match nothing".
#[derive(Debug, Clone, Default)]
pub struct BookmarkFilter {
    pub collection_id: Option<i64>,
    pub tag: Option<String>,
    pub query: Option<String>,
}

impl BookmarkFilter {
    pub fn is_empty(&self) -> bool {
        self.effective_collection().is_none() && self.effective_tag().is_none() && self.effective_query().is_none()
    }

    fn effective_collection(&self) -> Option<i64> {
        self.collection_id.filter(|id| *id != 0)
    }

    fn effective_tag(&self) -> Option<&str> {
        self.tag.as_deref().filter(|t| !t.is_empty())
    }

    fn effective_query(&self) -> Option<&str> {
        self.query.as_deref().filter(|q| !q.is_empty())
    }

    fn matches(&self, bookmark: &Bookmark) -> bool {
        if let Some(id) = self.effective_collection()
            && bookmark.collection_id != id
        {
            return false;
        }

        if let Some(tag) = self.effective_tag() {
            let wanted = tag.to_lowercase();
            if !bookmark.tags.iter().any(|t| t.to_lowercase() == wanted) {
                return false;
            }
        }

        if let Some(query) = self.effective_query() {
            let needle = query.to_lowercase();
            let mut tags_text = String::new();
            for tag in &bookmark.tags {
                tags_text.push_str(&tag.to_lowercase());
                tags_text.push(' ');
            }
            if !(bookmark.title.to_lowercase().contains(&needle)
                || bookmark.excerpt.to_lowercase().contains(&needle)
                || bookmark.link.to_lowercase().contains(&needle)
                || tags_text.contains(&needle))
            {
                return false;
            }
        }

        true
    }
}

/// Keep the bookmarks matching `filter`, in their original order.
/// An empty result is a normal outcome.
pub fn filter<'a>(bookmarks: &'a [Bookmark], filter: &BookmarkFilter) -> Vec<&'a Bookmark> {
    bookmarks.iter().filter(|b| filter.matches(b)).collect()
}

/// Stable partition: favourites first, both halves in their original
/// relative order. Disabled leaves the order untouched.
pub fn favourites_first<'a>(bookmarks: Vec<&'a Bookmark>, enabled: bool) -> Vec<&'a Bookmark> {
    if !enabled {
        return bookmarks;
    }
    let (favourites, rest): (Vec<_>, Vec<_>) = bookmarks.into_iter().partition(|b| b.important);
    let mut ordered = favourites;
    ordered.extend(rest);
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bookmark(id: i64, title: &str, tags: &[&str], collection_id: i64, important: bool) -> Bookmark {
        Bookmark {
            id,
            title: title.into(),
            link: format!("https://example.com/{id}"),
            excerpt: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            important,
            collection_id,
        }
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let bookmarks = vec![bookmark(1, "A", &[], 0, false), bookmark(2, "B", &[], 7, true)];
        let result = filter(&bookmarks, &BookmarkFilter::default());
        assert_eq!(result.len(), 2);

        let zero_collection = BookmarkFilter { collection_id: Some(0), ..Default::default() };
        assert!(zero_collection.is_empty());
        assert_eq!(filter(&bookmarks, &zero_collection).len(), 2);
    }

    #[test]
    fn test_collection_filter_is_exact() {
        let bookmarks = vec![bookmark(1, "A", &[], 7, false), bookmark(2, "B", &[], 8, false)];
        let f = BookmarkFilter { collection_id: Some(7), ..Default::default() };
        let result = filter(&bookmarks, &f);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 1);
    }

    #[test]
    fn test_tag_filter_is_case_insensitive() {
        let bookmarks = vec![bookmark(1, "A", &["News"], 0, false), bookmark(2, "B", &["sports"], 0, false)];
        let f = BookmarkFilter { tag: Some("news".into()), ..Default::default() };
        let result = filter(&bookmarks, &f);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 1);
    }

    #[test]
    fn test_query_is_disjunctive_across_fields() {
        let mut by_excerpt = bookmark(2, "B", &[], 0, false);
        by_excerpt.excerpt = "weather maps".into();
        let bookmarks = vec![
            bookmark(1, "Weather", &[], 0, false),
            by_excerpt,
            bookmark(3, "C", &["weather"], 0, false),
            bookmark(4, "D", &[], 0, false),
        ];
        let f = BookmarkFilter { query: Some("WEATHER".into()), ..Default::default() };
        let ids: Vec<i64> = filter(&bookmarks, &f).iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_query_matches_link() {
        let bookmarks = vec![bookmark(1, "A", &[], 0, false)];
        let f = BookmarkFilter { query: Some("example.com/1".into()), ..Default::default() };
        assert_eq!(filter(&bookmarks, &f).len(), 1);
    }

    #[test]
    fn test_filters_are_conjunctive() {
        // Matches the query through its title, but carries the wrong tag.
        let bookmarks = vec![bookmark(1, "Weather", &["news"], 0, false)];

        let query_only = BookmarkFilter { query: Some("weather".into()), ..Default::default() };
        assert_eq!(filter(&bookmarks, &query_only).len(), 1);

        let with_tag =
            BookmarkFilter { query: Some("weather".into()), tag: Some("sports".into()), ..Default::default() };
        assert!(filter(&bookmarks, &with_tag).is_empty());
    }

    #[test]
    fn test_filter_preserves_input_order() {
        let bookmarks = vec![
            bookmark(3, "match", &[], 0, false),
            bookmark(1, "match", &[], 0, false),
            bookmark(2, "match", &[], 0, false),
        ];
        let f = BookmarkFilter { query: Some("match".into()), ..Default::default() };
        let ids: Vec<i64> = filter(&bookmarks, &f).iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_favourites_first_is_a_stable_partition() {
        let a = bookmark(1, "A", &[], 0, true);
        let b = bookmark(2, "B", &[], 0, false);
        let c = bookmark(3, "C", &[], 0, true);
        let d = bookmark(4, "D", &[], 0, false);
        let input = vec![&a, &b, &c, &d];

        let ids: Vec<i64> = favourites_first(input.clone(), true).iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 3, 2, 4]);

        let ids: Vec<i64> = favourites_first(input, false).iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }
}
