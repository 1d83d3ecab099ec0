//! Collection hierarchy resolution.
//!
//! The remote service serves the hierarchy as two flat arrays: roots only
//! (`parent_id == 0`) and all non-roots. Paths and depths are derived here
//! on every pass, never stored. The input comes from an external service
//! with no acyclicity guarantee, so every walk carries a depth ceiling;
//! subtrees that exceed it are logged and abandoned rather than recursed
//! into forever.

use std::collections::HashMap;

use crate::models::Collection;

/// Hard ceiling on hierarchy depth, far above any realistic nesting.
pub const MAX_DEPTH: usize = 64;

/// How to label collections for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStyle {
    /// Raw titles with per-depth indentation and a branch marker.
    Tree,
    /// Full slash-joined ancestor paths, flattened to one level.
    Paths,
}

/// One collection prepared for display.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionEntry {
    pub id: i64,
    /// Display label in the requested style.
    pub label: String,
    /// 1 for top-level collections, +1 per generation.
    pub depth: usize,
    /// Full slash-joined ancestor path, independent of style.
    pub path: String,
    /// Lowercased path words plus every descendant title, so a parent
    /// matches filters naming any collection beneath it.
    pub match_text: String,
    pub cover_url: Option<String>,
}

/// Resolve every reachable collection id to its full ancestor path.
pub fn build_path_index(top: &[Collection], sub: &[Collection]) -> HashMap<i64, String> {
    let mut index = HashMap::new();
    let mut stack = Vec::new();
    for root in top.iter().filter(|c| c.parent_id == 0) {
        index_subtree(root, sub, &mut stack, &mut index);
    }
    index
}

fn index_subtree(
    node: &Collection,
    sub: &[Collection],
    stack: &mut Vec<String>,
    index: &mut HashMap<i64, String>,
) {
    if stack.len() >= MAX_DEPTH {
        tracing::warn!(id = node.id, max = MAX_DEPTH, "collection hierarchy too deep, abandoning subtree");
        return;
    }
    stack.push(node.title.clone());
    index.insert(node.id, stack.join("/"));
    for child in children(sub, node.id) {
        index_subtree(child, sub, stack, index);
    }
    stack.pop();
}

/// Flatten the hierarchy into display order (depth-first, children under
/// their parent), labelled in the requested style.
pub fn render(top: &[Collection], sub: &[Collection], style: RenderStyle) -> Vec<CollectionEntry> {
    let mut entries = Vec::new();
    let mut stack = Vec::new();
    for root in top.iter().filter(|c| c.parent_id == 0) {
        render_subtree(root, sub, style, &mut stack, &mut entries);
    }
    entries
}

fn render_subtree(
    node: &Collection,
    sub: &[Collection],
    style: RenderStyle,
    stack: &mut Vec<String>,
    entries: &mut Vec<CollectionEntry>,
) {
    if stack.len() >= MAX_DEPTH {
        tracing::warn!(id = node.id, max = MAX_DEPTH, "collection hierarchy too deep, abandoning subtree");
        return;
    }
    stack.push(node.title.clone());

    let depth = stack.len();
    let path = stack.join("/");
    let label = match style {
        RenderStyle::Paths => path.clone(),
        RenderStyle::Tree => tree_label(&node.title, depth),
    };

    let mut match_text = stack.join(" ").to_lowercase();
    let mut descendants = String::new();
    descendant_titles(sub, node.id, 0, &mut descendants);
    if !descendants.is_empty() {
        match_text.push(' ');
        match_text.push_str(descendants.trim_end());
    }

    entries.push(CollectionEntry {
        id: node.id,
        label,
        depth,
        path,
        match_text,
        cover_url: node.cover_url.clone(),
    });

    for child in children(sub, node.id) {
        render_subtree(child, sub, style, stack, entries);
    }
    stack.pop();
}

fn tree_label(title: &str, depth: usize) -> String {
    if depth <= 1 {
        return title.to_string();
    }
    let mut label = "\t".repeat(depth - 2);
    label.push_str("   ↳ ");
    label.push_str(title);
    label
}

fn children<'a>(sub: &'a [Collection], parent_id: i64) -> impl Iterator<Item = &'a Collection> {
    sub.iter().filter(move |c| c.parent_id == parent_id)
}

/// Lowercased titles of the whole subtree below `parent_id`, space-joined.
fn descendant_titles(sub: &[Collection], parent_id: i64, depth: usize, out: &mut String) {
    if depth >= MAX_DEPTH {
        tracing::warn!(id = parent_id, max = MAX_DEPTH, "collection hierarchy too deep, abandoning subtree");
        return;
    }
    for child in children(sub, parent_id) {
        out.push_str(&child.title.to_lowercase());
        out.push(' ');
        descendant_titles(sub, child.id, depth + 1, out);
    }
}
