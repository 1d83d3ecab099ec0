//! Picker feedback document.
//!
//! The host picker consumes one JSON document per invocation:
//! `{"items": [...]}` on stdout, rendered verbatim in the order given.
//! Items carry the action argument, auxiliary variables and an optional
//! modifier subtitle; nothing in here filters or reorders.

use std::collections::BTreeMap;

use serde::Serialize;

/// One result row.
#[derive(Debug, Clone, Serialize)]
pub struct Item {
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    arg: Option<String>,
    valid: bool,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    match_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<Icon>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    variables: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    mods: BTreeMap<&'static str, Modifier>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Icon {
    path: String,
}

/// Row variant shown while a modifier key is held.
#[derive(Debug, Clone, Serialize)]
pub struct Modifier {
    subtitle: String,
}

impl Item {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            arg: None,
            valid: true,
            match_text: None,
            icon: None,
            variables: BTreeMap::new(),
            mods: BTreeMap::new(),
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.arg = Some(arg.into());
        self
    }

    pub fn valid(mut self, valid: bool) -> Self {
        self.valid = valid;
        self
    }

    pub fn match_text(mut self, text: impl Into<String>) -> Self {
        self.match_text = Some(text.into());
        self
    }

    pub fn icon(mut self, path: impl Into<String>) -> Self {
        self.icon = Some(Icon { path: path.into() });
        self
    }

    pub fn var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn alt_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.mods.insert("alt", Modifier { subtitle: subtitle.into() });
        self
    }

    /// The text a query filter runs against: the match override when one
    /// was set, the title otherwise.
    pub fn filter_key(&self) -> &str {
        self.match_text.as_deref().unwrap_or(&self.title)
    }
}

/// The whole response document.
#[derive(Debug, Default, Serialize)]
pub struct Feedback {
    items: Vec<Item>,
}

impl Feedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = Item>) {
        self.items.extend(items);
    }

    /// Serialize to stdout. The single point where anything is printed.
    pub fn emit(&self) -> anyhow::Result<()> {
        let body = serde_json::to_string(self)?;
        println!("{body}");
        Ok(())
    }
}
