use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Which collection of a list an item belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemMode {
    /// Items already accepted into the list (default)
    #[default]
    List,
    /// Items proposed for the list and waiting in the queue
    Queue,
}

impl ItemMode {
    /// Short label used in logs and store keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemMode::List => "list",
            ItemMode::Queue => "queue",
        }
    }
}

impl fmt::Display for ItemMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Media references attached to an item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ItemImages {
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
}

/// A single entry of a list as returned by the server.
///
/// Items are treated as immutable values: the controller never edits one in
/// place, it swaps in the server-confirmed copy instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    /// Stable server identifier
    pub id: String,
    /// Identifier of the list that owns this item
    pub list_id: String,
    /// Collection the item lives in
    #[serde(default, rename = "type")]
    pub mode: ItemMode,
    /// Display title
    #[serde(default)]
    pub title: String,
    /// Optional link to the item's source
    #[serde(default)]
    pub url: Option<String>,
    /// Reaction counts keyed by emoji alias
    #[serde(default)]
    pub reactions: BTreeMap<String, u32>,
    /// Optional media reference
    #[serde(default)]
    pub images: Option<ItemImages>,
    /// 1-based display position, assigned when projected for rendering.
    /// Never persisted and never sent by the server.
    #[serde(skip)]
    pub position: Option<u64>,
}

impl Item {
    /// Create a bare item with no reactions or media.
    pub fn new(id: impl Into<String>, list_id: impl Into<String>, mode: ItemMode) -> Self {
        Self {
            id: id.into(),
            list_id: list_id.into(),
            mode,
            title: String::new(),
            url: None,
            reactions: BTreeMap::new(),
            images: None,
            position: None,
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set a reaction count.
    pub fn with_reaction(mut self, alias: impl Into<String>, count: u32) -> Self {
        self.reactions.insert(alias.into(), count);
        self
    }

    /// Number of reactions recorded for `alias`.
    pub fn reaction_count(&self, alias: &str) -> u32 {
        self.reactions.get(alias).copied().unwrap_or(0)
    }

    /// Large image reference, if any.
    pub fn large_image(&self) -> Option<&str> {
        self.images.as_ref().and_then(|i| i.large.as_deref())
    }

    /// Plain-text content used when sharing this item.
    pub fn share_text(&self) -> String {
        match &self.url {
            Some(url) => format!("{}\n{}", self.title, url),
            None => self.title.clone(),
        }
    }
}
