use serde::{Deserialize, Serialize};

use super::ItemMode;

/// The list a details screen is showing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListEntity {
    pub id: String,
    /// Collection type the list was opened with
    #[serde(default, rename = "type")]
    pub mode: ItemMode,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    /// Item tags sorted alphabetically, offered by the filter dialog
    #[serde(default)]
    pub item_tags_by_alpha: Option<Vec<String>>,
}

impl ListEntity {
    pub fn new(id: impl Into<String>, mode: ItemMode) -> Self {
        Self {
            id: id.into(),
            mode,
            title: String::new(),
            url: None,
            item_tags_by_alpha: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.item_tags_by_alpha = Some(tags);
        self
    }

    /// Tags for the filter dialog; empty when the server sent none.
    pub fn filter_tags(&self) -> Vec<String> {
        self.item_tags_by_alpha.clone().unwrap_or_default()
    }

    /// Plain-text content used when sharing the list.
    pub fn share_text(&self) -> String {
        match &self.url {
            Some(url) => format!("{}\n{}", self.title, url),
            None => self.title.clone(),
        }
    }
}
