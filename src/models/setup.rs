use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::ItemMode;
use crate::error::ConfigError;

/// Tab selected on the details screen.
///
/// Only the `List` and `Queue` tabs are backed by a paged collection; the
/// `About` tab has no remote handler.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum DetailsOption {
    #[default]
    List,
    Queue,
    About,
}

impl DetailsOption {
    /// Resolve the item collection this tab pages through.
    pub fn item_mode(&self) -> Result<ItemMode, ConfigError> {
        match self {
            DetailsOption::List => Ok(ItemMode::List),
            DetailsOption::Queue => Ok(ItemMode::Queue),
            DetailsOption::About => Err(ConfigError::UnsupportedOption(*self)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DetailsOption::List => "list",
            DetailsOption::Queue => "queue",
            DetailsOption::About => "about",
        }
    }
}

impl From<ItemMode> for DetailsOption {
    fn from(mode: ItemMode) -> Self {
        match mode {
            ItemMode::List => DetailsOption::List,
            ItemMode::Queue => DetailsOption::Queue,
        }
    }
}

/// View configuration of a details screen: tab, search, sort and filters.
///
/// A `Setup` is a value: it is replaced as a whole, never patched in place,
/// so every reader holds a consistent snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub struct Setup {
    #[serde(default)]
    pub option: DetailsOption,
    #[serde(default)]
    pub search_query: String,
    #[serde(default)]
    pub sort_option: String,
    #[serde(default)]
    pub filters: BTreeSet<String>,
}

impl Setup {
    pub fn new(option: DetailsOption) -> Self {
        Self {
            option,
            ..Self::default()
        }
    }

    /// Copy of this setup with only the tab replaced.
    pub fn with_option(&self, option: DetailsOption) -> Self {
        Self {
            option,
            ..self.clone()
        }
    }

    pub fn with_search_query(mut self, query: impl Into<String>) -> Self {
        self.search_query = query.into();
        self
    }

    pub fn with_sort_option(mut self, sort: impl Into<String>) -> Self {
        self.sort_option = sort.into();
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filters.insert(filter.into());
        self
    }

    /// Filters in a stable order, as sent to the remote source.
    pub fn filter_list(&self) -> Vec<String> {
        self.filters.iter().cloned().collect()
    }
}
