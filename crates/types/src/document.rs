use crate::geometry::Rect;
use serde::{Deserialize, Deserializer, Serialize};

fn default_target_page() -> i64 {
    1
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One entry of a table of contents, possibly with nested entries.
///
/// `target_page` is a 1-based page number in the *original* source document.
/// Values below 1 are carried through untouched; consumers clamp them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default = "default_target_page", alias = "to", alias = "page")]
    pub target_page: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<OutlineItem>,
    /// Numbering label computed by the numbering pass, e.g. `"2.1"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_prefix: Option<String>,
}

impl Default for OutlineItem {
    fn default() -> Self {
        Self {
            title: String::new(),
            target_page: default_target_page(),
            children: Vec::new(),
            display_prefix: None,
        }
    }
}

impl OutlineItem {
    pub fn new(title: impl Into<String>, target_page: i64) -> Self {
        Self {
            title: title.into(),
            target_page,
            ..Default::default()
        }
    }

    pub fn with_children(mut self, children: Vec<OutlineItem>) -> Self {
        self.children = children;
        self
    }

    /// The text drawn for this entry: prefix and title joined by a space, trimmed.
    pub fn display_title(&self) -> String {
        match &self.display_prefix {
            Some(prefix) => format!("{} {}", prefix, self.title).trim().to_string(),
            None => self.title.trim().to_string(),
        }
    }

    /// Number of entries in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(OutlineItem::count).sum::<usize>()
    }
}

/// Total number of entries in a forest of outline items.
pub fn count_items(items: &[OutlineItem]) -> usize {
    items.iter().map(OutlineItem::count).sum()
}

/// A link annotation whose clickable area is known but whose destination page
/// object does not exist yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingLink {
    /// Index of the generated ToC page (0 = first ToC page) that holds the link.
    pub toc_page: usize,
    /// Clickable area in that page's coordinate space.
    pub rect: Rect,
    /// 1-based page number in the original document, page offset already applied.
    pub target_page: i64,
}
