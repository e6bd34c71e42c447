//! Rebuilding an outline tree from flat, level-tagged rows.
//!
//! Extraction services report a ToC as a list of `{title, level, page}` rows in
//! reading order. A row becomes a child of the nearest preceding row with a
//! strictly smaller level, or a root when there is none.

use serde::{Deserialize, Serialize};
use tocsmith_types::OutlineItem;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_level")]
    pub level: i64,
    #[serde(default = "default_page", alias = "to", alias = "targetPage")]
    pub page: i64,
}

fn default_level() -> i64 {
    1
}

fn default_page() -> i64 {
    1
}

impl FlatEntry {
    pub fn new(title: impl Into<String>, level: i64, page: i64) -> Self {
        Self {
            title: title.into(),
            level,
            page,
        }
    }
}

pub fn build_tree(entries: &[FlatEntry]) -> Vec<OutlineItem> {
    // Stack of (level, path of child indices from the root) for open ancestors.
    let mut roots: Vec<OutlineItem> = Vec::new();
    let mut stack: Vec<(i64, Vec<usize>)> = Vec::new();

    for entry in entries {
        while stack.last().is_some_and(|(level, _)| *level >= entry.level) {
            stack.pop();
        }

        let item = OutlineItem::new(entry.title.clone(), entry.page);
        let path = match stack.last() {
            None => {
                roots.push(item);
                vec![roots.len() - 1]
            }
            Some((_, parent_path)) => match node_at(&mut roots, parent_path) {
                Some(parent) => {
                    parent.children.push(item);
                    let mut path = parent_path.clone();
                    path.push(parent.children.len() - 1);
                    path
                }
                None => {
                    roots.push(item);
                    vec![roots.len() - 1]
                }
            },
        };
        stack.push((entry.level, path));
    }

    roots
}

fn node_at<'a>(roots: &'a mut [OutlineItem], path: &[usize]) -> Option<&'a mut OutlineItem> {
    let (first, rest) = path.split_first()?;
    let mut node = roots.get_mut(*first)?;
    for &idx in rest {
        node = node.children.get_mut(idx)?;
    }
    Some(node)
}
