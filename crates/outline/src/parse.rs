//! JSON outline input.
//!
//! Two shapes are accepted, both as a top-level array:
//!
//! - a tree: `[{"title": "...", "to": 3, "children": [...]}]`
//! - flat rows as produced by extraction services:
//!   `[{"title": "...", "level": 1, "page": 3}]`
//!
//! Extraction output often arrives wrapped in a Markdown code fence or with
//! chatter before the array, so everything before the first `[` is dropped
//! and anything after the first complete JSON value is ignored.

use crate::error::OutlineError;
use crate::tree::{build_tree, FlatEntry};
use serde_json::Value;
use std::path::Path;
use tocsmith_types::OutlineItem;

pub fn parse_outline(text: &str) -> Result<Vec<OutlineItem>, OutlineError> {
    let cleaned = text.replace("```json", "").replace("```", "");
    let start = cleaned.find('[').ok_or(OutlineError::NotAnArray)?;

    let value = serde_json::Deserializer::from_str(&cleaned[start..])
        .into_iter::<Value>()
        .next()
        .ok_or(OutlineError::NotAnArray)??;

    let Value::Array(rows) = value else {
        return Err(OutlineError::NotAnArray);
    };

    let is_flat = rows
        .iter()
        .any(|row| row.as_object().is_some_and(|obj| obj.contains_key("level")));

    if is_flat {
        let entries: Vec<FlatEntry> = serde_json::from_value(Value::Array(rows))?;
        log::debug!("Parsed {} flat outline rows", entries.len());
        Ok(build_tree(&entries))
    } else {
        let items: Vec<OutlineItem> = serde_json::from_value(Value::Array(rows))?;
        log::debug!("Parsed outline tree with {} top-level entries", items.len());
        Ok(items)
    }
}

pub fn read_outline_file(path: impl AsRef<Path>) -> Result<Vec<OutlineItem>, OutlineError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| OutlineError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_outline(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tree_shape() {
        let json = r#"[{"title": "Intro", "to": 1},
                       {"title": "Body", "to": 3, "children": [{"title": "Detail", "to": 4}]}]"#;
        let items = parse_outline(json).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].children[0].title, "Detail");
        assert_eq!(items[1].children[0].target_page, 4);
    }

    #[test]
    fn parses_fenced_flat_rows() {
        let reply = "Here is the ToC:\n```json\n[\n  {\"title\": \"Intro\", \"level\": 1, \"page\": 1},\n  {\"title\": \"Body\", \"level\": 1, \"page\": 3},\n  {\"title\": \"Detail\", \"level\": 2, \"page\": 4}\n]\n```\nLet me know!";
        let items = parse_outline(reply).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].children.len(), 1);
        assert_eq!(items[1].children[0].target_page, 4);
    }

    #[test]
    fn empty_array_is_an_empty_outline() {
        assert!(parse_outline("[]").unwrap().is_empty());
    }

    #[test]
    fn rejects_non_arrays() {
        assert!(matches!(parse_outline("{\"title\": 1}"), Err(OutlineError::NotAnArray)));
        assert!(matches!(parse_outline("no json here"), Err(OutlineError::NotAnArray)));
        assert!(matches!(parse_outline("[{\"title\": "), Err(OutlineError::Json(_))));
    }
}
