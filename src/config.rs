//! Run configuration for ToC synthesis.
//!
//! Accepts camelCase JSON. Level styles are given either as a `levels` array
//! or, in the older shape, as `firstLevel` / `otherLevels` objects which are
//! laid over the built-in defaults for those two levels.

use crate::error::TocError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tocsmith_layout::{FontFace, FontLibrary, LayoutConfig};
use tocsmith_resource::FilesystemResourceProvider;
use tocsmith_style::{LevelStyle, StyleTable};

/// TrueType files to set the ToC in. Unset faces fall back to the other one,
/// or to the built-in Helvetica pair when neither is given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FontPaths {
    pub regular: Option<PathBuf>,
    pub bold: Option<PathBuf>,
}

impl FontPaths {
    pub fn load(&self) -> Result<FontLibrary, TocError> {
        let (regular, bold) = match (&self.regular, &self.bold) {
            (None, None) => return Ok(FontLibrary::standard()),
            (Some(r), None) => (r, r),
            (None, Some(b)) => (b, b),
            (Some(r), Some(b)) => (r, b),
        };
        let regular_face = load_face(regular)?;
        let bold_face = if bold == regular {
            regular_face.clone()
        } else {
            load_face(bold)?
        };
        Ok(FontLibrary::new(regular_face, bold_face))
    }
}

fn load_face(path: &Path) -> Result<FontFace, TocError> {
    let (provider, key) = FilesystemResourceProvider::for_file(path)
        .ok_or_else(|| TocError::FontPath(path.display().to_string()))?;
    Ok(FontFace::load_truetype(&provider, &key)?)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawTocConfig")]
pub struct TocConfig {
    /// 1-based page the ToC is inserted before. Clamped to the document.
    pub insertion_page: i64,
    /// Added to every entry's page before its link is resolved. The printed
    /// page number is not affected.
    pub page_offset: i64,
    pub levels: StyleTable,
    pub title: String,
    /// Prefix titles with hierarchical labels such as "2.1".
    pub numbering: bool,
    /// Also write the outline as PDF bookmarks.
    pub write_bookmarks: bool,
    pub fonts: FontPaths,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            insertion_page: 2,
            page_offset: 0,
            levels: StyleTable::default(),
            title: "Table of Contents".to_string(),
            numbering: true,
            write_bookmarks: false,
            fonts: FontPaths::default(),
        }
    }
}

impl TocConfig {
    pub fn from_json(json: &str) -> Result<Self, TocError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TocError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| TocError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig::default()
            .with_heading(self.title.clone())
            .with_page_offset(self.page_offset)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawTocConfig {
    #[serde(alias = "insertAtPage")]
    insertion_page: i64,
    page_offset: i64,
    levels: Option<StyleTable>,
    first_level: Option<Value>,
    other_levels: Option<Value>,
    title: String,
    numbering: bool,
    write_bookmarks: bool,
    fonts: FontPaths,
}

impl Default for RawTocConfig {
    fn default() -> Self {
        let defaults = TocConfig::default();
        Self {
            insertion_page: defaults.insertion_page,
            page_offset: defaults.page_offset,
            levels: None,
            first_level: None,
            other_levels: None,
            title: defaults.title,
            numbering: defaults.numbering,
            write_bookmarks: defaults.write_bookmarks,
            fonts: defaults.fonts,
        }
    }
}

impl TryFrom<RawTocConfig> for TocConfig {
    type Error = serde_json::Error;

    fn try_from(raw: RawTocConfig) -> Result<Self, Self::Error> {
        let levels = match raw.levels {
            Some(levels) => levels,
            None => StyleTable::new(vec![
                overlay_level(LevelStyle::first_level(), raw.first_level)?,
                overlay_level(LevelStyle::other_levels(), raw.other_levels)?,
            ]),
        };
        Ok(Self {
            insertion_page: raw.insertion_page,
            page_offset: raw.page_offset,
            levels,
            title: raw.title,
            numbering: raw.numbering,
            write_bookmarks: raw.write_bookmarks,
            fonts: raw.fonts,
        })
    }
}

/// Legacy level keys and the field each one names.
const LEVEL_FIELD_ALIASES: [(&str, &str); 1] = [("style", "numeral")];

fn overlay_level(base: LevelStyle, patch: Option<Value>) -> Result<LevelStyle, serde_json::Error> {
    let Some(Value::Object(mut patch)) = patch else {
        return Ok(base);
    };
    // Base fields serialize under their canonical names, so aliased keys
    // in the patch would otherwise collide with them.
    for (alias, field) in LEVEL_FIELD_ALIASES {
        if let Some(value) = patch.remove(alias) {
            patch.entry(field).or_insert(value);
        }
    }
    let mut merged = serde_json::to_value(base)?;
    if let Value::Object(fields) = &mut merged {
        fields.extend(patch);
    }
    serde_json::from_value(merged)
}
