//! Hierarchical numbering of outline entries.
//!
//! Labels are built per sibling position. When a level inherits its parent,
//! the parent part is the chain of raw decimal ordinals joined by the level's
//! separator, so a roman second level under the second chapter reads
//! `"2.III"`, never `"II.III"`.

use tocsmith_style::{LevelStyle, NumeralStyle, StyleTable};
use tocsmith_types::OutlineItem;

const CHINESE_DIGITS: [&str; 11] = ["零", "一", "二", "三", "四", "五", "六", "七", "八", "九", "十"];

const ROMAN_VALUES: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Renders `ordinal` in the given numeral system.
pub fn generate_label(ordinal: u32, style: NumeralStyle) -> String {
    match style {
        NumeralStyle::Decimal => ordinal.to_string(),
        NumeralStyle::UpperAlpha => to_upper_alpha(ordinal),
        NumeralStyle::UpperRoman => to_upper_roman(ordinal),
        NumeralStyle::SimplifiedChinese => CHINESE_DIGITS
            .get(ordinal as usize)
            .map(|s| s.to_string())
            .unwrap_or_else(|| ordinal.to_string()),
    }
}

/// 1 -> "A", 26 -> "Z", 27 -> "AA", 52 -> "AZ", 53 -> "BA".
fn to_upper_alpha(n: u32) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut letters = Vec::new();
    let mut num = n;
    while num > 0 {
        num -= 1;
        letters.push(b'A' + (num % 26) as u8);
        num /= 26;
    }
    letters.iter().rev().map(|&b| b as char).collect()
}

fn to_upper_roman(n: u32) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut num = n;
    let mut result = String::new();
    for &(val, sym) in &ROMAN_VALUES {
        while num >= val {
            result.push_str(sym);
            num -= val;
        }
    }
    result
}

fn core_label(ordinal: u32, parent_path: &[u32], style: &LevelStyle) -> String {
    let own = generate_label(ordinal, style.numeral);
    if style.inherit_parent && !parent_path.is_empty() {
        let parent = parent_path
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(&style.separator);
        format!("{}{}{}", parent, style.separator, own)
    } else {
        own
    }
}

/// Returns a copy of `items` with `display_prefix` set on every entry.
///
/// The caller's tree is left untouched.
pub fn apply_numbering(items: &[OutlineItem], styles: &StyleTable) -> Vec<OutlineItem> {
    number_level(items, styles, &[], 0)
}

fn number_level(
    items: &[OutlineItem],
    styles: &StyleTable,
    parent_path: &[u32],
    depth: usize,
) -> Vec<OutlineItem> {
    let style = styles.style_for(depth);
    items
        .iter()
        .zip(1u32..)
        .map(|(item, ordinal)| {
            let label = core_label(ordinal, parent_path, style);
            let mut path = parent_path.to_vec();
            path.push(ordinal);
            OutlineItem {
                title: item.title.clone(),
                target_page: item.target_page,
                display_prefix: Some(format!("{}{}{}", style.prefix, label, style.suffix)),
                children: number_level(&item.children, styles, &path, depth + 1),
            }
        })
        .collect()
}

/// Returns a copy of `items` with every `display_prefix` cleared.
pub fn strip_numbering(items: &[OutlineItem]) -> Vec<OutlineItem> {
    items
        .iter()
        .map(|item| OutlineItem {
            title: item.title.clone(),
            target_page: item.target_page,
            display_prefix: None,
            children: strip_numbering(&item.children),
        })
        .collect()
}
