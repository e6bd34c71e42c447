//! Numeral systems available for ToC entry labels.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
#[derive(Default)]
pub enum NumeralStyle {
    #[default]
    Decimal,
    #[serde(alias = "roman_upper")]
    UpperRoman,
    #[serde(alias = "alpha_upper")]
    UpperAlpha,
    #[serde(alias = "chinese_simple")]
    SimplifiedChinese,
}
