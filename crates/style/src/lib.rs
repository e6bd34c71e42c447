pub mod level;
pub mod numeral;

pub use level::{LevelStyle, StyleTable};
pub use numeral::NumeralStyle;
