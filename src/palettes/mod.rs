//! Classification of colors and derivation of secondary palettes

pub mod classify;
pub mod generate;

pub use classify::{classify, group_colors, ColorGroups, ColorTags};
pub use generate::{
    generate_palettes, generate_palettes_with_extended, GeneratedPalettes, UiPalette,
};
