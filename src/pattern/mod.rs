//! Decorative pattern rendering from palette colors

pub mod history;
pub mod render;

pub use history::PatternHistory;
pub use render::{render_pattern, PatternKind, PatternSettings, RasterTarget};
