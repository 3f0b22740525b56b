//! Chart Rendering
//!
//! Turns normalized data points into a bar chart description.
//!
//! - **ChartRenderer**: owns the one chart instance (destroy, then create)
//! - **ChartOptions**: declarative Chart.js-style options document
//! - **Notice**: transient provenance banner for estimated data
//! - [`terminal`] and [`html`]: output targets for the CLI

mod format;
pub mod html;
mod notice;
mod options;
mod renderer;
pub mod terminal;

pub use format::{abbreviate, format_brl, format_value};
pub use notice::{Notice, NoticeKind};
pub use options::{ChartOptions, Dataset, ESTIMATED_COLOR, EXACT_COLOR};
pub use renderer::{prepare, Canvas, ChartRenderer, ChartState, PLACEHOLDER_TEXT};
