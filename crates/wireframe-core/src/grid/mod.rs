//! Grid layout: pixel geometry to a fixed-pitch character grid.

mod buffer;
mod layout;
mod metrics;

pub use buffer::{Grid, GridPoint};
pub use layout::{Layout, LayoutEngine};
pub use metrics::{CharMetrics, DEFAULT_CHAR_HEIGHT, DEFAULT_CHAR_WIDTH};

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
