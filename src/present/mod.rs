#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// HTML rendering of the form and its display states.
pub mod html;
/// Feedback panels derived from an evaluation result.
pub mod panels;
/// Score gauge and severity tiers.
pub mod score;
/// Terminal rendering of an evaluation result.
pub mod terminal;

pub use panels::{Panel, ResultView};
pub use score::{ScoreGauge, Tier};
