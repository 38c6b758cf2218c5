//! Side panel: what it shows and how it is written into the page

mod dom;
mod view;

pub use dom::{DomPanel, ElementIds, PAUSE_LABEL, PLAY_LABEL};
pub use view::{format_thousands, PanelView};
