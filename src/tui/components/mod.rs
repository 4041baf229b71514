//! Reusable UI components.

pub mod legend;
pub mod popout;
pub mod side_panel;
pub mod status_bar;
