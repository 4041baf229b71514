//! Main UI rendering coordinator.

use ratatui::Frame;

use super::app::App;
use super::components::popout;
use super::tabs::map;

/// Renders the entire application UI.
///
/// The map tab always renders; the detail popout overlays it (and blocks
/// its interaction) while a member is open.
pub fn render(frame: &mut Frame, app: &mut App) {
    let popout_open = app.selection.selected_member().is_some();
    map::render(frame, app, popout_open);

    if popout_open {
        popout::render(frame, app);
    }
}
