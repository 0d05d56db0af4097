//! Centered page layout

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::Block,
    Frame,
};

/// A `width` x `height` rectangle centered in `area`, shrunk to fit if needed
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Paint the page background and return the centered slot for the content
pub fn render_centered(f: &mut Frame, area: Rect, width: u16, height: u16, style: Style) -> Rect {
    f.render_widget(Block::default().style(style), area);
    centered(area, width, height)
}
