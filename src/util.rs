use crate::consts;
use ratatui::layout::{Rect, Size};

/// Return a `Rect` of the given size centered within `area`, shrunk to fit
/// if `area` is too small.  When the leftover space is odd, the extra cell
/// goes after the rectangle.
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let width = size.width.min(area.width);
    let height = size.height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    center_rect(buffer_area, consts::DISPLAY_SIZE)
}
