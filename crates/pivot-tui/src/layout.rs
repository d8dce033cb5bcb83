//! Screen layout definitions for the TUI

use ratatui::layout::{Constraint, Layout, Rect};

/// Rows taken by the header (border + stats row + tab row + border)
pub const HEADER_HEIGHT: u16 = 4;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title, stats and tab bar
    pub header: Rect,

    /// Active tab
    pub content: Rect,

    /// Connection, sync time and key hints
    pub status: Rect,
}

/// Split the screen into header, content and a one-line status bar
pub fn create(area: Rect) -> ScreenAreas {
    let chunks = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .split(area);

    ScreenAreas {
        header: chunks[0],
        content: chunks[1],
        status: chunks[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_layout() {
        let layout = create(Rect::new(0, 0, 80, 24));

        assert_eq!(layout.header.height, HEADER_HEIGHT);
        assert_eq!(layout.content.y, HEADER_HEIGHT);
        assert_eq!(layout.content.height, 24 - HEADER_HEIGHT - 1);
        assert_eq!(layout.status.y, 23);
        assert_eq!(layout.status.height, 1);
    }

    #[test]
    fn test_layout_spans_full_width() {
        let layout = create(Rect::new(0, 0, 120, 40));
        assert_eq!(layout.header.width, 120);
        assert_eq!(layout.content.width, 120);
        assert_eq!(layout.status.width, 120);
    }
}
