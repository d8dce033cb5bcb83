//! Toast notifications, stacked in the top-right corner newest first

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use pivot_app::state::{NotificationLevel, Notifications};
use pivot_core::truncate;

use crate::theme::{icons::IconSet, styles};

const TOAST_WIDTH: u16 = 52;
const TOAST_HEIGHT: u16 = 3;

pub struct Toasts<'a> {
    notifications: &'a Notifications,
    icons: IconSet,
}

impl<'a> Toasts<'a> {
    pub fn new(notifications: &'a Notifications, icons: IconSet) -> Self {
        Self {
            notifications,
            icons,
        }
    }

    fn icon(&self, level: NotificationLevel) -> &'static str {
        match level {
            NotificationLevel::Success => self.icons.check(),
            NotificationLevel::Info => self.icons.info(),
            NotificationLevel::Error => self.icons.cross(),
        }
    }
}

impl Widget for Toasts<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = TOAST_WIDTH.min(area.width);
        if width < 8 {
            return;
        }
        let x = area.x + area.width - width;
        let text_width = width.saturating_sub(6) as usize;

        for (i, notification) in self.notifications.iter().rev().enumerate() {
            let y = area.y + i as u16 * TOAST_HEIGHT;
            if y + TOAST_HEIGHT > area.y + area.height {
                break;
            }
            let rect = Rect::new(x, y, width, TOAST_HEIGHT);
            let style = styles::notification(notification.level);

            Clear.render(rect, buf);
            Paragraph::new(Line::from(vec![
                Span::styled(format!("{} ", self.icon(notification.level)), style),
                Span::styled(
                    truncate(&notification.message, text_width),
                    styles::text_primary(),
                ),
            ]))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(style),
            )
            .render(rect, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{buffer_text, render_widget};
    use pivot_app::config::IconMode;

    fn icons() -> IconSet {
        IconSet::new(IconMode::Unicode)
    }

    #[test]
    fn test_newest_toast_on_top() {
        let mut notifications = Notifications::default();
        notifications.push(NotificationLevel::Info, "first");
        notifications.push(NotificationLevel::Error, "Engine unreachable: refused");

        let text = buffer_text(&render_widget(Toasts::new(&notifications, icons()), 100, 12));
        let newest = text.find("Engine unreachable").expect("newest");
        let oldest = text.find("first").expect("oldest");
        assert!(newest < oldest);
        assert!(text.contains("✗ Engine unreachable"));
    }

    #[test]
    fn test_long_message_truncated() {
        let mut notifications = Notifications::default();
        notifications.push(NotificationLevel::Success, "x".repeat(200));
        let text = buffer_text(&render_widget(Toasts::new(&notifications, icons()), 100, 6));
        assert!(text.contains('…'));
    }

    #[test]
    fn test_toasts_stop_at_area_bottom() {
        let mut notifications = Notifications::default();
        for i in 0..4 {
            notifications.push(NotificationLevel::Info, format!("toast {i}"));
        }
        let text = buffer_text(&render_widget(Toasts::new(&notifications, icons()), 100, 7));
        assert!(text.contains("toast 3"));
        assert!(text.contains("toast 2"));
        assert!(!text.contains("toast 1"));
    }
}
