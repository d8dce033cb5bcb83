//! Terminal-independent key events.
//!
//! The TUI converts crossterm key events into [`InputKey`] at its boundary so
//! the handler (and headless consumers) never depend on crossterm.

/// A key press as seen by the update function
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKey {
    /// Printable character, including space and shifted symbols
    Char(char),
    /// Character pressed with Ctrl
    CharCtrl(char),

    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,

    Enter,
    Esc,
    Tab,
    /// Shift+Tab
    BackTab,
    Backspace,
    Delete,
}

impl InputKey {
    /// `1`..`9` as a zero-based index
    pub fn digit_index(&self) -> Option<usize> {
        match self {
            InputKey::Char(c @ '1'..='9') => c.to_digit(10).map(|d| d as usize - 1),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_differs_from_plain() {
        assert_ne!(InputKey::CharCtrl('c'), InputKey::Char('c'));
    }

    #[test]
    fn test_digit_index() {
        assert_eq!(InputKey::Char('1').digit_index(), Some(0));
        assert_eq!(InputKey::Char('4').digit_index(), Some(3));
        assert_eq!(InputKey::Char('0').digit_index(), None);
        assert_eq!(InputKey::CharCtrl('1').digit_index(), None);
    }
}
