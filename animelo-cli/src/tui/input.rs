/// Key → intent translation. Pure, so the key map is testable without a terminal.
use animelo_core::{Intent, Side};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// `focus` is the side currently under the cursor; Enter/Space confirm it.
pub fn translate(key: KeyEvent, focus: Side) -> Option<Intent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Intent::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Intent::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Intent::MoveFocus(Side::Top)),
        KeyCode::Down | KeyCode::Char('j') => Some(Intent::MoveFocus(Side::Bottom)),
        KeyCode::Tab => Some(Intent::MoveFocus(focus.other())),
        KeyCode::Left | KeyCode::Char('h') => Some(Intent::Confirm(Side::Top)),
        KeyCode::Right | KeyCode::Char('l') => Some(Intent::Confirm(Side::Bottom)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Intent::Confirm(focus)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            assert_eq!(translate(press(code), Side::Top), Some(Intent::Quit));
        }
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(translate(ctrl_c, Side::Bottom), Some(Intent::Quit));
    }

    #[test]
    fn test_plain_c_is_ignored() {
        assert_eq!(translate(press(KeyCode::Char('c')), Side::Top), None);
    }

    #[test]
    fn test_focus_keys() {
        assert_eq!(translate(press(KeyCode::Up), Side::Bottom), Some(Intent::MoveFocus(Side::Top)));
        assert_eq!(translate(press(KeyCode::Char('k')), Side::Bottom), Some(Intent::MoveFocus(Side::Top)));
        assert_eq!(translate(press(KeyCode::Down), Side::Top), Some(Intent::MoveFocus(Side::Bottom)));
        assert_eq!(translate(press(KeyCode::Char('j')), Side::Top), Some(Intent::MoveFocus(Side::Bottom)));
        assert_eq!(translate(press(KeyCode::Tab), Side::Top), Some(Intent::MoveFocus(Side::Bottom)));
        assert_eq!(translate(press(KeyCode::Tab), Side::Bottom), Some(Intent::MoveFocus(Side::Top)));
    }

    #[test]
    fn test_direct_pick_keys_ignore_focus() {
        assert_eq!(translate(press(KeyCode::Left), Side::Bottom), Some(Intent::Confirm(Side::Top)));
        assert_eq!(translate(press(KeyCode::Char('h')), Side::Bottom), Some(Intent::Confirm(Side::Top)));
        assert_eq!(translate(press(KeyCode::Right), Side::Top), Some(Intent::Confirm(Side::Bottom)));
        assert_eq!(translate(press(KeyCode::Char('l')), Side::Top), Some(Intent::Confirm(Side::Bottom)));
    }

    #[test]
    fn test_confirm_focused() {
        assert_eq!(translate(press(KeyCode::Enter), Side::Bottom), Some(Intent::Confirm(Side::Bottom)));
        assert_eq!(translate(press(KeyCode::Char(' ')), Side::Top), Some(Intent::Confirm(Side::Top)));
    }

    #[test]
    fn test_release_events_ignored() {
        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Enter,
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(translate(release, Side::Top), None);
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(translate(press(KeyCode::Char('x')), Side::Top), None);
        assert_eq!(translate(press(KeyCode::F(1)), Side::Top), None);
    }
}
