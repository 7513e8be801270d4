use sfml::window::{Event, Key, mouse};

use crate::components::Session;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Flap,
    Restart,
    Quit,
}

/// Maps a window event to a game action for the current session state.
/// Events with no meaning in that state map to `None`.
pub fn map_event(event: &Event, session: Session) -> Option<Action> {
    match (event, session) {
        (Event::Closed, _) => Some(Action::Quit),

        (Event::KeyPressed { code: Key::Space, .. }, Session::Active)
        | (
            Event::MouseButtonPressed {
                button: mouse::Button::Left,
                ..
            },
            Session::Active,
        ) => Some(Action::Flap),

        (Event::KeyPressed { .. } | Event::MouseButtonPressed { .. }, Session::GameOver) => {
            Some(Action::Restart)
        }

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sfml::window::Scancode;

    fn key(code: Key, scan: Scancode) -> Event {
        Event::KeyPressed {
            code,
            scan,
            alt: false,
            ctrl: false,
            shift: false,
            system: false,
        }
    }

    fn click(button: mouse::Button) -> Event {
        Event::MouseButtonPressed { button, x: 120, y: 300 }
    }

    #[test]
    fn test_close_quits_in_every_state() {
        assert_eq!(map_event(&Event::Closed, Session::Active), Some(Action::Quit));
        assert_eq!(
            map_event(&Event::Closed, Session::GameOver),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_left_click_flaps_while_active() {
        assert_eq!(
            map_event(&click(mouse::Button::Left), Session::Active),
            Some(Action::Flap)
        );
    }

    #[test]
    fn test_space_flaps_while_active() {
        assert_eq!(
            map_event(&key(Key::Space, Scancode::Space), Session::Active),
            Some(Action::Flap)
        );
    }

    #[test]
    fn test_other_keys_do_nothing_while_active() {
        for event in [
            key(Key::Enter, Scancode::Enter),
            key(Key::Up, Scancode::Up),
            key(Key::A, Scancode::A),
        ] {
            assert_eq!(map_event(&event, Session::Active), None);
        }
    }

    #[test]
    fn test_any_key_restarts_after_game_over() {
        for event in [
            key(Key::Space, Scancode::Space),
            key(Key::Enter, Scancode::Enter),
            key(Key::A, Scancode::A),
        ] {
            assert_eq!(map_event(&event, Session::GameOver), Some(Action::Restart));
        }
    }

    #[test]
    fn test_other_buttons_do_nothing_while_active() {
        assert_eq!(map_event(&click(mouse::Button::Right), Session::Active), None);
        assert_eq!(map_event(&click(mouse::Button::Middle), Session::Active), None);
    }

    #[test]
    fn test_any_click_restarts_after_game_over() {
        for button in [
            mouse::Button::Left,
            mouse::Button::Right,
            mouse::Button::Middle,
        ] {
            assert_eq!(
                map_event(&click(button), Session::GameOver),
                Some(Action::Restart)
            );
        }
    }

    #[test]
    fn test_unrelated_events_are_ignored() {
        for event in [Event::LostFocus, Event::GainedFocus, Event::MouseEntered] {
            assert_eq!(map_event(&event, Session::Active), None);
            assert_eq!(map_event(&event, Session::GameOver), None);
        }
        assert_eq!(
            map_event(&Event::MouseMoved { x: 10, y: 10 }, Session::GameOver),
            None
        );
    }
}
