//! Input translation: crossterm events to game actions.
//!
//! Kept free of terminal state so the mapping from events to actions can
//! be tested directly.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::{GameConfig, matches_binding};
use crate::types::Direction;

/// What the main loop should do with one terminal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    /// Repaint everything (the terminal was resized).
    Redraw,
    /// A direction key went down (`true`) or up (`false`).
    Held(Direction, bool),
    Quit,
}

pub fn handle_event(config: &GameConfig, event: Event) -> Action {
    match event {
        Event::Key(key) => handle_key(config, key),
        Event::Resize(_, _) => Action::Redraw,
        _ => Action::Continue,
    }
}

fn handle_key(config: &GameConfig, key: KeyEvent) -> Action {
    // Repeats would re-set flags that are already set.
    if key.kind == KeyEventKind::Repeat {
        return Action::Continue;
    }
    let pressed = key.kind == KeyEventKind::Press;

    // Esc and Ctrl-C always quit; the main quit key comes from config.
    if pressed
        && (key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
            || matches_binding(&config.key_bindings.quit, &key))
    {
        return Action::Quit;
    }

    let bindings = &config.key_bindings;
    for (direction, binding) in [
        (Direction::Up, &bindings.up),
        (Direction::Down, &bindings.down),
        (Direction::Left, &bindings.left),
        (Direction::Right, &bindings.right),
    ] {
        if matches_binding(binding, &key) {
            return Action::Held(direction, pressed);
        }
    }

    Action::Continue
}
