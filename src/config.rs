use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

use crate::types::{Color, NamedColor};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub key_bindings: KeyBindings,
    pub colors: ColorScheme,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
    pub quit: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorScheme {
    pub background: Color,
    pub wall: Color,
    pub player: Color,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            key_bindings: KeyBindings {
                up: "Up".into(),
                down: "Down".into(),
                left: "Left".into(),
                right: "Right".into(),
                quit: "q".into(),
            },
            colors: ColorScheme {
                background: Color::Named(NamedColor::Black),
                wall: Color::Named(NamedColor::Red),
                player: Color::Named(NamedColor::White),
            },
        }
    }
}

impl GameConfig {
    pub fn load() -> Self {
        let config_path = Self::config_path();
        match std::fs::read_to_string(&config_path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: invalid config ({e}), using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    fn config_path() -> std::path::PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        let mut path = std::path::PathBuf::from(home);
        path.push(".config");
        path.push("term-tanks");
        path.push("config.json");
        path
    }
}

/// Check whether a crossterm `KeyEvent` matches a binding string from
/// config.
pub fn matches_binding(binding: &str, event: &KeyEvent) -> bool {
    // Ctrl- prefix
    if let Some(rest) = binding.strip_prefix("Ctrl-") {
        if !event.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        return match rest.chars().next() {
            Some(c) => event.code == KeyCode::Char(c),
            None => false,
        };
    }

    // Plain bindings must not fire while Ctrl or Alt is held.
    if event.modifiers.contains(KeyModifiers::CONTROL)
        || event.modifiers.contains(KeyModifiers::ALT)
    {
        return false;
    }

    match binding {
        "Up" => event.code == KeyCode::Up,
        "Down" => event.code == KeyCode::Down,
        "Left" => event.code == KeyCode::Left,
        "Right" => event.code == KeyCode::Right,
        "Esc" => event.code == KeyCode::Esc,
        "Space" => event.code == KeyCode::Char(' '),
        s => match s.chars().next() {
            Some(c) => event.code == KeyCode::Char(c),
            None => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn arrow_and_char_bindings_match() {
        assert!(matches_binding("Up", &key(KeyCode::Up, KeyModifiers::NONE)));
        assert!(matches_binding(
            "q",
            &key(KeyCode::Char('q'), KeyModifiers::NONE),
        ));
        assert!(!matches_binding(
            "Up",
            &key(KeyCode::Down, KeyModifiers::NONE),
        ));
    }

    #[test]
    fn ctrl_bindings_require_the_modifier() {
        assert!(matches_binding(
            "Ctrl-c",
            &key(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ));
        assert!(!matches_binding(
            "Ctrl-c",
            &key(KeyCode::Char('c'), KeyModifiers::NONE),
        ));
    }

    #[test]
    fn plain_bindings_ignore_modified_keys() {
        assert!(!matches_binding(
            "q",
            &key(KeyCode::Char('q'), KeyModifiers::ALT),
        ));
        assert!(!matches_binding(
            "Up",
            &key(KeyCode::Up, KeyModifiers::CONTROL),
        ));
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let json = serde_json::to_string(&GameConfig::default()).unwrap();
        let config: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.key_bindings.quit, "q");
        assert_eq!(config.colors.wall, Color::Named(NamedColor::Red));
    }
}
