use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use itertools::Itertools;
use std::fmt::{Display, Formatter};

/// Tui key bindings.
#[derive(Debug, Clone, Copy)]
pub struct Bindings {
    pub new_target: KeyBinding,
    pub delete_result: KeyBinding,
    pub submit: KeyBinding,
    pub cancel: KeyBinding,
    pub delete_char: KeyBinding,
    pub quit: KeyBinding,
}

impl Default for Bindings {
    fn default() -> Self {
        Self {
            new_target: KeyBinding::new(KeyCode::Char('n')),
            delete_result: KeyBinding::new(KeyCode::Char('d')),
            submit: KeyBinding::new(KeyCode::Enter),
            cancel: KeyBinding::new(KeyCode::Esc),
            delete_char: KeyBinding::new(KeyCode::Backspace),
            quit: KeyBinding::new(KeyCode::Char('q')),
        }
    }
}

/// Tui key binding.
#[derive(Debug, Clone, Copy)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub fn check(&self, event: KeyEvent) -> bool {
        let code_match = match (event.code, self.code) {
            (KeyCode::Char(c1), KeyCode::Char(c2)) => c1.eq_ignore_ascii_case(&c2),
            (c1, c2) => c1 == c2,
        };
        code_match && self.modifiers == event.modifiers
    }
}

impl Display for KeyBinding {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let modifiers = &[
            self.modifiers
                .contains(KeyModifiers::SHIFT)
                .then_some("shift"),
            self.modifiers
                .contains(KeyModifiers::CONTROL)
                .then_some("ctrl"),
            self.modifiers.contains(KeyModifiers::ALT).then_some("alt"),
        ]
        .into_iter()
        .flatten()
        .join("+");
        if !modifiers.is_empty() {
            write!(f, "{modifiers}+")?;
        }
        match self.code {
            KeyCode::Enter => write!(f, "enter"),
            KeyCode::Esc => write!(f, "esc"),
            KeyCode::Backspace => write!(f, "backspace"),
            KeyCode::Char(c) => write!(f, "{c}"),
            _ => write!(f, "unknown"),
        }
    }
}

pub const CTRL_C: KeyBinding = KeyBinding {
    code: KeyCode::Char('c'),
    modifiers: KeyModifiers::CONTROL,
};
