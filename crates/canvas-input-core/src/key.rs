//! Symbolic keyboard keys.
//!
//! A [`Key`] is the layout-independent identity of a physical key. Platform
//! adapters translate their native key codes into `Key` values before handing
//! them to the listener; anything they cannot translate becomes
//! [`Key::Unknown`] carrying the raw code, so that press and release of an
//! unmapped key still pair up.

use std::fmt;

/// Keyboard key identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[rustfmt::skip]
pub enum Key {
    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Numbers (main keyboard)
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Function keys
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    F13, F14, F15, F16, F17, F18, F19, F20, F21, F22, F23, F24,

    // Navigation
    ArrowUp, ArrowDown, ArrowLeft, ArrowRight,
    Home, End, PageUp, PageDown,

    // Editing
    Backspace, Delete, Insert,
    Enter, Tab,

    // Whitespace
    Space,

    // Modifiers
    ShiftLeft, ShiftRight,
    ControlLeft, ControlRight,
    AltLeft, AltRight,
    MetaLeft, MetaRight,

    // Punctuation and symbols
    Minus, Equal,
    BracketLeft, BracketRight, Backslash,
    Semicolon, Quote,
    Comma, Period, Slash,
    Grave,

    // Control
    Escape,
    CapsLock, NumLock, ScrollLock,
    PrintScreen, Pause,

    // Numpad
    Numpad0, Numpad1, Numpad2, Numpad3, Numpad4,
    Numpad5, Numpad6, Numpad7, Numpad8, Numpad9,
    NumpadAdd, NumpadSubtract, NumpadMultiply, NumpadDivide,
    NumpadDecimal, NumpadEnter,

    /// A key the platform adapter could not map, with its raw code.
    Unknown(u32),
}

impl Key {
    /// Letter keys in alphabetical order.
    #[rustfmt::skip]
    pub const LETTERS: [Key; 26] = [
        Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G,
        Key::H, Key::I, Key::J, Key::K, Key::L, Key::M, Key::N,
        Key::O, Key::P, Key::Q, Key::R, Key::S, Key::T, Key::U,
        Key::V, Key::W, Key::X, Key::Y, Key::Z,
    ];

    /// Main-keyboard digit keys, `0` through `9`.
    #[rustfmt::skip]
    pub const DIGITS: [Key; 10] = [
        Key::Digit0, Key::Digit1, Key::Digit2, Key::Digit3, Key::Digit4,
        Key::Digit5, Key::Digit6, Key::Digit7, Key::Digit8, Key::Digit9,
    ];

    /// Check if this is a modifier key.
    pub fn is_modifier(&self) -> bool {
        matches!(
            self,
            Key::ShiftLeft
                | Key::ShiftRight
                | Key::ControlLeft
                | Key::ControlRight
                | Key::AltLeft
                | Key::AltRight
                | Key::MetaLeft
                | Key::MetaRight
        )
    }

    /// Check if this is a navigation key.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Key::ArrowUp
                | Key::ArrowDown
                | Key::ArrowLeft
                | Key::ArrowRight
                | Key::Home
                | Key::End
                | Key::PageUp
                | Key::PageDown
        )
    }

    /// Function keys, `F1` through `F24`.
    #[rustfmt::skip]
    pub const FUNCTION_KEYS: [Key; 24] = [
        Key::F1, Key::F2, Key::F3, Key::F4, Key::F5, Key::F6,
        Key::F7, Key::F8, Key::F9, Key::F10, Key::F11, Key::F12,
        Key::F13, Key::F14, Key::F15, Key::F16, Key::F17, Key::F18,
        Key::F19, Key::F20, Key::F21, Key::F22, Key::F23, Key::F24,
    ];

    /// Check if this is a function key.
    pub fn is_function_key(&self) -> bool {
        Self::FUNCTION_KEYS.contains(self)
    }

    /// Check if this is a letter key.
    pub fn is_letter(&self) -> bool {
        Self::LETTERS.contains(self)
    }

    /// Check if this is a digit key (main keyboard, not numpad).
    pub fn is_digit(&self) -> bool {
        Self::DIGITS.contains(self)
    }

    /// Check if this is the unmapped-key sentinel.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Key::Unknown(_))
    }

    /// The letter or digit this key produces without modifiers, if any.
    pub fn to_char(&self) -> Option<char> {
        if let Some(i) = Self::LETTERS.iter().position(|k| k == self) {
            return Some((b'a' + i as u8) as char);
        }
        if let Some(i) = Self::DIGITS.iter().position(|k| k == self) {
            return Some((b'0' + i as u8) as char);
        }
        match self {
            Key::Space => Some(' '),
            Key::Minus => Some('-'),
            Key::Equal => Some('='),
            Key::BracketLeft => Some('['),
            Key::BracketRight => Some(']'),
            Key::Backslash => Some('\\'),
            Key::Semicolon => Some(';'),
            Key::Quote => Some('\''),
            Key::Comma => Some(','),
            Key::Period => Some('.'),
            Key::Slash => Some('/'),
            Key::Grave => Some('`'),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Unknown(code) => write!(f, "Unknown({code:#x})"),
            other => match other.to_char() {
                Some(c) if c.is_ascii_alphanumeric() => write!(f, "{}", c.to_ascii_uppercase()),
                _ => write!(f, "{other:?}"),
            },
        }
    }
}
