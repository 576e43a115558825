//! Key translation from winit.
//!
//! Physical key codes are preferred for key identity because they do not
//! change with the keyboard layout. Logical keys and text are used for typed
//! input.
//!
//! winit codes with no [`Key`] variant become [`Key::Unknown`] with a code
//! derived from the winit variant name, so every unmapped key keeps its own
//! identity. Those codes have [`UNMAPPED_CODE_FLAG`] set, which keeps them
//! apart from Unicode code points and platform native codes.

use std::fmt::{self, Write as _};

use winit::keyboard::{Key as WinitKey, KeyCode, NamedKey, NativeKeyCode, PhysicalKey};

use canvas_input_core::Key;

/// Converts a winit physical key to a canvas-input Key.
///
/// Keys winit could not identify keep their native code in
/// [`Key::Unknown`], so a press and release of the same unidentified key
/// still pair up.
pub fn from_winit_physical_key(physical: &PhysicalKey) -> Key {
    match physical {
        PhysicalKey::Code(code) => from_winit_key_code(code),
        PhysicalKey::Unidentified(native) => Key::Unknown(native_code(native)),
    }
}

/// Raw value of a native key code, 0 when the platform gave none.
fn native_code(native: &NativeKeyCode) -> u32 {
    match native {
        NativeKeyCode::Unidentified => 0,
        NativeKeyCode::Android(code) => *code,
        NativeKeyCode::MacOS(code) => u32::from(*code),
        NativeKeyCode::Windows(code) => u32::from(*code),
        NativeKeyCode::Xkb(code) => *code,
    }
}

/// Converts a winit key code to a canvas-input Key.
pub fn from_winit_key_code(code: &KeyCode) -> Key {
    match code {
        // Letters
        KeyCode::KeyA => Key::A,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyH => Key::H,
        KeyCode::KeyI => Key::I,
        KeyCode::KeyJ => Key::J,
        KeyCode::KeyK => Key::K,
        KeyCode::KeyL => Key::L,
        KeyCode::KeyM => Key::M,
        KeyCode::KeyN => Key::N,
        KeyCode::KeyO => Key::O,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyT => Key::T,
        KeyCode::KeyU => Key::U,
        KeyCode::KeyV => Key::V,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyZ => Key::Z,

        // Digits
        KeyCode::Digit0 => Key::Digit0,
        KeyCode::Digit1 => Key::Digit1,
        KeyCode::Digit2 => Key::Digit2,
        KeyCode::Digit3 => Key::Digit3,
        KeyCode::Digit4 => Key::Digit4,
        KeyCode::Digit5 => Key::Digit5,
        KeyCode::Digit6 => Key::Digit6,
        KeyCode::Digit7 => Key::Digit7,
        KeyCode::Digit8 => Key::Digit8,
        KeyCode::Digit9 => Key::Digit9,

        // Function keys
        KeyCode::F1 => Key::F1,
        KeyCode::F2 => Key::F2,
        KeyCode::F3 => Key::F3,
        KeyCode::F4 => Key::F4,
        KeyCode::F5 => Key::F5,
        KeyCode::F6 => Key::F6,
        KeyCode::F7 => Key::F7,
        KeyCode::F8 => Key::F8,
        KeyCode::F9 => Key::F9,
        KeyCode::F10 => Key::F10,
        KeyCode::F11 => Key::F11,
        KeyCode::F12 => Key::F12,
        KeyCode::F13 => Key::F13,
        KeyCode::F14 => Key::F14,
        KeyCode::F15 => Key::F15,
        KeyCode::F16 => Key::F16,
        KeyCode::F17 => Key::F17,
        KeyCode::F18 => Key::F18,
        KeyCode::F19 => Key::F19,
        KeyCode::F20 => Key::F20,
        KeyCode::F21 => Key::F21,
        KeyCode::F22 => Key::F22,
        KeyCode::F23 => Key::F23,
        KeyCode::F24 => Key::F24,

        // Navigation
        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,

        // Editing
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Insert => Key::Insert,
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Space => Key::Space,
        KeyCode::Escape => Key::Escape,

        // Modifiers
        KeyCode::ShiftLeft => Key::ShiftLeft,
        KeyCode::ShiftRight => Key::ShiftRight,
        KeyCode::ControlLeft => Key::ControlLeft,
        KeyCode::ControlRight => Key::ControlRight,
        KeyCode::AltLeft => Key::AltLeft,
        KeyCode::AltRight => Key::AltRight,
        KeyCode::SuperLeft => Key::MetaLeft,
        KeyCode::SuperRight => Key::MetaRight,

        // Lock keys
        KeyCode::CapsLock => Key::CapsLock,
        KeyCode::NumLock => Key::NumLock,
        KeyCode::ScrollLock => Key::ScrollLock,

        // Punctuation
        KeyCode::Minus => Key::Minus,
        KeyCode::Equal => Key::Equal,
        KeyCode::BracketLeft => Key::BracketLeft,
        KeyCode::BracketRight => Key::BracketRight,
        KeyCode::Backslash => Key::Backslash,
        KeyCode::Semicolon => Key::Semicolon,
        KeyCode::Quote => Key::Quote,
        KeyCode::Comma => Key::Comma,
        KeyCode::Period => Key::Period,
        KeyCode::Slash => Key::Slash,
        KeyCode::Backquote => Key::Grave,

        // System
        KeyCode::PrintScreen => Key::PrintScreen,
        KeyCode::Pause => Key::Pause,

        // Numpad
        KeyCode::Numpad0 => Key::Numpad0,
        KeyCode::Numpad1 => Key::Numpad1,
        KeyCode::Numpad2 => Key::Numpad2,
        KeyCode::Numpad3 => Key::Numpad3,
        KeyCode::Numpad4 => Key::Numpad4,
        KeyCode::Numpad5 => Key::Numpad5,
        KeyCode::Numpad6 => Key::Numpad6,
        KeyCode::Numpad7 => Key::Numpad7,
        KeyCode::Numpad8 => Key::Numpad8,
        KeyCode::Numpad9 => Key::Numpad9,
        KeyCode::NumpadAdd => Key::NumpadAdd,
        KeyCode::NumpadSubtract => Key::NumpadSubtract,
        KeyCode::NumpadMultiply => Key::NumpadMultiply,
        KeyCode::NumpadDivide => Key::NumpadDivide,
        KeyCode::NumpadDecimal => Key::NumpadDecimal,
        KeyCode::NumpadEnter => Key::NumpadEnter,

        other => Key::Unknown(unmapped_code(other)),
    }
}

/// Converts a winit logical key to a canvas-input Key.
///
/// Used as a fallback when the physical key is not recognized.
pub fn from_winit_key(key: &WinitKey) -> Key {
    match key {
        WinitKey::Named(named) => from_winit_named_key(named),
        WinitKey::Character(c) => from_character(c),
        WinitKey::Unidentified(_) | WinitKey::Dead(_) => Key::Unknown(0),
    }
}

fn from_winit_named_key(key: &NamedKey) -> Key {
    match key {
        NamedKey::ArrowUp => Key::ArrowUp,
        NamedKey::ArrowDown => Key::ArrowDown,
        NamedKey::ArrowLeft => Key::ArrowLeft,
        NamedKey::ArrowRight => Key::ArrowRight,
        NamedKey::Home => Key::Home,
        NamedKey::End => Key::End,
        NamedKey::PageUp => Key::PageUp,
        NamedKey::PageDown => Key::PageDown,
        NamedKey::Backspace => Key::Backspace,
        NamedKey::Delete => Key::Delete,
        NamedKey::Insert => Key::Insert,
        NamedKey::Enter => Key::Enter,
        NamedKey::Tab => Key::Tab,
        NamedKey::Space => Key::Space,
        NamedKey::Escape => Key::Escape,
        // Logical modifiers carry no side.
        NamedKey::Shift => Key::ShiftLeft,
        NamedKey::Control => Key::ControlLeft,
        NamedKey::Alt => Key::AltLeft,
        NamedKey::Super => Key::MetaLeft,
        NamedKey::CapsLock => Key::CapsLock,
        NamedKey::NumLock => Key::NumLock,
        NamedKey::ScrollLock => Key::ScrollLock,
        NamedKey::F1 => Key::F1,
        NamedKey::F2 => Key::F2,
        NamedKey::F3 => Key::F3,
        NamedKey::F4 => Key::F4,
        NamedKey::F5 => Key::F5,
        NamedKey::F6 => Key::F6,
        NamedKey::F7 => Key::F7,
        NamedKey::F8 => Key::F8,
        NamedKey::F9 => Key::F9,
        NamedKey::F10 => Key::F10,
        NamedKey::F11 => Key::F11,
        NamedKey::F12 => Key::F12,
        NamedKey::F13 => Key::F13,
        NamedKey::F14 => Key::F14,
        NamedKey::F15 => Key::F15,
        NamedKey::F16 => Key::F16,
        NamedKey::F17 => Key::F17,
        NamedKey::F18 => Key::F18,
        NamedKey::F19 => Key::F19,
        NamedKey::F20 => Key::F20,
        NamedKey::F21 => Key::F21,
        NamedKey::F22 => Key::F22,
        NamedKey::F23 => Key::F23,
        NamedKey::F24 => Key::F24,
        NamedKey::PrintScreen => Key::PrintScreen,
        NamedKey::Pause => Key::Pause,
        other => Key::Unknown(unmapped_code(other)),
    }
}

/// High bit carried by every code [`unmapped_code`] produces.
pub const UNMAPPED_CODE_FLAG: u32 = 0x8000_0000;

/// Stable code for a winit key with no [`Key`] variant.
///
/// FNV-1a over the variant's `Debug` name, with [`UNMAPPED_CODE_FLAG`] set.
fn unmapped_code(key: &impl fmt::Debug) -> u32 {
    let mut hasher = Fnv1a::default();
    // Fnv1a::write_str never fails.
    let _ = write!(hasher, "{key:?}");
    hasher.0 | UNMAPPED_CODE_FLAG
}

struct Fnv1a(u32);

impl Default for Fnv1a {
    fn default() -> Self {
        Self(0x811c_9dc5)
    }
}

impl fmt::Write for Fnv1a {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            self.0 ^= u32::from(byte);
            self.0 = self.0.wrapping_mul(0x0100_0193);
        }
        Ok(())
    }
}

/// Converts a single-character string to a canvas-input Key.
///
/// Letters are case-insensitive. Any other single character becomes
/// [`Key::Unknown`] carrying its code point; empty or multi-character
/// strings become `Key::Unknown(0)`.
pub fn from_character(c: &str) -> Key {
    let mut chars = c.chars();
    let (Some(ch), None) = (chars.next(), chars.next()) else {
        return Key::Unknown(0);
    };
    from_char(ch)
}

/// Converts a single character to a canvas-input Key.
pub fn from_char(ch: char) -> Key {
    let lower = ch.to_ascii_lowercase();
    if lower.is_ascii_lowercase() {
        return Key::LETTERS[(lower as u8 - b'a') as usize];
    }
    if ch.is_ascii_digit() {
        return Key::DIGITS[(ch as u8 - b'0') as usize];
    }
    match ch {
        '-' => Key::Minus,
        '=' => Key::Equal,
        '[' => Key::BracketLeft,
        ']' => Key::BracketRight,
        '\\' => Key::Backslash,
        ';' => Key::Semicolon,
        '\'' => Key::Quote,
        ',' => Key::Comma,
        '.' => Key::Period,
        '/' => Key::Slash,
        '`' => Key::Grave,
        ' ' => Key::Space,
        '\t' => Key::Tab,
        '\r' | '\n' => Key::Enter,
        '\u{8}' => Key::Backspace,
        '\u{1b}' => Key::Escape,
        other => Key::Unknown(other as u32),
    }
}
