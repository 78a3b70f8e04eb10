//! Input abstraction
//!
//! Key state is fed by the platform layer and queried by scripts through the
//! call surface. Key codes follow the GLFW numbering the editor uses.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum KeyCode {
    Space = 32,
    Apostrophe = 39,
    Comma = 44,
    Minus = 45,
    Period = 46,
    Slash = 47,
    D0 = 48,
    D1 = 49,
    D2 = 50,
    D3 = 51,
    D4 = 52,
    D5 = 53,
    D6 = 54,
    D7 = 55,
    D8 = 56,
    D9 = 57,
    Semicolon = 59,
    Equal = 61,
    A = 65,
    B = 66,
    C = 67,
    D = 68,
    E = 69,
    F = 70,
    G = 71,
    H = 72,
    I = 73,
    J = 74,
    K = 75,
    L = 76,
    M = 77,
    N = 78,
    O = 79,
    P = 80,
    Q = 81,
    R = 82,
    S = 83,
    T = 84,
    U = 85,
    V = 86,
    W = 87,
    X = 88,
    Y = 89,
    Z = 90,
    Escape = 256,
    Enter = 257,
    Tab = 258,
    Backspace = 259,
    Insert = 260,
    Delete = 261,
    Right = 262,
    Left = 263,
    Down = 264,
    Up = 265,
    F1 = 290,
    F2 = 291,
    F3 = 292,
    F4 = 293,
    F5 = 294,
    F6 = 295,
    F7 = 296,
    F8 = 297,
    F9 = 298,
    F10 = 299,
    F11 = 300,
    F12 = 301,
    LeftShift = 340,
    LeftControl = 341,
    LeftAlt = 342,
    RightShift = 344,
    RightControl = 345,
    RightAlt = 346,
}

impl KeyCode {
    const ALL: [KeyCode; 72] = [
        KeyCode::Space,
        KeyCode::Apostrophe,
        KeyCode::Comma,
        KeyCode::Minus,
        KeyCode::Period,
        KeyCode::Slash,
        KeyCode::D0,
        KeyCode::D1,
        KeyCode::D2,
        KeyCode::D3,
        KeyCode::D4,
        KeyCode::D5,
        KeyCode::D6,
        KeyCode::D7,
        KeyCode::D8,
        KeyCode::D9,
        KeyCode::Semicolon,
        KeyCode::Equal,
        KeyCode::A,
        KeyCode::B,
        KeyCode::C,
        KeyCode::D,
        KeyCode::E,
        KeyCode::F,
        KeyCode::G,
        KeyCode::H,
        KeyCode::I,
        KeyCode::J,
        KeyCode::K,
        KeyCode::L,
        KeyCode::M,
        KeyCode::N,
        KeyCode::O,
        KeyCode::P,
        KeyCode::Q,
        KeyCode::R,
        KeyCode::S,
        KeyCode::T,
        KeyCode::U,
        KeyCode::V,
        KeyCode::W,
        KeyCode::X,
        KeyCode::Y,
        KeyCode::Z,
        KeyCode::Escape,
        KeyCode::Enter,
        KeyCode::Tab,
        KeyCode::Backspace,
        KeyCode::Insert,
        KeyCode::Delete,
        KeyCode::Right,
        KeyCode::Left,
        KeyCode::Down,
        KeyCode::Up,
        KeyCode::F1,
        KeyCode::F2,
        KeyCode::F3,
        KeyCode::F4,
        KeyCode::F5,
        KeyCode::F6,
        KeyCode::F7,
        KeyCode::F8,
        KeyCode::F9,
        KeyCode::F10,
        KeyCode::F11,
        KeyCode::F12,
        KeyCode::LeftShift,
        KeyCode::LeftControl,
        KeyCode::LeftAlt,
        KeyCode::RightShift,
        KeyCode::RightControl,
        KeyCode::RightAlt,
    ];

    /// Platform key code for this key.
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Map a platform key code back to a key, if it is one we track.
    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.iter().copied().find(|key| key.code() == code)
    }
}

/// Keys currently held down.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    down: HashSet<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: KeyCode) {
        self.down.insert(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.down.remove(&key);
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.down.contains(&key)
    }

    pub fn clear(&mut self) {
        self.down.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_track_state() {
        let mut input = InputState::new();
        input.press(KeyCode::Space);
        assert!(input.is_key_down(KeyCode::Space));
        assert!(!input.is_key_down(KeyCode::A));
        input.release(KeyCode::Space);
        assert!(!input.is_key_down(KeyCode::Space));
    }

    #[test]
    fn codes_match_platform_numbering() {
        assert_eq!(KeyCode::Space.code(), 32);
        assert_eq!(KeyCode::from_code(65), Some(KeyCode::A));
        assert_eq!(KeyCode::from_code(341), Some(KeyCode::LeftControl));
        assert_eq!(KeyCode::from_code(1), None);
    }
}
