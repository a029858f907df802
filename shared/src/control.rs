use serde::{Deserialize, Serialize};

/// Input events forwarded to the streamed application through the media engine.
///
/// Each variant maps to one numeric message type understood by the engine,
/// see [`ControlMessage::kind`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ControlMessage {
    TouchStart { id: u32, x: u32, y: u32 },
    TouchEnd { id: u32 },
    TouchCancel { id: u32 },
    TouchMove { id: u32, x: u32, y: u32 },
    MouseMove { x: u32, y: u32, rx: i32, ry: i32 },
    MouseButton { button: MouseButton, pressed: bool },
    MouseWheel { x: i32, y: i32 },
    Keyboard { code: KeyCode, pressed: bool },
    GamepadButton { id: u32, code: GamepadButton, pressed: bool },
    GamepadAxis { id: u32, code: GamepadAxis, value: f64 },
}

impl ControlMessage {
    /// Numeric message type on the engine side
    pub fn kind(&self) -> u32 {
        match self {
            ControlMessage::TouchStart { .. } => 1,
            ControlMessage::TouchEnd { .. } => 2,
            ControlMessage::TouchCancel { .. } => 3,
            ControlMessage::TouchMove { .. } => 4,
            ControlMessage::MouseMove { .. } => 5,
            ControlMessage::MouseButton { .. } => 6,
            ControlMessage::MouseWheel { .. } => 7,
            ControlMessage::Keyboard { .. } => 8,
            ControlMessage::GamepadButton { .. } => 9,
            ControlMessage::GamepadAxis { .. } => 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum MouseButton {
    Left = 1,
    Right = 2,
    Middle = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum GamepadButton {
    A = 0,
    B = 1,
    X = 2,
    Y = 3,
    Tl = 4,
    Tr = 5,
    AbsRy = 6,
    AbsRz = 7,
    Select = 8,
    Tl2 = 9,
    Tr2 = 10,
    Mode = 11,
    KeyUp = 12,
    KeyDown = 13,
    KeyLeft = 14,
    KeyRight = 15,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum GamepadAxis {
    AbsX = 0,
    AbsY = 1,
    AbsZ = 2,
    AbsRx = 3,
}

/// Keyboard codes, numbered after USB HID usage ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum KeyCode {
    Unknown = 0,
    A = 4,
    B = 5,
    C = 6,
    D = 7,
    E = 8,
    F = 9,
    G = 10,
    H = 11,
    I = 12,
    J = 13,
    K = 14,
    L = 15,
    M = 16,
    N = 17,
    O = 18,
    P = 19,
    Q = 20,
    R = 21,
    S = 22,
    T = 23,
    U = 24,
    V = 25,
    W = 26,
    X = 27,
    Y = 28,
    Z = 29,
    Num1 = 30,
    Num2 = 31,
    Num3 = 32,
    Num4 = 33,
    Num5 = 34,
    Num6 = 35,
    Num7 = 36,
    Num8 = 37,
    Num9 = 38,
    Num0 = 39,
    Enter = 40,
    Esc = 41,
    Backspace = 42,
    Tab = 43,
    Space = 44,
    Minus = 45,
    Equal = 46,
    LeftBrace = 47,
    RightBrace = 48,
    Backslash = 49,
    Semicolon = 51,
    Comma = 54,
    Dot = 55,
    Slash = 56,
    CapsLock = 57,
    F1 = 58,
    F2 = 59,
    F3 = 60,
    F4 = 61,
    F5 = 62,
    F6 = 63,
    F7 = 64,
    F8 = 65,
    F9 = 66,
    F10 = 67,
    F11 = 68,
    F12 = 69,
    Print = 70,
    ScrollLock = 71,
    Pause = 72,
    Insert = 73,
    Home = 74,
    PageUp = 75,
    Delete = 76,
    End = 77,
    PageDown = 78,
    Right = 79,
    Left = 80,
    Down = 81,
    Up = 82,
    LeftCtrl = 83,
    LeftShift = 84,
    LeftAlt = 85,
    LeftMeta = 86,
    RightAlt = 87,
    NumLock = 88,
    VolumeDown = 89,
    VolumeUp = 90,
    Power = 91,
    Back = 92,
}

impl KeyCode {
    pub fn code(self) -> u32 {
        self as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_kinds() {
        assert_eq!(ControlMessage::TouchStart { id: 0, x: 1, y: 2 }.kind(), 1);
        assert_eq!(ControlMessage::MouseMove { x: 10, y: 20, rx: -1, ry: 1 }.kind(), 5);
        assert_eq!(
            ControlMessage::Keyboard { code: KeyCode::Enter, pressed: true }.kind(),
            8
        );
        assert_eq!(
            ControlMessage::GamepadAxis { id: 0, code: GamepadAxis::AbsRx, value: 0.5 }.kind(),
            10
        );
    }

    #[test]
    fn test_wire_codes() {
        assert_eq!(KeyCode::A.code(), 4);
        assert_eq!(KeyCode::Num9.code(), 38);
        assert_eq!(KeyCode::Back.code(), 92);
        assert_eq!(MouseButton::Middle as u8, 3);
        assert_eq!(GamepadButton::KeyRight as u32, 15);
    }

    #[test]
    fn test_tagged_serialization() {
        let msg = ControlMessage::MouseButton { button: MouseButton::Left, pressed: true };
        let json = serde_json::to_value(msg).unwrap();
        assert_eq!(json["type"], "mouse-button");
        assert_eq!(json["button"], "left");
        assert_eq!(json["pressed"], true);
    }
}
