//! Windows Virtual-Key identifiers as stored in the settings file.
//!
//! Reference: Windows Virtual-Key Codes (winuser.h).
//!
//! # Why names instead of numbers? (for beginners)
//!
//! Each key on a keyboard has a Windows "Virtual Key code" (`VK_RETURN = 0x0D`,
//! `VK_MULTIPLY = 0x6A`, ...).  The settings file stores hotkeys by the
//! *name* of the code without the `VK_` prefix, e.g. `MULTIPLY + ADD`, because
//! a name survives hand-editing far better than a bare number.  Letter and
//! digit keys are spelled `KEY_A` / `KEY_0` since an identifier cannot start
//! with a digit.
//!
//! [`VKey::from_name`] accepts either the exact (case-sensitive) name or the
//! decimal code of a known key, so `106` and `MULTIPLY` decode to the same
//! key.  [`VKey::name`] always renders the name.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error returned when text does not name a known virtual key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown virtual key: {0:?}")]
pub struct UnknownKeyError(pub String);

macro_rules! virtual_keys {
    ($( $variant:ident = $code:literal => $name:literal, )*) => {
        /// A Windows virtual key.
        ///
        /// The discriminant of each variant is its Virtual-Key code.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum VKey {
            $( $variant = $code, )*
        }

        impl VKey {
            /// Every key identifier, in ascending code order.
            pub const ALL: &'static [VKey] = &[ $( VKey::$variant, )* ];

            /// Returns the identifier used in the settings file (e.g. `"MULTIPLY"`).
            pub fn name(self) -> &'static str {
                match self {
                    $( VKey::$variant => $name, )*
                }
            }
        }
    };
}

virtual_keys! {
    // ── Mouse buttons ────────────────────────────────────────────────────────
    LButton = 0x01 => "LBUTTON",
    RButton = 0x02 => "RBUTTON",
    Cancel = 0x03 => "CANCEL",
    MButton = 0x04 => "MBUTTON",
    XButton1 = 0x05 => "XBUTTON1",
    XButton2 = 0x06 => "XBUTTON2",

    // ── Control keys ─────────────────────────────────────────────────────────
    Back = 0x08 => "BACK",
    Tab = 0x09 => "TAB",
    Clear = 0x0C => "CLEAR",
    Return = 0x0D => "RETURN",
    Shift = 0x10 => "SHIFT",
    Control = 0x11 => "CONTROL",
    Menu = 0x12 => "MENU",
    Pause = 0x13 => "PAUSE",
    Capital = 0x14 => "CAPITAL",
    Kana = 0x15 => "KANA",
    Junja = 0x17 => "JUNJA",
    Final = 0x18 => "FINAL",
    Kanji = 0x19 => "KANJI",
    Escape = 0x1B => "ESCAPE",
    Convert = 0x1C => "CONVERT",
    NonConvert = 0x1D => "NONCONVERT",
    Accept = 0x1E => "ACCEPT",
    ModeChange = 0x1F => "MODECHANGE",
    Space = 0x20 => "SPACE",
    Prior = 0x21 => "PRIOR",
    Next = 0x22 => "NEXT",
    End = 0x23 => "END",
    Home = 0x24 => "HOME",
    Left = 0x25 => "LEFT",
    Up = 0x26 => "UP",
    Right = 0x27 => "RIGHT",
    Down = 0x28 => "DOWN",
    Select = 0x29 => "SELECT",
    Print = 0x2A => "PRINT",
    Execute = 0x2B => "EXECUTE",
    Snapshot = 0x2C => "SNAPSHOT",
    Insert = 0x2D => "INSERT",
    Delete = 0x2E => "DELETE",
    Help = 0x2F => "HELP",

    // ── Digit row (VK_0=0x30 … VK_9=0x39) ───────────────────────────────────
    Key0 = 0x30 => "KEY_0",
    Key1 = 0x31 => "KEY_1",
    Key2 = 0x32 => "KEY_2",
    Key3 = 0x33 => "KEY_3",
    Key4 = 0x34 => "KEY_4",
    Key5 = 0x35 => "KEY_5",
    Key6 = 0x36 => "KEY_6",
    Key7 = 0x37 => "KEY_7",
    Key8 = 0x38 => "KEY_8",
    Key9 = 0x39 => "KEY_9",

    // ── Alphabet keys (VK_A=0x41 … VK_Z=0x5A) ────────────────────────────────
    KeyA = 0x41 => "KEY_A",
    KeyB = 0x42 => "KEY_B",
    KeyC = 0x43 => "KEY_C",
    KeyD = 0x44 => "KEY_D",
    KeyE = 0x45 => "KEY_E",
    KeyF = 0x46 => "KEY_F",
    KeyG = 0x47 => "KEY_G",
    KeyH = 0x48 => "KEY_H",
    KeyI = 0x49 => "KEY_I",
    KeyJ = 0x4A => "KEY_J",
    KeyK = 0x4B => "KEY_K",
    KeyL = 0x4C => "KEY_L",
    KeyM = 0x4D => "KEY_M",
    KeyN = 0x4E => "KEY_N",
    KeyO = 0x4F => "KEY_O",
    KeyP = 0x50 => "KEY_P",
    KeyQ = 0x51 => "KEY_Q",
    KeyR = 0x52 => "KEY_R",
    KeyS = 0x53 => "KEY_S",
    KeyT = 0x54 => "KEY_T",
    KeyU = 0x55 => "KEY_U",
    KeyV = 0x56 => "KEY_V",
    KeyW = 0x57 => "KEY_W",
    KeyX = 0x58 => "KEY_X",
    KeyY = 0x59 => "KEY_Y",
    KeyZ = 0x5A => "KEY_Z",

    LWin = 0x5B => "LWIN",
    RWin = 0x5C => "RWIN",
    Apps = 0x5D => "APPS",
    Sleep = 0x5F => "SLEEP",

    // ── Numpad (VK_NUMPAD0=0x60 … VK_DIVIDE=0x6F) ────────────────────────────
    Numpad0 = 0x60 => "NUMPAD0",
    Numpad1 = 0x61 => "NUMPAD1",
    Numpad2 = 0x62 => "NUMPAD2",
    Numpad3 = 0x63 => "NUMPAD3",
    Numpad4 = 0x64 => "NUMPAD4",
    Numpad5 = 0x65 => "NUMPAD5",
    Numpad6 = 0x66 => "NUMPAD6",
    Numpad7 = 0x67 => "NUMPAD7",
    Numpad8 = 0x68 => "NUMPAD8",
    Numpad9 = 0x69 => "NUMPAD9",
    Multiply = 0x6A => "MULTIPLY",
    Add = 0x6B => "ADD",
    Separator = 0x6C => "SEPARATOR",
    Subtract = 0x6D => "SUBTRACT",
    Decimal = 0x6E => "DECIMAL",
    Divide = 0x6F => "DIVIDE",

    // ── Function keys (VK_F1=0x70 … VK_F24=0x87) ─────────────────────────────
    F1 = 0x70 => "F1",
    F2 = 0x71 => "F2",
    F3 = 0x72 => "F3",
    F4 = 0x73 => "F4",
    F5 = 0x74 => "F5",
    F6 = 0x75 => "F6",
    F7 = 0x76 => "F7",
    F8 = 0x77 => "F8",
    F9 = 0x78 => "F9",
    F10 = 0x79 => "F10",
    F11 = 0x7A => "F11",
    F12 = 0x7B => "F12",
    F13 = 0x7C => "F13",
    F14 = 0x7D => "F14",
    F15 = 0x7E => "F15",
    F16 = 0x7F => "F16",
    F17 = 0x80 => "F17",
    F18 = 0x81 => "F18",
    F19 = 0x82 => "F19",
    F20 = 0x83 => "F20",
    F21 = 0x84 => "F21",
    F22 = 0x85 => "F22",
    F23 = 0x86 => "F23",
    F24 = 0x87 => "F24",

    NumLock = 0x90 => "NUMLOCK",
    Scroll = 0x91 => "SCROLL",

    // ── Side-specific modifiers ──────────────────────────────────────────────
    LShift = 0xA0 => "LSHIFT",
    RShift = 0xA1 => "RSHIFT",
    LControl = 0xA2 => "LCONTROL",
    RControl = 0xA3 => "RCONTROL",
    LMenu = 0xA4 => "LMENU",
    RMenu = 0xA5 => "RMENU",

    // ── Browser / media keys ─────────────────────────────────────────────────
    BrowserBack = 0xA6 => "BROWSER_BACK",
    BrowserForward = 0xA7 => "BROWSER_FORWARD",
    BrowserRefresh = 0xA8 => "BROWSER_REFRESH",
    BrowserStop = 0xA9 => "BROWSER_STOP",
    BrowserSearch = 0xAA => "BROWSER_SEARCH",
    BrowserFavorites = 0xAB => "BROWSER_FAVORITES",
    BrowserHome = 0xAC => "BROWSER_HOME",
    VolumeMute = 0xAD => "VOLUME_MUTE",
    VolumeDown = 0xAE => "VOLUME_DOWN",
    VolumeUp = 0xAF => "VOLUME_UP",
    MediaNextTrack = 0xB0 => "MEDIA_NEXT_TRACK",
    MediaPrevTrack = 0xB1 => "MEDIA_PREV_TRACK",
    MediaStop = 0xB2 => "MEDIA_STOP",
    MediaPlayPause = 0xB3 => "MEDIA_PLAY_PAUSE",
    LaunchMail = 0xB4 => "LAUNCH_MAIL",
    LaunchMediaSelect = 0xB5 => "LAUNCH_MEDIA_SELECT",
    LaunchApp1 = 0xB6 => "LAUNCH_APP1",
    LaunchApp2 = 0xB7 => "LAUNCH_APP2",

    // ── Punctuation / OEM keys ───────────────────────────────────────────────
    Oem1 = 0xBA => "OEM_1",
    OemPlus = 0xBB => "OEM_PLUS",
    OemComma = 0xBC => "OEM_COMMA",
    OemMinus = 0xBD => "OEM_MINUS",
    OemPeriod = 0xBE => "OEM_PERIOD",
    Oem2 = 0xBF => "OEM_2",
    Oem3 = 0xC0 => "OEM_3",
    Oem4 = 0xDB => "OEM_4",
    Oem5 = 0xDC => "OEM_5",
    Oem6 = 0xDD => "OEM_6",
    Oem7 = 0xDE => "OEM_7",
    Oem8 = 0xDF => "OEM_8",
    Oem102 = 0xE2 => "OEM_102",
    ProcessKey = 0xE5 => "PROCESSKEY",
    Packet = 0xE7 => "PACKET",
    Attn = 0xF6 => "ATTN",
    CrSel = 0xF7 => "CRSEL",
    ExSel = 0xF8 => "EXSEL",
    ErEof = 0xF9 => "EREOF",
    Play = 0xFA => "PLAY",
    Zoom = 0xFB => "ZOOM",
    NoName = 0xFC => "NONAME",
    Pa1 = 0xFD => "PA1",
    OemClear = 0xFE => "OEM_CLEAR",
}

impl VKey {
    /// Returns the Windows Virtual-Key code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Looks up the key with Virtual-Key code `code`.
    ///
    /// Returns `None` for unassigned codes.
    pub fn from_code(code: u8) -> Option<VKey> {
        // Linear scan; the table is under 200 entries and lookups happen only
        // while decoding the settings file.
        VKey::ALL.iter().copied().find(|key| key.code() == code)
    }

    /// Parses a key identifier.
    ///
    /// Surrounding whitespace is ignored.  The name match is exact and
    /// case-sensitive; a decimal number is accepted when it is the code of a
    /// known key.
    pub fn from_name(text: &str) -> Option<VKey> {
        let text = text.trim();
        if let Some(key) = VKey::ALL.iter().copied().find(|key| key.name() == text) {
            return Some(key);
        }
        text.parse::<u8>().ok().and_then(VKey::from_code)
    }
}

impl fmt::Display for VKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VKey {
    type Err = UnknownKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VKey::from_name(s).ok_or_else(|| UnknownKeyError(s.to_string()))
    }
}
