/// Pointer button that triggered a press/release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` code.
    pub fn from_dom(button: i16) -> Self {
        match button {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// Keyboard modifier state accompanying an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
    };

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }
}

/// A pointer press, in client-area pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub x: i32,
    pub y: i32,
    pub button: PointerButton,
    pub modifiers: Modifiers,
    /// 1 for a single click, 2 for a double click (as reported by the host).
    pub click_count: u32,
}

impl PointerEvent {
    /// Single primary-button click at `(x, y)`.
    pub fn primary(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
            click_count: 1,
        }
    }

    /// Double primary-button click at `(x, y)`.
    pub fn double(x: i32, y: i32) -> Self {
        Self {
            click_count: 2,
            ..Self::primary(x, y)
        }
    }

    pub fn is_double_click(&self) -> bool {
        self.click_count >= 2
    }
}

/// Pointer shape the host should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default,
    /// Over a column boundary in the header band, or while resizing.
    ColumnResize,
}

impl CursorHint {
    /// CSS `cursor` value.
    pub fn css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::ColumnResize => "col-resize",
        }
    }
}
