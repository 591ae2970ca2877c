use super::Modifiers;

/// Discrete navigation command understood by the selection state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    /// Move the selection one cell.
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Scroll one cell without moving the selection.
    ScrollUp,
    ScrollDown,
    ScrollLeft,
    ScrollRight,
    /// Move the selection to the top/bottom visible row, then page.
    PageUp,
    PageDown,
    /// Scroll a full screen horizontally without moving the selection.
    PageLeft,
    PageRight,
    /// First data column of the current row. A single move: when that
    /// column is already on screen (always so for a fixed column) only the
    /// selection changes and the horizontal offset is kept; otherwise the
    /// view scrolls back to offset 0 first.
    LineStart,
    /// Last data column of the current row, scrolling to the maximum
    /// offset when it is not fully visible.
    LineEnd,
    /// First/last data cell of the grid.
    DocumentStart,
    DocumentEnd,
    /// Open/commit the selected cell.
    Activate,
}

impl NavCommand {
    /// Map a DOM-style key name (`KeyboardEvent.key`) to a command.
    ///
    /// Ctrl turns arrows into one-cell scrolls, PageUp/PageDown into
    /// horizontal pages and Home/End into document start/end.
    pub fn from_key(key: &str, modifiers: Modifiers) -> Option<Self> {
        let ctrl = modifiers.ctrl;
        let cmd = match key {
            "ArrowUp" | "Up" if ctrl => Self::ScrollUp,
            "ArrowDown" | "Down" if ctrl => Self::ScrollDown,
            "ArrowLeft" | "Left" if ctrl => Self::ScrollLeft,
            "ArrowRight" | "Right" if ctrl => Self::ScrollRight,
            "ArrowUp" | "Up" => Self::MoveUp,
            "ArrowDown" | "Down" => Self::MoveDown,
            "ArrowLeft" | "Left" => Self::MoveLeft,
            "ArrowRight" | "Right" => Self::MoveRight,
            "PageUp" if ctrl => Self::PageLeft,
            "PageDown" if ctrl => Self::PageRight,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "Home" if ctrl => Self::DocumentStart,
            "End" if ctrl => Self::DocumentEnd,
            "Home" => Self::LineStart,
            "End" => Self::LineEnd,
            "Enter" => Self::Activate,
            _ => return None,
        };
        Some(cmd)
    }
}
