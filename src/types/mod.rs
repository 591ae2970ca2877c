//! Value types shared by the engine and its hosts.

mod command;
mod input;
mod rect;
mod selection;

pub use command::*;
pub use input::*;
pub use rect::*;
pub use selection::*;
