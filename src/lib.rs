//! Core primitives for a terminal window manager: a split tree of panes and
//! a scrollback line buffer with ANSI/SGR rendering, plus the option store
//! and Canvas abstraction they share.
//!
//! This crate draws no terminal itself — it consumes a [`canvas::Canvas`]
//! implementation supplied by the embedding application (curses, termion,
//! crossterm, or a test double like [`canvas::NullCanvas`]) and never
//! installs global state (no logging subscriber, no process-wide option
//! singleton — see `DESIGN.md`'s Open Question decisions).

pub mod canvas;
pub mod error;
pub mod events;
pub mod options;
pub mod scroller;
pub mod tree;

/// File logging for the `wm-demo` binary. The library itself never calls
/// `logging::init` or installs a subscriber — only the demo opts in.
pub mod logging;

pub use canvas::Canvas;
pub use error::{Clamped, Result, WmError};
pub use events::Event;
pub use options::{EaDirection, OptionName, OptionStore, OptionValue};
pub use scroller::Scroller;
pub use tree::{CursorPos, Direction, NodeId, Orientation, Tree};
