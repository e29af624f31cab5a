//! Events emitted by the core.
//!
//! The core never dispatches these to a registered listener — it returns
//! them from command entry points (or accumulates them in a `Vec` the caller
//! drains) so the embedding application decides how to react, matching the
//! single-threaded, no-suspension-point model.

use crate::tree::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Fired after a tree mutation resized any pane reachable from `node`.
    LayoutChanged(NodeId),
    /// A pane's scroller went dirty and needs repainting. Scrollers are
    /// composed outside the tree and don't carry a `NodeId`, so this is
    /// never pushed automatically — the owning application calls
    /// [`crate::tree::Tree::notify_redraw`] after observing
    /// `scroller.take_redraw()` return `true`.
    RedrawRequested(NodeId),
}
