//! Arena node representation.
//!
//! An arena of integer handles is used instead of raw back-pointers,
//! because `close` must transfer a Canvas handle across node identities
//! during splitter collapse — a field swap with handles, awkward with
//! lifetime-bound references. Splitters hold an `N`-ary `Vec<NodeId>` child
//! list rather than a fixed binary pair, since a splitter can gain or lose
//! children one at a time.

use crate::canvas::Canvas;

/// Handle into a [`super::Tree`]'s arena. Stable across mutation except for
/// the node it names (removed nodes' ids are recycled).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A tagged variant replacing the original's runtime dispatch through
/// function pointers (`redraw`, `layout`, `destroy`, `minimum_size`) and an
/// `is_splitter` discriminator. All tree operations switch on this tag.
pub(crate) enum NodeKind {
    Pane {
        min_height: u16,
        min_width: u16,
        show_status_bar: bool,
    },
    Splitter {
        orientation: Orientation,
        children: Vec<NodeId>,
    },
}

impl NodeKind {
    pub(crate) fn is_splitter(&self) -> bool {
        matches!(self, NodeKind::Splitter { .. })
    }
}

/// A node's placement rectangle plus Canvas handle plus variant payload.
///
/// Both panes and splitters carry a Canvas: a pane paints content into it; a
/// splitter uses it to paint separators and an (optional) status bar. This
/// is also what makes splitter collapse a plain field move — the surviving child adopts the collapsing
/// splitter's Canvas in place of requesting a new one.
pub(crate) struct Node<C: Canvas> {
    pub(crate) parent: Option<NodeId>,
    pub(crate) top: u16,
    pub(crate) left: u16,
    pub(crate) real_height: u16,
    pub(crate) real_width: u16,
    pub(crate) canvas: C,
    pub(crate) kind: NodeKind,
}

impl<C: Canvas> Node<C> {
    pub(crate) fn pane(canvas: C, min_height: u16, min_width: u16) -> Self {
        Self {
            parent: None,
            top: 0,
            left: 0,
            real_height: 1,
            real_width: 1,
            canvas,
            kind: NodeKind::Pane {
                min_height,
                min_width,
                show_status_bar: false,
            },
        }
    }

    pub(crate) fn splitter(canvas: C, orientation: Orientation, children: Vec<NodeId>) -> Self {
        Self {
            parent: None,
            top: 0,
            left: 0,
            real_height: 1,
            real_width: 1,
            canvas,
            kind: NodeKind::Splitter {
                orientation,
                children,
            },
        }
    }
}
