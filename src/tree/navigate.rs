//! `focus_neighbor`: directional pane navigation.
//!
//! Once an orientation-aligned ancestor splitter is found, a missing
//! sibling at that level (focus is already first/last child) ends the
//! search — it does not keep walking further up looking for another
//! aligned ancestor.

use super::node::{NodeId, NodeKind, Orientation};
use super::Tree;
use crate::canvas::Canvas;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Cross-axis cursor position used to pick which descendant a directional
/// move lands on when the chosen sibling is itself a splitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorPos {
    pub row: u16,
    pub col: u16,
}

fn aligned(orientation: Orientation, dir: Direction) -> bool {
    matches!(
        (orientation, dir),
        (Orientation::Horizontal, Direction::Up)
            | (Orientation::Horizontal, Direction::Down)
            | (Orientation::Vertical, Direction::Left)
            | (Orientation::Vertical, Direction::Right)
    )
}

impl<C: Canvas> Tree<C> {
    pub fn focus_neighbor(&self, direction: Direction, cursor_pos: CursorPos) -> Option<NodeId> {
        let mut window = self.focus?;

        loop {
            let parent = self.node(window).parent?;
            let (orientation, children) = match &self.node(parent).kind {
                NodeKind::Splitter {
                    orientation,
                    children,
                } => (*orientation, children.clone()),
                NodeKind::Pane { .. } => unreachable!("parent is always a splitter"),
            };

            if !aligned(orientation, direction) {
                window = parent;
                continue;
            }

            let idx = children.iter().position(|&c| c == window)?;
            let sibling = match direction {
                Direction::Up | Direction::Left => {
                    if idx == 0 {
                        return None;
                    }
                    children[idx - 1]
                }
                Direction::Down | Direction::Right => {
                    if idx + 1 == children.len() {
                        return None;
                    }
                    children[idx + 1]
                }
            };

            return if self.node(sibling).kind.is_splitter() {
                self.find_window_at(sibling, cursor_pos)
            } else {
                Some(sibling)
            };
        }
    }

    /// Descend into a splitter to find the leaf whose rectangle contains
    /// `cursor_pos` along the splitter's cross axis, clamping to the first
    /// or last child when the cursor falls outside every child's range.
    /// `None` when the cursor lands in the separator gap between two
    /// non-edge children, matching neither any child's range nor the
    /// before-first/after-last clamp cases.
    fn find_window_at(&self, id: NodeId, cursor_pos: CursorPos) -> Option<NodeId> {
        let (orientation, children) = match &self.node(id).kind {
            NodeKind::Splitter {
                orientation,
                children,
            } => (*orientation, children.clone()),
            NodeKind::Pane { .. } => return Some(id),
        };

        let n = children.len();
        let mut chosen = None;
        for (i, &child) in children.iter().enumerate() {
            let node = self.node(child);
            let (value, lower, upper) = match orientation {
                Orientation::Horizontal => {
                    (cursor_pos.row, node.top, node.top + node.real_height)
                }
                Orientation::Vertical => (cursor_pos.col, node.left, node.left + node.real_width),
            };
            let in_range = value >= lower && value < upper;
            let below_first = i == 0 && value < lower;
            let above_last = i == n - 1 && value >= upper;
            if in_range || below_first || above_last {
                chosen = Some(child);
                break;
            }
        }

        chosen.and_then(|chosen| {
            if self.node(chosen).kind.is_splitter() {
                self.find_window_at(chosen, cursor_pos)
            } else {
                Some(chosen)
            }
        })
    }
}
