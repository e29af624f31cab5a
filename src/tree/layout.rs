//! Per-splitter layout algorithm: proportional distribution of a splitter's
//! dimension among its children, with a redistribute-to-equal fallback.

use super::node::{NodeId, NodeKind, Orientation};
use super::Tree;
use crate::canvas::Canvas;

impl<C: Canvas> Tree<C> {
    /// Lay out `id` (must be a splitter) and recursively lay out any child
    /// splitters. Panes are placed but not recursed into further.
    pub(crate) fn layout_splitter(&mut self, id: NodeId) {
        let (orientation, children, real_height, real_width, top, left) = {
            let node = self.node(id);
            let (orientation, children) = match &node.kind {
                NodeKind::Splitter {
                    orientation,
                    children,
                } => (*orientation, children.clone()),
                NodeKind::Pane { .. } => return,
            };
            (
                orientation,
                children,
                node.real_height,
                node.real_width,
                node.top,
                node.left,
            )
        };

        let n = children.len();
        if n == 0 {
            return;
        }

        // Leave a one-column separator between adjacent children on vertical
        // splits (one column reserved between adjacent children).
        let available: i64 = match orientation {
            Orientation::Horizontal => real_height as i64,
            Orientation::Vertical => real_width as i64 - (n as i64 - 1),
        };
        let available = available.max(0);

        let dims: Vec<i64> = children
            .iter()
            .map(|&c| match orientation {
                Orientation::Horizontal => self.node(c).real_height as i64,
                Orientation::Vertical => self.node(c).real_width as i64,
            })
            .collect();
        let mins: Vec<i64> = children
            .iter()
            .map(|&c| {
                let (mh, mw) = self.min_dimension(c);
                match orientation {
                    Orientation::Horizontal => mh as i64,
                    Orientation::Vertical => mw as i64,
                }
            })
            .collect();
        let prev_sum: i64 = dims.iter().sum();

        // Redistribute trigger: any proportion times available undershoots
        // that child's minimum, or any child is still at the placeholder
        // (1,1) initial size.
        let mut redistribute = prev_sum == 0;
        if !redistribute {
            for i in 0..n {
                let proportion = dims[i] as f64 / prev_sum as f64;
                if proportion * (available as f64) < mins[i] as f64 {
                    redistribute = true;
                    break;
                }
                let (ch, cw) = (self.node(children[i]).real_height, self.node(children[i]).real_width);
                if ch == 1 && cw == 1 {
                    redistribute = true;
                    break;
                }
            }
        }

        let mut new_sizes: Vec<i64> = vec![0; n];
        if redistribute {
            let base = available / n as i64;
            for s in new_sizes.iter_mut() {
                *s = base;
            }
        } else {
            for i in 0..n {
                let proportion = dims[i] as f64 / prev_sum as f64;
                new_sizes[i] = (proportion * available as f64).floor() as i64;
            }
        }

        let sum: i64 = new_sizes.iter().sum();
        let mut remainder = available - sum;

        // Distribute the remainder: first top up any child still below its
        // minimum, then hand whatever is left to the last child.
        for i in 0..n {
            while new_sizes[i] < mins[i] && remainder > 0 {
                new_sizes[i] += 1;
                remainder -= 1;
            }
        }
        if remainder > 0 {
            if let Some(last) = new_sizes.last_mut() {
                *last += remainder;
            }
        }

        let mut position: i64 = match orientation {
            Orientation::Horizontal => top as i64,
            Orientation::Vertical => left as i64,
        };

        for (i, &child_id) in children.iter().enumerate() {
            let dim = new_sizes[i].max(0) as u16;
            let (child_top, child_left, child_h, child_w) = match orientation {
                Orientation::Horizontal => (position as u16, left, dim, real_width),
                Orientation::Vertical => (top, position as u16, real_height, dim),
            };

            self.place(child_id, child_top, child_left, child_h, child_w);

            position += dim as i64;
            if orientation == Orientation::Vertical && i + 1 < n {
                position += 1; // separator column
            }
        }

        for &child_id in &children {
            if self.node(child_id).kind.is_splitter() {
                self.layout_splitter(child_id);
            }
        }
    }

    /// Move and resize `id`'s rectangle, propagating to its Canvas.
    pub(crate) fn place(&mut self, id: NodeId, top: u16, left: u16, height: u16, width: u16) {
        let node = self.node_mut(id);
        node.top = top;
        node.left = left;
        node.real_height = height;
        node.real_width = width;
        node.canvas.resize(height, width);
        node.canvas.move_to(top, left);
    }

    /// Minimum `(height, width)` of `id`: a pane's own floor, or for a
    /// splitter the sum along its axis / max across it.
    pub(crate) fn min_dimension(&self, id: NodeId) -> (u16, u16) {
        match &self.node(id).kind {
            NodeKind::Pane {
                min_height,
                min_width,
                ..
            } => (*min_height, *min_width),
            NodeKind::Splitter {
                orientation,
                children,
            } => {
                let mut height = 0u16;
                let mut width = 0u16;
                for &c in children {
                    let (ch, cw) = self.min_dimension(c);
                    match orientation {
                        Orientation::Horizontal => {
                            height += ch;
                            width = width.max(cw);
                        }
                        Orientation::Vertical => {
                            width += cw;
                            height = height.max(ch);
                        }
                    }
                }
                (height, width)
            }
        }
    }
}
