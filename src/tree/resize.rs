//! `resize(pane, orientation, new_size)`: clamp to the available range,
//! then borrow-from-successors-then-predecessors on growth, or
//! shrink-and-grow-the-neighbor on shrink.

use super::node::{NodeId, NodeKind, Orientation};
use super::Tree;
use crate::canvas::Canvas;
use crate::error::{Clamped, Result, WmError};

impl<C: Canvas> Tree<C> {
    pub fn resize(
        &mut self,
        pane: NodeId,
        orientation: Orientation,
        new_size: u16,
    ) -> Result<Clamped<u16>> {
        let parent = self
            .node(pane)
            .parent
            .ok_or_else(|| WmError::InvalidArgument("pane has no containing splitter".into()))?;

        let (splitter_orientation, children, splitter_dim, top, left) = {
            let p = self.node(parent);
            match &p.kind {
                NodeKind::Splitter {
                    orientation: o,
                    children,
                } => (
                    *o,
                    children.clone(),
                    match o {
                        Orientation::Horizontal => p.real_height,
                        Orientation::Vertical => p.real_width,
                    },
                    p.top,
                    p.left,
                ),
                NodeKind::Pane { .. } => unreachable!("parent is always a splitter"),
            }
        };

        if splitter_orientation != orientation {
            return Err(WmError::InvalidArgument(
                "resize orientation does not match containing splitter".into(),
            ));
        }

        let current = self.axis_dim(pane, orientation);

        // Open Question #3: a single-child splitter is a transient state;
        // treat resize against it as a no-op success rather than an error.
        if children.len() == 1 {
            return Ok(Clamped::exact(current));
        }

        let idx = children
            .iter()
            .position(|&c| c == pane)
            .ok_or(WmError::NotFound(pane))?;

        let min = self.min_dimension(pane);
        let min = match orientation {
            Orientation::Horizontal => min.0,
            Orientation::Vertical => min.1,
        };

        let separator_cols = if orientation == Orientation::Vertical {
            children.len() as i64 - 1
        } else {
            0
        };
        let mut sibling_min_sum: i64 = 0;
        for &sib in &children {
            if sib == pane {
                continue;
            }
            let (mh, mw) = self.min_dimension(sib);
            sibling_min_sum += match orientation {
                Orientation::Horizontal => mh as i64,
                Orientation::Vertical => mw as i64,
            };
        }
        let max = (splitter_dim as i64 - sibling_min_sum - separator_cols).max(min as i64);

        let mut clamped_flag = false;
        let mut target = new_size as i64;
        if target < min as i64 {
            target = min as i64;
            clamped_flag = true;
        }
        if target > max {
            target = max;
            clamped_flag = true;
        }

        let delta = target - current as i64;
        if delta == 0 {
            return Ok(if clamped_flag {
                Clamped::clamped(current)
            } else {
                Clamped::exact(current)
            });
        }

        let before: Vec<(u16, u16, u16, u16)> = children
            .iter()
            .map(|&c| self.rect(c))
            .collect();

        if delta < 0 {
            let shrink = -delta;
            let (neighbor_idx, wrapped) = if idx + 1 == children.len() {
                (idx - 1, true)
            } else {
                (idx + 1, false)
            };
            let neighbor = children[neighbor_idx];

            self.set_axis_dim(neighbor, orientation, self.axis_dim(neighbor, orientation) + shrink as u16);
            self.set_axis_dim(pane, orientation, current - shrink as u16);

            if wrapped {
                let pos = self.axis_pos(pane, orientation);
                self.set_axis_pos(pane, orientation, pos - shrink as u16);
            } else {
                let pos = self.axis_pos(neighbor, orientation);
                self.set_axis_pos(neighbor, orientation, pos + shrink as u16);
            }
        } else {
            let mut need = delta;
            let mut actual = 0i64;

            // Borrow from successors.
            let mut j = idx + 1;
            while actual != need && j < children.len() {
                let sib = children[j];
                let sib_dim = self.axis_dim(sib, orientation) as i64;
                let sib_min = {
                    let (mh, mw) = self.min_dimension(sib);
                    match orientation {
                        Orientation::Horizontal => mh as i64,
                        Orientation::Vertical => mw as i64,
                    }
                };
                let avail = sib_dim - sib_min;
                let take = (need - actual).min(avail).max(0);
                actual += take;

                let sib_pos = self.axis_pos(sib, orientation);
                self.set_axis_pos(sib, orientation, sib_pos + take as u16);
                self.set_axis_dim(sib, orientation, (sib_dim - take) as u16);

                for &k in &children[idx + 1..j] {
                    let p = self.axis_pos(k, orientation);
                    self.set_axis_pos(k, orientation, p + take as u16);
                }
                j += 1;
            }
            self.set_axis_dim(pane, orientation, (current as i64 + actual) as u16);

            // Borrow from predecessors.
            if idx > 0 {
                let mut j = idx as i64 - 1;
                while actual != need && j >= 0 {
                    let sib = children[j as usize];
                    let sib_dim = self.axis_dim(sib, orientation) as i64;
                    let sib_min = {
                        let (mh, mw) = self.min_dimension(sib);
                        match orientation {
                            Orientation::Horizontal => mh as i64,
                            Orientation::Vertical => mw as i64,
                        }
                    };
                    let avail = sib_dim - sib_min;
                    let take = (need - actual).min(avail).max(0);
                    actual += take;

                    self.set_axis_dim(sib, orientation, (sib_dim - take) as u16);
                    let pane_pos = self.axis_pos(pane, orientation);
                    self.set_axis_pos(pane, orientation, (pane_pos as i64 - take) as u16);
                    let pane_dim = self.axis_dim(pane, orientation) as i64;
                    self.set_axis_dim(pane, orientation, (pane_dim + take) as u16);

                    for k in (j as usize + 1)..idx {
                        let p = self.axis_pos(children[k], orientation) as i64;
                        self.set_axis_pos(children[k], orientation, (p - take) as u16);
                    }
                    j -= 1;
                }
            }
        }

        for (&child, &(btop, bleft, bh, bw)) in children.iter().zip(&before) {
            let (ctop, cleft, ch, cw) = self.rect(child);
            if (ctop, cleft, ch, cw) == (btop, bleft, bh, bw) {
                continue;
            }
            self.place(child, ctop, cleft, ch, cw);
            if self.node(child).kind.is_splitter() {
                self.layout_splitter(child);
            }
        }
        let _ = (top, left);
        self.events.push(crate::events::Event::LayoutChanged(parent));

        Ok(if clamped_flag {
            Clamped::clamped(target as u16)
        } else {
            Clamped::exact(target as u16)
        })
    }

    fn axis_dim(&self, id: NodeId, orientation: Orientation) -> u16 {
        let n = self.node(id);
        match orientation {
            Orientation::Horizontal => n.real_height,
            Orientation::Vertical => n.real_width,
        }
    }

    fn set_axis_dim(&mut self, id: NodeId, orientation: Orientation, value: u16) {
        let n = self.node_mut(id);
        match orientation {
            Orientation::Horizontal => n.real_height = value,
            Orientation::Vertical => n.real_width = value,
        }
    }

    fn axis_pos(&self, id: NodeId, orientation: Orientation) -> u16 {
        let n = self.node(id);
        match orientation {
            Orientation::Horizontal => n.top,
            Orientation::Vertical => n.left,
        }
    }

    fn set_axis_pos(&mut self, id: NodeId, orientation: Orientation, value: u16) {
        let n = self.node_mut(id);
        match orientation {
            Orientation::Horizontal => n.top = value,
            Orientation::Vertical => n.left = value,
        }
    }
}
