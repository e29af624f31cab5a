//! The split tree: an arena of [`node::Node`]s reached through
//! [`NodeId`] handles, supporting N-ary splitters and handle-based Canvas
//! transfer on collapse.

mod layout;
mod navigate;
mod node;
mod resize;

pub use navigate::{CursorPos, Direction};
pub use node::{NodeId, Orientation};

use node::{Node, NodeKind};

use crate::canvas::Canvas;
use crate::error::{Result, WmError};
use crate::events::Event;
use crate::options::OptionStore;

/// A recursive tree of splitters whose leaves are panes, tiling a fixed
/// rectangular region. Owns the option store (see `DESIGN.md`'s Open
/// Question decision on scope).
pub struct Tree<C: Canvas> {
    arena: Vec<Option<Node<C>>>,
    free: Vec<usize>,
    root: Option<NodeId>,
    focus: Option<NodeId>,
    options: OptionStore,
    events: Vec<Event>,
}

impl<C: Canvas> Tree<C> {
    /// Establish a tree whose root is a single pane; focus points at it.
    pub fn new_tree(canvas: C, min_height: u16, min_width: u16) -> Self {
        let mut tree = Self {
            arena: Vec::new(),
            free: Vec::new(),
            root: None,
            focus: None,
            options: OptionStore::default(),
            events: Vec::new(),
        };
        let root = tree.alloc(Node::pane(canvas, min_height, min_width));
        tree.root = Some(root);
        tree.focus = Some(root);
        tree
    }

    /// Drain and return events accumulated since the last call. The core never dispatches these
    /// itself — the embedding application drains and reacts.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Record that `node`'s content changed and needs repainting.
    ///
    /// A `Scroller` has no `NodeId` of its own to tag a [`Event::RedrawRequested`]
    /// with, so this tree has no way to notice a scroller going dirty on its
    /// own. The composition layer that owns both the tree and a pane's
    /// scroller calls this after `scroller.take_redraw()` returns `true`.
    pub fn notify_redraw(&mut self, node: NodeId) {
        self.events.push(Event::RedrawRequested(node));
    }

    pub fn options(&self) -> &OptionStore {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut OptionStore {
        &mut self.options
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focus
    }

    pub fn focus(&mut self, pane: NodeId) -> Result<()> {
        if self.arena.get(pane.0).and_then(Option::as_ref).is_none() {
            return Err(WmError::NotFound(pane));
        }
        self.focus = Some(pane);
        Ok(())
    }

    pub fn is_splitter(&self, id: NodeId) -> bool {
        self.node(id).kind.is_splitter()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> Option<&[NodeId]> {
        match &self.node(id).kind {
            NodeKind::Splitter { children, .. } => Some(children),
            NodeKind::Pane { .. } => None,
        }
    }

    pub fn orientation(&self, id: NodeId) -> Option<Orientation> {
        match &self.node(id).kind {
            NodeKind::Splitter { orientation, .. } => Some(*orientation),
            NodeKind::Pane { .. } => None,
        }
    }

    /// `(top, left, height, width)` of `id`'s current placement.
    pub fn rect(&self, id: NodeId) -> (u16, u16, u16, u16) {
        let n = self.node(id);
        (n.top, n.left, n.real_height, n.real_width)
    }

    pub fn canvas(&self, id: NodeId) -> &C {
        &self.node(id).canvas
    }

    /// Minimum `(height, width)` of `id` — a pane's own floor, or a
    /// splitter's derived minimum (sum along its axis, max across it).
    pub fn minimum_size(&self, id: NodeId) -> (u16, u16) {
        self.min_dimension(id)
    }

    pub fn pane_count(&self) -> usize {
        self.root.map_or(0, |r| self.count_leaves(r))
    }

    fn count_leaves(&self, id: NodeId) -> usize {
        match &self.node(id).kind {
            NodeKind::Pane { .. } => 1,
            NodeKind::Splitter { children, .. } => {
                children.iter().map(|&c| self.count_leaves(c)).sum()
            }
        }
    }

    /// Lay out the whole tree from the root down.
    pub fn layout(&mut self) {
        if let Some(root) = self.root {
            if self.node(root).kind.is_splitter() {
                self.layout_splitter(root);
            }
        }
    }

    // -----------------------------------------------------------------
    // split
    // -----------------------------------------------------------------

    /// Insert `new_pane` adjacent to `target` along `orientation`. See
    /// the three cases (root promotion, same-
    /// orientation insertion, intermediate-splitter creation).
    pub fn split(
        &mut self,
        target: NodeId,
        new_canvas: C,
        min_height: u16,
        min_width: u16,
        orientation: Orientation,
    ) -> Result<NodeId> {
        if self.arena.get(target.0).and_then(Option::as_ref).is_none() {
            return Err(WmError::NotFound(target));
        }

        let new_id = self.alloc(Node::pane(new_canvas, min_height, min_width));
        let parent = self.node(target).parent;

        match parent {
            None => {
                let (top, left, h, w) = self.rect(target);
                let splitter_canvas = self.node(target).canvas.new_subregion(top, left, h, w);
                let splitter_id = self.alloc(Node::splitter(
                    splitter_canvas,
                    orientation,
                    vec![target, new_id],
                ));
                self.node_mut(target).parent = Some(splitter_id);
                self.node_mut(new_id).parent = Some(splitter_id);
                self.place(splitter_id, top, left, h, w);
                self.root = Some(splitter_id);
                tracing::info!(?splitter_id, "promoted new root splitter");
                self.layout_splitter(splitter_id);
                self.events.push(Event::LayoutChanged(splitter_id));
            }
            Some(p) => {
                let p_orientation = self.orientation(p).expect("parent is a splitter");
                if p_orientation == orientation {
                    self.node_mut(new_id).parent = Some(p);
                    if let NodeKind::Splitter { children, .. } = &mut self.node_mut(p).kind {
                        let idx = children
                            .iter()
                            .position(|&c| c == target)
                            .expect("target is a child of its own parent");
                        children.insert(idx + 1, new_id);
                    }
                    tracing::info!(?p, ?new_id, "inserted pane into existing splitter");
                    self.layout_splitter(p);
                    self.events.push(Event::LayoutChanged(p));
                } else {
                    let (top, left, h, w) = self.rect(target);
                    let splitter_canvas = self.node(target).canvas.new_subregion(top, left, h, w);
                    let splitter_id = self.alloc(Node::splitter(
                        splitter_canvas,
                        orientation,
                        vec![target, new_id],
                    ));
                    self.node_mut(target).parent = Some(splitter_id);
                    self.node_mut(new_id).parent = Some(splitter_id);
                    self.node_mut(splitter_id).parent = Some(p);
                    if let NodeKind::Splitter { children, .. } = &mut self.node_mut(p).kind {
                        let idx = children
                            .iter()
                            .position(|&c| c == target)
                            .expect("target is a child of its own parent");
                        children[idx] = splitter_id;
                    }
                    self.place(splitter_id, top, left, h, w);
                    tracing::info!(?splitter_id, parent = ?p, "created intermediate splitter");
                    self.layout_splitter(p);
                    self.events.push(Event::LayoutChanged(p));
                }
            }
        }

        Ok(new_id)
    }

    // -----------------------------------------------------------------
    // close
    // -----------------------------------------------------------------

    /// Remove `pane` from its containing splitter, collapsing the splitter
    /// if that leaves it with a single child. Errors if `pane` is the root.
    pub fn close(&mut self, pane: NodeId) -> Result<()> {
        if self.arena.get(pane.0).and_then(Option::as_ref).is_none() {
            return Err(WmError::NotFound(pane));
        }
        let p = self
            .node(pane)
            .parent
            .ok_or_else(|| WmError::InvalidArgument("cannot close the root pane".into()))?;

        let was_focused = self.focus == Some(pane);
        let children = match &self.node(p).kind {
            NodeKind::Splitter { children, .. } => children.clone(),
            NodeKind::Pane { .. } => unreachable!("parent is always a splitter"),
        };
        let closed_idx = children.iter().position(|&c| c == pane).expect("pane is a child of p");

        let remaining: Vec<NodeId> = children.iter().copied().filter(|&c| c != pane).collect();
        self.dealloc(pane);

        if remaining.len() >= 2 {
            if let NodeKind::Splitter { children, .. } = &mut self.node_mut(p).kind {
                *children = remaining.clone();
            }
            if was_focused {
                let new_idx = closed_idx.min(remaining.len() - 1);
                self.focus = Some(remaining[new_idx]);
            }
            tracing::info!(?p, "removed pane, splitter remains non-trivial");
            self.layout_splitter(p);
            self.events.push(Event::LayoutChanged(p));
        } else {
            let c = remaining[0];
            let g = self.node(p).parent;
            let (p_top, p_left, p_h, p_w) = self.rect(p);

            // Canvas ownership transfers from the collapsing splitter to
            // the surviving child during splitter collapse.
            let p_node = self.dealloc(p);
            let p_canvas = p_node.canvas;
            self.node_mut(c).canvas = p_canvas;
            self.node_mut(c).parent = g;
            self.place(c, p_top, p_left, p_h, p_w);

            match g {
                Some(g) => {
                    if let NodeKind::Splitter { children, .. } = &mut self.node_mut(g).kind {
                        let idx = children.iter().position(|&x| x == p).expect("p is a child of g");
                        children[idx] = c;
                    }
                    if was_focused {
                        self.focus = Some(self.descend_first_leaf(c));
                    }
                    tracing::info!(collapsed = ?p, survivor = ?c, "splitter collapsed");
                    self.layout_splitter(g);
                    self.events.push(Event::LayoutChanged(g));
                }
                None => {
                    self.root = Some(c);
                    if was_focused {
                        self.focus = Some(self.descend_first_leaf(c));
                    }
                    tracing::info!(survivor = ?c, "root splitter collapsed");
                    if self.node(c).kind.is_splitter() {
                        self.layout_splitter(c);
                    }
                    self.events.push(Event::LayoutChanged(c));
                }
            }
        }

        Ok(())
    }

    fn descend_first_leaf(&self, mut id: NodeId) -> NodeId {
        while let NodeKind::Splitter { children, .. } = &self.node(id).kind {
            id = children[0];
        }
        id
    }

    // -----------------------------------------------------------------
    // arena plumbing
    // -----------------------------------------------------------------

    fn alloc(&mut self, node: Node<C>) -> NodeId {
        if let Some(idx) = self.free.pop() {
            self.arena[idx] = Some(node);
            NodeId(idx)
        } else {
            self.arena.push(Some(node));
            NodeId(self.arena.len() - 1)
        }
    }

    fn dealloc(&mut self, id: NodeId) -> Node<C> {
        let node = self.arena[id.0].take().expect("dealloc of live node");
        self.free.push(id.0);
        node
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<C> {
        self.arena[id.0].as_ref().expect("dangling NodeId")
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<C> {
        self.arena[id.0].as_mut().expect("dangling NodeId")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::NullCanvas;

    fn tree_with_root() -> Tree<NullCanvas> {
        Tree::new_tree(NullCanvas::new(0, 0, 24, 80), 1, 1)
    }

    #[test]
    fn new_tree_has_single_focused_root() {
        let tree = tree_with_root();
        let root = tree.root().unwrap();
        assert_eq!(tree.focused(), Some(root));
        assert!(!tree.is_splitter(root));
        assert_eq!(tree.pane_count(), 1);
    }

    #[test]
    fn split_promotes_new_root_splitter() {
        let mut tree = tree_with_root();
        let a = tree.root().unwrap();
        let b = tree
            .split(a, NullCanvas::default(), 1, 1, Orientation::Horizontal)
            .unwrap();

        let root = tree.root().unwrap();
        assert!(tree.is_splitter(root));
        assert_eq!(tree.children(root), Some(&[a, b][..]));
        assert_eq!(tree.pane_count(), 2);

        let (_, _, ha, _) = tree.rect(a);
        let (_, _, hb, _) = tree.rect(b);
        assert!((ha as i32 - hb as i32).abs() <= 1);
    }

    #[test]
    fn split_different_orientation_creates_intermediate_splitter() {
        let mut tree = tree_with_root();
        let a = tree.root().unwrap();
        let b = tree
            .split(a, NullCanvas::default(), 1, 1, Orientation::Horizontal)
            .unwrap();
        tree.focus(a).unwrap();
        let c = tree
            .split(a, NullCanvas::default(), 1, 1, Orientation::Vertical)
            .unwrap();

        let root = tree.root().unwrap();
        let top_children = tree.children(root).unwrap().to_vec();
        assert_eq!(top_children.len(), 2);
        assert_eq!(top_children[1], b);
        let inner = top_children[0];
        assert!(tree.is_splitter(inner));
        assert_eq!(tree.children(inner), Some(&[a, c][..]));
    }

    #[test]
    fn close_with_three_children_drops_slot() {
        let mut tree = tree_with_root();
        let a = tree.root().unwrap();
        let b = tree
            .split(a, NullCanvas::default(), 1, 1, Orientation::Horizontal)
            .unwrap();
        let c = tree
            .split(b, NullCanvas::default(), 1, 1, Orientation::Horizontal)
            .unwrap();
        tree.focus(b).unwrap();

        tree.close(b).unwrap();

        let root = tree.root().unwrap();
        assert_eq!(tree.children(root), Some(&[a, c][..]));
        assert_eq!(tree.focused(), Some(c));
    }

    #[test]
    fn close_collapses_splitter_to_surviving_child() {
        let mut tree = tree_with_root();
        let a = tree.root().unwrap();
        let b = tree
            .split(a, NullCanvas::default(), 1, 1, Orientation::Horizontal)
            .unwrap();
        tree.focus(b).unwrap();

        tree.close(b).unwrap();

        assert_eq!(tree.root(), Some(a));
        assert!(!tree.is_splitter(a));
        assert_eq!(tree.focused(), Some(a));
        assert_eq!(tree.pane_count(), 1);
    }

    #[test]
    fn close_root_pane_errors() {
        let mut tree = tree_with_root();
        let a = tree.root().unwrap();
        assert!(matches!(tree.close(a), Err(WmError::InvalidArgument(_))));
    }

    #[test]
    fn split_and_close_each_emit_a_layout_changed_event() {
        let mut tree = tree_with_root();
        let a = tree.root().unwrap();
        assert!(tree.drain_events().is_empty());

        let b = tree
            .split(a, NullCanvas::default(), 1, 1, Orientation::Horizontal)
            .unwrap();
        let events = tree.drain_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], Event::LayoutChanged(_)));
        assert!(tree.drain_events().is_empty(), "drain_events must clear the queue");

        tree.close(b).unwrap();
        let events = tree.drain_events();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn notify_redraw_pushes_a_redraw_requested_event() {
        let mut tree = tree_with_root();
        let a = tree.root().unwrap();
        tree.notify_redraw(a);
        let events = tree.drain_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], Event::RedrawRequested(id) if id == a));
    }
}
