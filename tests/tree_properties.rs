//! Property tests for the split tree's structural invariants: closure
//! (every node is reachable and well-formed), area conservation, minimum
//! sizes respected, and resize locality, driven by random
//! `split`/`close`/`resize` sequences.

use proptest::prelude::*;
use wm_core::canvas::NullCanvas;
use wm_core::tree::Orientation;
use wm_core::Tree;

#[derive(Debug, Clone, Copy)]
enum Op {
    Split { orientation_h: bool, target_seed: usize },
    Close { target_seed: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<bool>(), any::<usize>())
            .prop_map(|(orientation_h, target_seed)| Op::Split { orientation_h, target_seed }),
        any::<usize>().prop_map(|target_seed| Op::Close { target_seed }),
    ]
}

/// Every leaf reachable from `root`, by walking the tree through the
/// public navigation accessors (no internal arena access).
fn leaves(tree: &Tree<NullCanvas>, id: wm_core::tree::NodeId) -> Vec<wm_core::tree::NodeId> {
    match tree.children(id) {
        None => vec![id],
        Some(children) => children.iter().flat_map(|&c| leaves(tree, c)).collect(),
    }
}

fn all_nodes(tree: &Tree<NullCanvas>, id: wm_core::tree::NodeId, out: &mut Vec<wm_core::tree::NodeId>) {
    out.push(id);
    if let Some(children) = tree.children(id) {
        for &c in children {
            all_nodes(tree, c, out);
        }
    }
}

/// Property 1: every internal splitter has >= 2 children; every non-root
/// node's parent lists it exactly once.
fn assert_tree_closure(tree: &Tree<NullCanvas>) {
    let root = tree.root().expect("tree is never empty in this test");
    let mut nodes = Vec::new();
    all_nodes(tree, root, &mut nodes);

    for &id in &nodes {
        if let Some(children) = tree.children(id) {
            assert!(children.len() >= 2, "splitter {:?} has fewer than 2 children", id);
        }
        if id != root {
            let parent = tree.parent(id).unwrap_or_else(|| panic!("non-root {:?} has no parent", id));
            let siblings = tree.children(parent).expect("parent is always a splitter");
            assert_eq!(
                siblings.iter().filter(|&&c| c == id).count(),
                1,
                "node {:?} must appear exactly once in its parent's child list",
                id
            );
        }
    }
}

/// Property 2: area conservation — child dims on axis (+ separators) sum to
/// the splitter's dim on that axis; cross-axis dims equal the splitter's.
fn assert_area_conservation(tree: &Tree<NullCanvas>, id: wm_core::tree::NodeId) {
    let Some(children) = tree.children(id) else {
        return;
    };
    let orientation = tree.orientation(id).unwrap();
    let (_, _, p_h, p_w) = tree.rect(id);

    let mut on_axis_sum: i64 = 0;
    for &c in children {
        let (_, _, c_h, c_w) = tree.rect(c);
        match orientation {
            Orientation::Horizontal => {
                on_axis_sum += c_h as i64;
                assert_eq!(c_w, p_w, "child {:?} cross-axis width must equal parent's", c);
            }
            Orientation::Vertical => {
                on_axis_sum += c_w as i64;
                assert_eq!(c_h, p_h, "child {:?} cross-axis height must equal parent's", c);
            }
        }
    }

    let separators = match orientation {
        Orientation::Horizontal => 0,
        Orientation::Vertical => children.len() as i64 - 1,
    };
    let expected = match orientation {
        Orientation::Horizontal => p_h as i64,
        Orientation::Vertical => p_w as i64,
    };
    assert_eq!(on_axis_sum + separators, expected, "area not conserved at splitter {:?}", id);

    for &c in children {
        assert_area_conservation(tree, c);
    }
}

/// Property 3: after layout, every pane's dims are >= its minimum.
fn assert_minimums_respected(tree: &Tree<NullCanvas>) {
    let root = tree.root().unwrap();
    for leaf in leaves(tree, root) {
        let (mh, mw) = tree.minimum_size(leaf);
        let (_, _, h, w) = tree.rect(leaf);
        assert!(h >= mh, "pane {:?} height {} below minimum {}", leaf, h, mh);
        assert!(w >= mw, "pane {:?} width {} below minimum {}", leaf, w, mw);
    }
}

proptest! {
    #[test]
    fn tree_invariants_hold_after_random_split_close_sequences(
        ops in prop::collection::vec(op_strategy(), 1..20),
    ) {
        // Minimums of (1, 1) against a generous canvas keep every reachable
        // split count comfortably satisfiable, so property 3 isn't flaky on
        // configurations this short sequence can't actually make feasible.
        let mut tree = Tree::new_tree(NullCanvas::new(0, 0, 60, 200), 1, 1);

        for op in ops {
            match op {
                Op::Split { orientation_h, target_seed } => {
                    let root = tree.root().unwrap();
                    let mut candidates = Vec::new();
                    all_nodes(&tree, root, &mut candidates);
                    let target = candidates[target_seed % candidates.len()];
                    let orientation = if orientation_h {
                        Orientation::Horizontal
                    } else {
                        Orientation::Vertical
                    };
                    // Splitting a splitter node (not just a pane) is not a
                    // legal operation in this model; only attempt on panes.
                    if tree.children(target).is_none() {
                        let _ = tree.split(target, NullCanvas::default(), 1, 1, orientation);
                    }
                }
                Op::Close { target_seed } => {
                    let root = tree.root().unwrap();
                    let ls = leaves(&tree, root);
                    if ls.len() > 1 {
                        let target = ls[target_seed % ls.len()];
                        let _ = tree.close(target);
                    }
                }
            }

            assert_tree_closure(&tree);
            let root = tree.root().unwrap();
            assert_area_conservation(&tree, root);
            assert_minimums_respected(&tree);
        }
    }
}

/// Property 4: resize locality — resizing one pane does not change the
/// total area of its containing splitter, nor any pane outside it.
#[test]
fn resize_is_local_to_its_containing_splitter() {
    let mut tree = Tree::new_tree(NullCanvas::new(0, 0, 30, 100), 2, 5);
    let a = tree.root().unwrap();
    let b = tree
        .split(a, NullCanvas::default(), 2, 5, Orientation::Horizontal)
        .unwrap();
    // Give the horizontal splitter a vertical sibling so there's a pane
    // entirely outside the splitter under resize.
    let outer_root = tree.root().unwrap();
    let c = tree
        .split(outer_root, NullCanvas::default(), 2, 5, Orientation::Vertical)
        .unwrap();

    let (_, _, c_h_before, c_w_before) = tree.rect(c);
    let containing = tree.parent(a).unwrap();
    let (_, _, splitter_h_before, splitter_w_before) = tree.rect(containing);
    let (_, _, _, a_w_before) = tree.rect(a);
    let (_, _, _, b_w_before) = tree.rect(b);

    tree.resize(a, Orientation::Horizontal, 10).unwrap();

    let (_, _, c_h_after, c_w_after) = tree.rect(c);
    assert_eq!((c_h_before, c_w_before), (c_h_after, c_w_after), "sibling outside the splitter must be untouched");

    let (_, _, splitter_h_after, splitter_w_after) = tree.rect(containing);
    assert_eq!(
        (splitter_h_before, splitter_w_before),
        (splitter_h_after, splitter_w_after),
        "resize must not change the containing splitter's own area"
    );

    let (_, _, a_h_after, a_w_after) = tree.rect(a);
    let (_, _, b_h_after, b_w_after) = tree.rect(b);
    assert_eq!(a_w_after, a_w_before, "cross-axis width unaffected by a horizontal resize");
    assert_eq!(b_w_after, b_w_before);
    assert_eq!(a_h_after, 10);
    assert_eq!(a_h_after + b_h_after, splitter_h_after);
}
