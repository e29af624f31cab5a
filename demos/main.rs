//! Smoke driver for `wm_core`: builds a small split tree and scroller against
//! [`wm_core::canvas::NullCanvas`] and prints a summary. Not a real terminal
//! frontend — a real one would implement `Canvas` over curses/crossterm and
//! wire input events to `Tree`/`Scroller` commands.

use anyhow::Result;
use clap::Parser;
use wm_core::canvas::NullCanvas;
use wm_core::tree::Orientation;
use wm_core::{Scroller, Tree};

/// Exercise the split tree and scroller core against a null terminal surface.
#[derive(Parser, Debug)]
#[command(name = "wm-demo", version, about = "wm-core smoke driver")]
struct Args {
    /// Canvas height in rows.
    #[arg(long, default_value_t = 24)]
    height: u16,

    /// Canvas width in columns.
    #[arg(long, default_value_t = 80)]
    width: u16,
}

fn main() -> Result<()> {
    let _log_guard = wm_core::logging::init();
    let args = Args::parse();

    let root_canvas = NullCanvas::new(0, 0, args.height, args.width);
    let mut tree = Tree::new_tree(root_canvas, 1, 1);
    let a = tree.root().expect("new tree has a root");

    let b = tree.split(a, NullCanvas::default(), 1, 1, Orientation::Horizontal)?;
    let _c = tree.split(b, NullCanvas::default(), 1, 1, Orientation::Vertical)?;

    tracing::info!(panes = tree.pane_count(), "tree built");
    println!("panes: {}", tree.pane_count());

    let mut scroller = Scroller::new(NullCanvas::new(0, 0, args.height, args.width));
    scroller.add_text(b"hello\n[31mwarning[0m\n");
    if scroller.take_redraw() {
        tree.notify_redraw(b);
    }
    println!("scroller lines: {}", scroller.line_count());
    scroller.render(true);

    for event in tree.drain_events() {
        tracing::debug!(?event, "core event");
    }

    Ok(())
}
