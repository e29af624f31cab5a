//! The scroller line buffer: character interpretation, viewport navigation,
//! and colored rendering.

mod interpreter;
mod render;
mod viewport;

use crate::canvas::Canvas;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Cursor {
    row: usize,
    col: u16,
    pos: usize,
}

/// An ordered sequence of lines backed by a Canvas, with a viewport cursor
/// and an in-line write caret.
pub struct Scroller<C: Canvas> {
    lines: Vec<String>,
    cursor: Cursor,
    canvas: C,
    dirty: bool,
}

impl<C: Canvas> Scroller<C> {
    /// Attach to `canvas`. The buffer starts with a single empty line.
    pub fn new(canvas: C) -> Self {
        Scroller {
            lines: vec![String::new()],
            cursor: Cursor::default(),
            canvas,
            dirty: false,
        }
    }

    /// Whether state has changed since the last [`Scroller::take_redraw`].
    /// The scroller has no identity of its own to tag a redraw event with,
    /// so it surfaces a plain dirty flag and leaves pairing it with the
    /// owning pane's id to the embedding composition layer.
    pub fn needs_redraw(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag, returning whether it had been set.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, idx: usize) -> Option<&str> {
        self.lines.get(idx).map(String::as_str)
    }

    /// The viewport's top-left `(row, col)` in line/wrapped-cell
    /// coordinates.
    pub fn viewport(&self) -> (usize, u16) {
        (self.cursor.row, self.cursor.col)
    }

    /// Split `bytes` on newline, interpreting the first segment against the
    /// last buffer line and each subsequent segment against a fresh one.
    pub fn add_text(&mut self, bytes: &[u8]) {
        let mut segments = bytes.split(|&b| b == b'\n');

        let first = segments.next().unwrap_or(&[]);
        let last_idx = self.lines.len() - 1;
        let (line, pos) = interpreter::apply(&self.lines[last_idx], self.cursor.pos, first);
        self.lines[last_idx] = line;
        self.cursor.pos = pos;

        for segment in segments {
            self.cursor.pos = 0;
            let (line, pos) = interpreter::apply("", 0, segment);
            self.lines.push(line);
            self.cursor.pos = pos;
        }

        debug!(lines = self.lines.len(), "scroller buffer updated");
        self.scroll_end();
        self.dirty = true;
    }

    /// Re-attach to a new Canvas placement, preserving the buffer.
    pub fn resize(&mut self, top: u16, left: u16, height: u16, width: u16) {
        self.canvas.resize(height, width);
        self.canvas.move_to(top, left);
        self.canvas.erase();
        let (_, _, _, width) = self.canvas.bounds();
        if self.cursor.col > 0 {
            self.cursor.col = (self.cursor.col / width.max(1)) * width.max(1);
        }
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::NullCanvas;

    fn scroller(width: u16) -> Scroller<NullCanvas> {
        Scroller::new(NullCanvas::new(0, 0, 5, width))
    }

    #[test]
    fn new_scroller_has_one_empty_line() {
        let s = scroller(80);
        assert_eq!(s.line_count(), 1);
        assert_eq!(s.line(0), Some(""));
    }

    #[test]
    fn add_text_without_newline_extends_last_line() {
        let mut s = scroller(80);
        s.add_text(b"hello");
        assert_eq!(s.line_count(), 1);
        assert_eq!(s.line(0), Some("hello"));
    }

    #[test]
    fn add_text_with_newline_creates_new_lines() {
        let mut s = scroller(80);
        s.add_text(b"one\ntwo\nthree");
        assert_eq!(s.line_count(), 3);
        assert_eq!(s.line(0), Some("one"));
        assert_eq!(s.line(1), Some("two"));
        assert_eq!(s.line(2), Some("three"));
    }

    #[test]
    fn scenario_s5_tab_then_overwrite_then_trim() {
        let mut s = scroller(80);
        s.add_text(b"ab\tc\r");
        assert_eq!(s.line(0), Some(format!("ab{}c", " ".repeat(6)).as_str()));
    }

    #[test]
    fn scenario_s6_escape_sequence_retained_in_buffer() {
        let mut s = scroller(10);
        s.add_text(b"[31mhi[0m");
        assert_eq!(s.line(0), Some("[31mhi[0m"));
        assert_eq!(s.line_visual_height(s.line(0).unwrap()), 1);
    }

    #[test]
    fn add_text_scrolls_to_bottom() {
        let mut s = scroller(80);
        s.add_text(b"one\ntwo\nthree");
        assert_eq!(s.cursor.row, 2);
    }

    #[test]
    fn render_does_not_mutate_buffer() {
        let mut s = scroller(20);
        s.add_text(b"hello\nworld");
        let before = s.lines.clone();
        s.render(true);
        assert_eq!(s.lines, before);
    }

    #[test]
    fn add_text_sets_dirty_flag_and_take_redraw_clears_it() {
        let mut s = scroller(20);
        assert!(!s.needs_redraw());
        s.add_text(b"hello");
        assert!(s.needs_redraw());
        assert!(s.take_redraw());
        assert!(!s.needs_redraw());
    }
}
