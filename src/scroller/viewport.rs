//! Viewport navigation: `scroll_up`/`scroll_down`/`scroll_home`/`scroll_end`.
//!
//! Cursor arithmetic here uses raw line length (including any embedded
//! escape bytes), distinct from the escape-aware visual height used by the
//! renderer in `render.rs`. A line carrying SGR sequences will therefore
//! scroll slightly differently than it renders — scrolling and rendering
//! are deliberately kept as separate concerns rather than unified.

use super::Scroller;
use crate::canvas::Canvas;

impl<C: Canvas> Scroller<C> {
    fn width(&self) -> i64 {
        let (_, _, _, w) = self.canvas.bounds();
        w.max(1) as i64
    }

    fn snap_col(&mut self) {
        let width = self.width();
        if self.cursor.col > 0 {
            let col = self.cursor.col as i64;
            self.cursor.col = ((col / width) * width) as u16;
        }
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.snap_col();
        let width = self.width();
        for _ in 0..n {
            if self.cursor.col > 0 {
                self.cursor.col = (self.cursor.col as i64 - width).max(0) as u16;
            } else if self.cursor.row > 0 {
                self.cursor.row -= 1;
                let length = self.lines[self.cursor.row].len() as i64;
                self.cursor.col = if length > width {
                    (((length - 1) / width) * width) as u16
                } else {
                    0
                };
            } else {
                break;
            }
        }
        self.dirty = true;
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.snap_col();
        let width = self.width();
        for _ in 0..n {
            let length = self.lines[self.cursor.row].len() as i64;
            if (self.cursor.col as i64) < length - width {
                self.cursor.col += width as u16;
            } else if self.cursor.row + 1 < self.lines.len() {
                self.cursor.row += 1;
                self.cursor.col = 0;
            } else {
                break;
            }
        }
        self.dirty = true;
    }

    pub fn scroll_home(&mut self) {
        self.cursor.row = 0;
        self.cursor.col = 0;
        self.dirty = true;
    }

    pub fn scroll_end(&mut self) {
        let width = self.width();
        self.cursor.row = self.lines.len() - 1;
        let length = self.lines[self.cursor.row].len() as i64;
        self.cursor.col = ((length / width) * width) as u16;
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::NullCanvas;

    fn scroller_with(lines: &[&str], width: u16) -> Scroller<NullCanvas> {
        let canvas = NullCanvas::new(0, 0, 2, width);
        let mut s = Scroller::new(canvas);
        s.lines = lines.iter().map(|l| l.to_string()).collect();
        s
    }

    #[test]
    fn scroll_home_then_scroll_down_past_end_reaches_scroll_end() {
        let mut s = scroller_with(&["a", "b", "c"], 10);
        s.scroll_home();
        s.scroll_down(100);
        let mut end = scroller_with(&["a", "b", "c"], 10);
        end.scroll_end();
        assert_eq!(s.cursor, end.cursor);
    }

    #[test]
    fn scroll_end_is_idempotent() {
        let mut s = scroller_with(&["a", "b", "c"], 10);
        s.scroll_end();
        let after_first = s.cursor;
        s.scroll_end();
        assert_eq!(s.cursor, after_first);
    }

    #[test]
    fn scroll_up_stops_at_top() {
        let mut s = scroller_with(&["a", "b"], 10);
        s.scroll_up(50);
        assert_eq!(s.cursor.row, 0);
        assert_eq!(s.cursor.col, 0);
    }

    #[test]
    fn wide_line_occupies_multiple_visual_rows_for_scrolling() {
        let long = "x".repeat(25);
        let mut s = scroller_with(&[&long], 10);
        s.scroll_home();
        s.scroll_down(1);
        assert_eq!(s.cursor.row, 0);
        assert_eq!(s.cursor.col, 10);
        s.scroll_down(1);
        assert_eq!(s.cursor.col, 20);
    }
}
