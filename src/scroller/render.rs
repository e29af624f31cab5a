//! Bare-`[` SGR escape parsing and the bottom-up painter.

use super::Scroller;
use crate::canvas::Canvas;

const BOLD_BIT: u32 = 1 << 16;

struct Segment {
    text: String,
    attrs: u32,
    fg: i16,
    bg: i16,
}

/// Read up to two `;`-separated base-10 integers; non-digits contribute 0
/// without advancing, matching `strtol` on a non-numeric prefix.
fn read_int(bytes: &[u8], pos: &mut usize) -> i64 {
    let start = *pos;
    while *pos < bytes.len() && bytes[*pos].is_ascii_digit() {
        *pos += 1;
    }
    if *pos == start {
        0
    } else {
        std::str::from_utf8(&bytes[start..*pos]).unwrap().parse().unwrap_or(0)
    }
}

/// Attempt to parse an SGR escape starting at `start` (which must point at
/// `[`). Returns `(index_after_m, code0, code1)` on a match.
fn try_parse_sgr(bytes: &[u8], start: usize) -> Option<(usize, i64, i64)> {
    if bytes.get(start) != Some(&b'[') {
        return None;
    }
    let mut pos = start + 1;
    let mut codes = [0i64; 2];
    for code in &mut codes {
        *code = read_int(bytes, &mut pos);
        if bytes.get(pos) == Some(&b';') {
            pos += 1;
        }
    }
    if bytes.get(pos) == Some(&b'm') {
        Some((pos + 1, codes[0], codes[1]))
    } else {
        None
    }
}

fn apply_code(code: i64, attrs: &mut u32, fg: &mut i16, bg: &mut i16) {
    match code {
        1..=8 => *attrs |= code as u32,
        30..=37 => *fg = (code % 10) as i16,
        40..=47 => *bg = (code % 10) as i16,
        90..=97 => {
            *fg = (code % 10) as i16;
            *attrs |= BOLD_BIT;
        }
        100..=107 => {
            *bg = (code % 10) as i16;
            *attrs |= BOLD_BIT;
        }
        _ => {}
    }
}

/// Segment a line into literal-text runs with the SGR attributes active at
/// each run. Unmatched `[` sequences are kept as literal text.
fn segments(line: &str) -> Vec<Segment> {
    let bytes = line.as_bytes();
    let len = bytes.len();
    let mut out = Vec::new();
    let mut start = 0usize;

    while start < len {
        let search_from = start + 1;
        let next_bracket = bytes
            .get(search_from..)
            .and_then(|rest| rest.iter().position(|&b| b == b'['))
            .map(|i| i + search_from);
        let segment_end = next_bracket.unwrap_or(len);

        let mut text_start = start;
        let mut attrs = 0u32;
        let mut fg = -1i16;
        let mut bg = -1i16;

        if bytes[start] == b'[' {
            if let Some((after_m, c0, c1)) = try_parse_sgr(bytes, start) {
                apply_code(c0, &mut attrs, &mut fg, &mut bg);
                apply_code(c1, &mut attrs, &mut fg, &mut bg);
                text_start = after_m;
            }
        }

        let text = String::from_utf8_lossy(&bytes[text_start..segment_end]).into_owned();
        out.push(Segment {
            text,
            attrs,
            fg,
            bg,
        });
        start = segment_end;
    }

    out
}

/// `max(1, ceil(L/W))`, matching the source's decrement loop.
fn visual_height(visible_len: usize, width: usize) -> usize {
    if visible_len == 0 || width == 0 {
        1
    } else {
        (visible_len + width - 1) / width
    }
}

fn visible_len(line: &str) -> usize {
    segments(line).iter().map(|s| s.text.chars().count()).sum()
}

impl<C: Canvas> Scroller<C> {
    /// Number of visual rows `line` occupies at the scroller's current width.
    pub fn line_visual_height(&self, line: &str) -> usize {
        let (_, _, _, width) = self.canvas.bounds();
        visual_height(visible_len(line), width as usize)
    }

    pub fn render(&mut self, focused: bool) {
        let (_, _, height, width) = self.canvas.bounds();
        let mut pair_no: u16 = 100;
        let mut row = self.cursor.row as i64;
        let mut nlines: u16 = 1;
        let mut cursor_col: u16 = 0;

        while nlines <= height {
            if row < 0 {
                let line_no = height - nlines;
                self.canvas.move_cursor(line_no, 0);
                self.canvas.clear_to_end_of_line();
                nlines += 1;
                continue;
            }

            let line = self.lines[row as usize].clone();
            let line_height = self.line_visual_height(&line).max(1) as u16;

            for h in 0..line_height {
                let line_no = height.saturating_sub(nlines + h);
                self.canvas.move_cursor(line_no, 0);
                self.canvas.clear_to_end_of_line();
            }

            let segs = segments(&line);
            let base_row = height.saturating_sub(nlines + line_height - 1);
            let mut col: u16 = 0;
            let mut total_len: u16 = 0;
            for seg in &segs {
                pair_no += 1;
                self.canvas.register_color_pair(pair_no, seg.fg, seg.bg);
                self.canvas.set_color_pair(pair_no);
                self.canvas.set_attributes(seg.attrs);
                let cur_row = base_row + col / width.max(1);
                let cur_col = col % width.max(1);
                self.canvas.move_cursor(cur_row, cur_col);
                self.canvas.print(&seg.text);
                let clen = seg.text.chars().count() as u16;
                col += clen;
                total_len += clen;
            }

            if nlines == 1 {
                cursor_col = total_len % width.max(1);
            }

            row -= 1;
            nlines += line_height;
        }

        let last_line_idx = self.lines.len() - 1;
        let tail_len = if self.cursor.row == last_line_idx {
            self.lines[last_line_idx]
                .len()
                .saturating_sub(self.cursor.col as usize)
        } else {
            usize::MAX
        };

        if focused && self.cursor.row == last_line_idx && tail_len <= width as usize {
            self.canvas.show_cursor(true);
            let col = self.cursor.pos.min(cursor_col as usize) as u16;
            self.canvas.move_cursor(height.saturating_sub(1), col);
        } else {
            self.canvas.show_cursor(false);
        }

        self.canvas.refresh();
    }
}
