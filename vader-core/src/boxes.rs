//! Box-drawing primitives.
//!
//! Widths are counted in `char`s. Emoji that occupy two terminal columns are
//! not compensated for, so lines carrying them may render one column wider.

use std::io::{self, Write};

const TOP_LEFT: char = '┌';
const TOP_RIGHT: char = '┐';
const BOTTOM_LEFT: char = '└';
const BOTTOM_RIGHT: char = '┘';
const SIDE: char = '│';
const RULE: char = '─';

/// Horizontal placement of a standalone line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Centers `text` in `width` columns. An odd margin puts the extra fill
/// character on the left when `width` is odd, on the right otherwise.
pub fn center(text: &str, width: usize, fill: char) -> String {
    let len = char_len(text);
    if width <= len {
        return text.to_string();
    }

    let margin = width - len;
    let left = margin / 2 + (margin & width & 1);
    let right = margin - left;

    let mut out = String::with_capacity(text.len() + margin * fill.len_utf8());
    out.extend(std::iter::repeat_n(fill, left));
    out.push_str(text);
    out.extend(std::iter::repeat_n(fill, right));
    out
}

/// Pads `text` on the right to `width` columns. Longer text is left as is.
pub fn ljust(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(char_len(text));
    format!("{text}{}", " ".repeat(pad))
}

/// Top border with `text` set inside two spaces of padding.
pub fn title(text: &str, width: usize) -> String {
    format!("{TOP_LEFT}{}{TOP_RIGHT}", center(&format!("  {text}  "), width, RULE))
}

/// Content line: border, one space, `text` padded to `width`, border.
pub fn body(text: &str, width: usize) -> String {
    format!("{SIDE} {}{SIDE}", ljust(text, width))
}

/// Content line with `text` centered between the borders.
pub fn centered_body(text: &str, width: usize) -> String {
    format!("{SIDE}{}{SIDE}", center(text, width, ' '))
}

pub fn footer(width: usize) -> String {
    let rule: String = std::iter::repeat_n(RULE, width).collect();
    format!("{BOTTOM_LEFT}{rule}{BOTTOM_RIGHT}")
}

/// Borderless line, used for the icon above a box.
pub fn header(text: &str, width: usize, align: Align) -> String {
    match align {
        Align::Left => ljust(text, width),
        Align::Center => center(text, width, ' '),
    }
}

pub fn paired_title(left: &str, right: &str, width: usize) -> String {
    title(left, width) + &title(right, width)
}

pub fn paired_body(left: &str, right: &str, width: usize) -> String {
    body(left, width) + &body(right, width)
}

pub fn paired_centered_body(left: &str, right: &str, width: usize) -> String {
    centered_body(left, width) + &centered_body(right, width)
}

pub fn paired_footer(width: usize) -> String {
    footer(width) + &footer(width)
}

pub fn paired_header(left: &str, right: &str, width: usize, align: Align) -> String {
    header(left, width, align) + &header(right, width, align)
}

/// Writes whole boxes to a sink.
///
/// `width` is the content width of a body line. Body lines carry a leading
/// space inside the left border, so frame lines are built one column wider
/// and every line of a box ends up `width + 3` columns.
pub struct BoxWriter<'a, W: Write + ?Sized> {
    out: &'a mut W,
    width: usize,
    indent: usize,
}

impl<'a, W: Write + ?Sized> BoxWriter<'a, W> {
    pub fn new(out: &'a mut W, width: usize) -> Self {
        Self { out, width, indent: 0 }
    }

    /// Shifts every subsequent line right by `indent` spaces.
    pub fn set_indent(&mut self, indent: usize) {
        self.indent = indent;
    }

    /// Rendered width of one box, borders included.
    pub fn box_width(&self) -> usize {
        self.width + 3
    }

    fn frame_width(&self) -> usize {
        self.width + 1
    }

    fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}{}", " ".repeat(self.indent), text.trim_end())
    }

    pub fn header(&mut self, text: &str) -> io::Result<()> {
        let line = header(text, self.box_width(), Align::Center);
        self.line(&line)
    }

    pub fn title(&mut self, text: &str) -> io::Result<()> {
        let line = title(text, self.frame_width());
        self.line(&line)
    }

    pub fn subheader(&mut self, text: &str) -> io::Result<()> {
        let line = centered_body(text, self.frame_width());
        self.line(&line)
    }

    pub fn body(&mut self, text: &str) -> io::Result<()> {
        let line = body(text, self.width);
        self.line(&line)
    }

    pub fn footer(&mut self) -> io::Result<()> {
        let line = footer(self.frame_width());
        self.line(&line)
    }

    pub fn paired_header(&mut self, left: &str, right: &str) -> io::Result<()> {
        let line = paired_header(left, right, self.box_width(), Align::Center);
        self.line(&line)
    }

    pub fn paired_title(&mut self, left: &str, right: &str) -> io::Result<()> {
        let line = paired_title(left, right, self.frame_width());
        self.line(&line)
    }

    pub fn paired_subheader(&mut self, left: &str, right: &str) -> io::Result<()> {
        let line = paired_centered_body(left, right, self.frame_width());
        self.line(&line)
    }

    pub fn paired_body(&mut self, left: &str, right: &str) -> io::Result<()> {
        let line = paired_body(left, right, self.width);
        self.line(&line)
    }

    pub fn paired_footer(&mut self) -> io::Result<()> {
        let line = paired_footer(self.frame_width());
        self.line(&line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn width_of(line: &str) -> usize {
        line.chars().count()
    }

    #[test]
    fn center_matches_odd_margin_rule() {
        assert_eq!(center("ab", 5, '*'), "**ab*");
        assert_eq!(center("abc", 6, '*'), "*abc**");
        assert_eq!(center("ab", 7, '*'), "***ab**");
        assert_eq!(center("abcd", 2, '*'), "abcd");
    }

    #[test]
    fn body_is_width_plus_three() {
        for text in ["", "X", "123456789"] {
            assert_eq!(width_of(&body(text, 10)), 13, "text: {text:?}");
        }
        assert_eq!(body("X", 10), "│ X         │");
    }

    #[test]
    fn body_does_not_truncate_long_text() {
        assert_eq!(body("too long for it", 4), "│ too long for it│");
    }

    #[test]
    fn title_centers_text_in_rule() {
        let line = title("Lund", 20);

        assert_eq!(width_of(&line), 22);
        assert!(line.starts_with('┌'));
        assert!(line.ends_with('┐'));
        assert!(line.contains("  Lund  "));
        assert_eq!(line, "┌──────  Lund  ──────┐");
    }

    #[test]
    fn footer_is_rule_between_corners() {
        assert_eq!(footer(4), "└────┘");
        assert_eq!(width_of(&footer(40)), 42);
    }

    #[test]
    fn header_alignment() {
        assert_eq!(header("ab", 6, Align::Center), "  ab  ");
        assert_eq!(header("ab", 6, Align::Left), "ab    ");
    }

    #[test]
    fn paired_lines_concatenate_without_separator() {
        assert_eq!(paired_footer(2), "└──┘└──┘");
        assert_eq!(paired_body("a", "b", 2), "│ a ││ b │");
        assert_eq!(paired_title("a", "b", 5), "┌  a  ┐┌  b  ┐");
    }

    #[test]
    fn writer_frames_line_up_with_bodies() {
        let mut out = Vec::new();
        let mut writer = BoxWriter::new(&mut out, 12);

        writer.title("Kiruna").unwrap();
        writer.subheader("Norrbotten").unwrap();
        writer.body("-3 °C").unwrap();
        writer.footer().unwrap();

        let text = String::from_utf8(out).unwrap();
        let widths: Vec<usize> = text.lines().map(width_of).collect();
        assert_eq!(widths, vec![15, 15, 15, 15]);
    }

    #[test]
    fn writer_applies_indent() {
        let mut out = Vec::new();
        let mut writer = BoxWriter::new(&mut out, 2);
        writer.set_indent(3);
        writer.footer().unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "   └───┘\n");
    }
}
