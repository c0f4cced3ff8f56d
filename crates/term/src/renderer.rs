//! TerminalRenderer: flushes rendered board text to a real terminal.
//!
//! Every frame is a full redraw. Color letters on board rows are tinted;
//! footer and status lines use the terminal's default style.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::types;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Clear the screen and draw `text` from the top-left corner.
    pub fn draw(&mut self, text: &str) -> Result<()> {
        self.buf.clear();
        encode_full_into(text, &mut self.buf)?;
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode a full-frame redraw of `text` into `out`.
///
/// Raw mode does not translate `\n`, so lines are joined with `\r\n`.
pub fn encode_full_into(text: &str, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            out.queue(Print("\r\n"))?;
        }
        if line.starts_with('|') {
            encode_board_line_into(line, out)?;
        } else {
            out.queue(Print(line))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn encode_board_line_into(line: &str, out: &mut Vec<u8>) -> Result<()> {
    let mut current: Option<Color> = None;
    for ch in line.chars() {
        let tint = letter_color(ch);
        if tint != current {
            match tint {
                Some(color) => out.queue(SetForegroundColor(color))?,
                None => out.queue(ResetColor)?,
            };
            current = tint;
        }
        out.queue(Print(ch))?;
    }
    if current.is_some() {
        out.queue(ResetColor)?;
    }
    Ok(())
}

fn letter_color(ch: char) -> Option<Color> {
    let color = match types::Color::from_char(ch)? {
        types::Color::Red => Color::Red,
        types::Color::Yellow => Color::Yellow,
        types::Color::Blue => Color::Blue,
    };
    Some(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_redraw_joins_lines_with_crlf() {
        let mut out = Vec::new();
        encode_full_into("|   |\n --- \n", &mut out).unwrap();
        let s = String::from_utf8(out).unwrap();
        assert!(s.contains("|   |\r\n --- "));
        assert!(!s.ends_with("\r\n"));
    }

    #[test]
    fn test_letters_are_tinted() {
        let mut out = Vec::new();
        encode_board_line_into("| R |", &mut out).unwrap();
        let s = String::from_utf8(out).unwrap();
        assert!(s.contains('R'));
        assert!(s.contains("\u{1b}["));

        let mut plain = Vec::new();
        encode_board_line_into("| - |", &mut plain).unwrap();
        assert_eq!(String::from_utf8(plain).unwrap(), "| - |");

        let mut status = Vec::new();
        encode_full_into("GAME OVER", &mut status).unwrap();
        assert!(String::from_utf8(status).unwrap().contains("GAME OVER"));
    }
}
