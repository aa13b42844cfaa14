use std::io::{self, Write};

use crossterm::style::Print;
use crossterm::{cursor, queue};
use log::warn;

use emu8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use emu8_core::{FrameBuffer, Host};

const BELL: &str = "\x07";

/// Number of terminal rows a frame occupies
pub const ROWS: u16 = (DISPLAY_HEIGHT / 2) as u16;

/// Formats a Chip-8 FrameBuffer as lines of text.
///
/// Pairs of rows are folded into one line of characters:
/// - ' ' neither pixel is lit
/// - '▀' only the upper pixel is lit
/// - '▄' only the lower pixel is lit
/// - '█' both pixels are lit
///
/// # Arguments
/// * `frame` a Chip-8 FrameBuffer
pub fn frame_to_text(frame: &FrameBuffer) -> Vec<String> {
    frame
        .chunks(2)
        .map(|rows| {
            (0..DISPLAY_WIDTH)
                .map(|x| {
                    let upper = rows[0][x];
                    let lower = rows.get(1).map_or(false, |row| row[x]);
                    match (upper, lower) {
                        (false, false) => ' ',
                        (true, false) => '▀',
                        (false, true) => '▄',
                        (true, true) => '█',
                    }
                })
                .collect()
        })
        .collect()
}

/// # Display
/// The Chip-8 display is composed of 64x32 black/white pixels.
/// The on/off state of these pixels is encoded as true/false in a 2d array.
///
/// A terminal cell is roughly twice as tall as it is wide, so each cell shows
/// two vertically stacked pixels using half-block characters and the whole
/// frame fits in 64x16 cells.
///
/// The display only gets a call to `render` when the Chip-8 FrameBuffer is updated.
pub struct Display<W: Write> {
    out: W,
    sounding: bool,
}

impl<W: Write> Display<W> {
    /// Creates a new display drawing to `out`, usually stdout in raw mode
    pub fn new(out: W) -> Self {
        Display {
            out,
            sounding: false,
        }
    }

    /// The sound timer has run out; the next beep rings the bell again
    pub fn quiet(&mut self) {
        self.sounding = false;
    }

    pub fn is_sounding(&self) -> bool {
        self.sounding
    }

    fn draw(&mut self, frame: &FrameBuffer) -> io::Result<()> {
        for (row, line) in frame_to_text(frame).iter().enumerate() {
            queue!(self.out, cursor::MoveTo(0, row as u16), Print(line))?;
        }
        self.out.flush()
    }

    fn ring(&mut self) -> io::Result<()> {
        queue!(self.out, Print(BELL))?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Host for Display<W> {
    fn render(&mut self, frame: &FrameBuffer) {
        if let Err(e) = self.draw(frame) {
            warn!("unable to draw frame: {}", e);
        }
    }

    /// Rings the terminal bell once each time the sound timer starts running
    fn beep(&mut self) {
        if self.sounding {
            return;
        }
        self.sounding = true;
        if let Err(e) = self.ring() {
            warn!("unable to ring bell: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Buffer = Display<Vec<u8>>;

    #[test]
    fn test_frame_to_text() {
        let mut frame: FrameBuffer = [[false; 64]; 32];
        frame[0][0..4].copy_from_slice(&[false, true, false, true]);
        frame[1][0..4].copy_from_slice(&[false, false, true, true]);
        frame[31][63] = true;
        let text = frame_to_text(&frame);

        assert_eq!(text.len(), 16);
        assert!(text.iter().all(|line| line.chars().count() == 64));
        assert!(text[0].starts_with(" ▀▄█ "));
        assert!(text[15].ends_with(" ▄"));
        assert_eq!(text[7], " ".repeat(64));
    }

    #[test]
    fn test_render_writes_every_row() {
        let mut display = Buffer::new(Vec::new());
        let mut frame: FrameBuffer = [[false; 64]; 32];
        frame[2][5] = true;
        display.render(&frame);

        let written = String::from_utf8(display.into_inner()).unwrap();
        assert_eq!(written.matches('▀').count(), 1);
        assert_eq!(written.matches(' ').count(), 64 * 16 - 1);
    }

    #[test]
    fn test_beep_rings_once_per_sound() {
        let mut display = Buffer::new(Vec::new());
        display.beep();
        display.beep();
        display.beep();
        assert!(display.is_sounding());
        display.quiet();
        display.beep();

        let written = String::from_utf8(display.into_inner()).unwrap();
        assert_eq!(written.matches(BELL).count(), 2);
    }

    #[test]
    fn test_rows() {
        assert_eq!(ROWS, 16);
        assert_eq!(frame_to_text(&[[true; 64]; 32]).len(), ROWS as usize);
    }
}
