use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::{cursor, execute, terminal};
use log::{debug, info};

use display::{Display, ROWS};
use emu8_core::constants::{KEY_COUNT, TIMER_HZ};
use emu8_core::{Chip8, Config, Host, Recorder};

use crate::keymap::keymap;

/// How long the loop waits for input before letting time pass
const FRAME: Duration = Duration::from_millis(1000 / TIMER_HZ as u64);

/// Terminals report presses but rarely releases, so a press holds its key
/// down this long unless the terminal repeats it first
const KEY_HOLD: Duration = Duration::from_millis(150);

/// Raw mode on an alternate screen, restored when dropped
struct Terminal;

impl Terminal {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            terminal::Clear(terminal::ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, ROWS + 1),
            Print("esc to quit"),
        )?;
        Ok(Terminal)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// When each held key should be let go
#[derive(Debug, Default)]
struct Holds {
    until: [Option<Instant>; KEY_COUNT],
}

impl Holds {
    fn press(&mut self, key: u8, now: Instant) {
        if let Some(slot) = self.until.get_mut(key as usize) {
            *slot = Some(now + KEY_HOLD);
        }
    }

    fn release(&mut self, key: u8) {
        if let Some(slot) = self.until.get_mut(key as usize) {
            *slot = None;
        }
    }

    /// Forgets and returns every key whose hold has run out by `now`
    fn expired(&mut self, now: Instant) -> Vec<u8> {
        let mut keys = Vec::new();
        for (key, slot) in self.until.iter_mut().enumerate() {
            if slot.map_or(false, |until| until <= now) {
                *slot = None;
                keys.push(key as u8);
            }
        }
        keys
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    code == KeyCode::Esc || (code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL))
}

/// Runs `program` in the terminal until it faults or escape is pressed
pub fn run(program: &[u8], config: Config) -> Result<()> {
    let _terminal = Terminal::enter().context("unable to set up the terminal")?;
    let mut chip8 = Chip8::with_config(Display::new(io::stdout()), config);
    chip8.start(program)?;

    let mut holds = Holds::default();
    let mut last_tick = Instant::now();

    'event: loop {
        let mut ready = event::poll(FRAME)?;
        while ready {
            match event::read()? {
                Event::Key(KeyEvent {
                    code,
                    modifiers,
                    kind,
                    ..
                }) => {
                    if is_quit(code, modifiers) {
                        break 'event;
                    }
                    match (keymap(code), kind) {
                        (Some(key), KeyEventKind::Release) => {
                            holds.release(key);
                            chip8.key_up(key)?;
                        }
                        (Some(key), _) => {
                            holds.press(key, Instant::now());
                            chip8.key_down(key)?;
                        }
                        (None, _) => debug!("unmapped key {:?}", code),
                    }
                }
                Event::Resize(..) => {
                    execute!(io::stdout(), terminal::Clear(terminal::ClearType::All))?;
                    let frame = *chip8.frame();
                    chip8.host_mut().render(&frame);
                }
                _ => {}
            }
            ready = event::poll(Duration::ZERO)?;
        }

        let now = Instant::now();
        for key in holds.expired(now) {
            chip8.key_up(key)?;
        }
        chip8
            .advance(now - last_tick)
            .context("the program stopped")?;
        last_tick = now;

        if !chip8.should_play_sound() {
            chip8.host_mut().quiet();
        }
    }

    chip8.stop();
    Ok(())
}

/// The nanosecond at which headless frame `frame` begins
fn frame_start(frame: u64) -> u64 {
    frame * 1_000_000_000 / u64::from(TIMER_HZ)
}

/// Runs `program` for `frames` sixtieths of a second with nothing attached
pub fn run_headless(program: &[u8], config: Config, frames: u64) -> Result<Chip8<Recorder>> {
    let mut chip8 = Chip8::with_config(Recorder::new(), config);
    chip8.start(program)?;
    for frame in 0..frames {
        let elapsed = frame_start(frame + 1) - frame_start(frame);
        chip8
            .advance(Duration::from_nanos(elapsed))
            .with_context(|| format!("the program stopped during frame {}", frame))?;
    }
    info!(
        "ran {} frames: {} renders, {} beeps",
        frames,
        chip8.host().renders,
        chip8.host().beeps
    );
    Ok(chip8)
}
