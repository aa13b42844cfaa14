use std::time::Duration;

use log::{debug, info, warn};

use crate::clock::{Clock, Tick};
use crate::config::Config;
use crate::error::{Chip8Error, Result};
use crate::host::Host;
use crate::instruction::{self, StepResult};
use crate::keypad::Keypad;
use crate::loader;
use crate::state::{FrameBuffer, State};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - the current `state` of the machine
///  - the `keypad` with public interfaces for pressing and releasing keys
///  - a `clock` that paces the CPU and the 60Hz timers
///  - the `host` that is told when to render and when to beep
///
/// Supplies interfaces for:
/// - starting a program and stopping it
/// - letting time pass, either by a measured `Duration` or one cycle at a time
/// - inspecting its frame buffer and sound state
///
/// A fatal error stops the machine. It is returned from the call that hit it
/// and kept in `fault` until the next `start`.
#[derive(Debug)]
pub struct Chip8<H: Host> {
    state: State,
    keypad: Keypad,
    clock: Clock,
    config: Config,
    host: H,
    running: bool,
    fault: Option<Chip8Error>,
}

impl<H: Host> Chip8<H> {
    pub fn new(host: H) -> Self {
        Chip8::with_config(host, Config::default())
    }

    pub fn with_config(host: H, config: Config) -> Self {
        Chip8 {
            state: State::with_config(&config),
            keypad: Keypad::new(),
            clock: Clock::new(config.cpu_hz),
            config,
            host,
            running: false,
            fault: None,
        }
    }

    /// Resets the machine with `program` loaded at 0x200 and starts running it
    ///
    /// # Arguments
    /// * `program` the raw bytes of a ROM
    pub fn start(&mut self, program: &[u8]) -> Result<()> {
        let state = loader::load_with(program, &self.config).map_err(|e| {
            warn!("unable to start program: {}", e);
            e
        })?;
        self.state = state;
        self.keypad = Keypad::new();
        self.clock.reset();
        self.fault = None;
        self.running = true;
        info!(
            "started {} byte program at {} Hz",
            program.len(),
            self.config.cpu_hz
        );
        Ok(())
    }

    /// Halts the machine; time passing has no effect until the next `start`
    pub fn stop(&mut self) {
        if self.running {
            info!("stopped at pc {:#05X}", self.state.pc);
        }
        self.running = false;
    }

    /// Lets `elapsed` time pass, running every CPU cycle and timer tick that
    /// falls due in the order they fall due.
    pub fn advance(&mut self, elapsed: Duration) -> Result<()> {
        if !self.running {
            return Ok(());
        }
        self.clock.elapse(elapsed);
        self.run_due()
    }

    /// Lets exactly one CPU period pass, for hosts that call at the CPU rate
    pub fn cycle(&mut self) -> Result<()> {
        if !self.running {
            return Ok(());
        }
        self.clock.elapse_cycle();
        self.run_due()
    }

    fn run_due(&mut self) -> Result<()> {
        while let Some(tick) = self.clock.pop_due() {
            match tick {
                Tick::Cpu => {
                    self.step()?;
                }
                Tick::Timer => self.advance_timers(),
            }
        }
        Ok(())
    }

    /// Executes a single instruction regardless of timing
    /// - renders if the instruction left the frame buffer dirty
    /// - stops the machine on a fatal error
    ///
    /// A stopped machine executes nothing: it reports the fault that stopped
    /// it, or an empty result if it was stopped deliberately.
    pub fn step(&mut self) -> Result<StepResult> {
        if !self.running {
            return match &self.fault {
                Some(e) => Err(e.clone()),
                None => Ok(StepResult::default()),
            };
        }
        match instruction::step(&mut self.state, &self.keypad) {
            Ok(result) => {
                self.render_if_needed();
                Ok(result)
            }
            Err(e) => {
                warn!("halting at pc {:#05X}: {}", self.state.pc, e);
                self.running = false;
                self.clock.reset();
                self.fault = Some(e.clone());
                Err(e)
            }
        }
    }

    fn render_if_needed(&mut self) {
        if self.state.draw_flag {
            self.host.render(&self.state.frame_buffer);
            self.state.draw_flag = false;
        }
    }

    /// Handles one 60Hz tick
    /// - beeps while the sound timer is running
    /// - decrements both timers
    fn advance_timers(&mut self) {
        if self.state.sound_timer > 0 {
            self.host.beep();
        }
        self.state.decrement_timers();
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 4-bit representation of the key that was pressed
    pub fn key_down(&mut self, key: u8) -> Result<()> {
        debug!("key down {:X}", key);
        self.keypad.key_down(key).map_err(|e| {
            warn!("ignoring key press: {}", e);
            e
        })
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 4-bit representation of the key that was released
    pub fn key_up(&mut self, key: u8) -> Result<()> {
        debug!("key up {:X}", key);
        self.keypad.key_up(key).map_err(|e| {
            warn!("ignoring key release: {}", e);
            e
        })
    }

    /// Releases every key at once
    pub fn release_keys(&mut self) {
        self.keypad.release_all();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The error that stopped the machine, if one did
    pub fn fault(&self) -> Option<&Chip8Error> {
        self.fault.as_ref()
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Whether the frame buffer has changed since it was last rendered
    pub fn needs_redraw(&self) -> bool {
        self.state.draw_flag
    }

    /// Whether a beep should currently be sounding
    pub fn should_play_sound(&self) -> bool {
        self.state.sound_timer > 0
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }
}
