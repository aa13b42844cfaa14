use log::trace;

use crate::constants::{MAX_ADDRESS, MAX_PC};
use crate::error::{Chip8Error, Result};
use crate::keypad::Keypad;
use crate::opcode::Opcode;
use crate::operations::*;
use crate::state::State;

/// The outcome of executing a single instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepResult {
    /// The instruction changed the frame buffer
    pub framebuffer_changed: bool,
    /// `Fx0A` is blocking until a key goes down
    pub awaiting_key: bool,
}

impl From<Effect> for StepResult {
    fn from(effect: Effect) -> Self {
        StepResult {
            framebuffer_changed: effect == Effect::Redraw,
            awaiting_key: effect == Effect::AwaitKey,
        }
    }
}

/// Selects the correct Operation for a given Opcode
pub fn from_op(op: &dyn Opcode) -> Option<Operation> {
    let operation: Operation = match op.nibbles() {
        (0x0, 0x0, 0xE, 0x0) => clr,
        (0x0, 0x0, 0xE, 0xE) => rts,
        (0x0, ..) => sys,
        (0x1, ..) => jump,
        (0x2, ..) => call,
        (0x3, ..) => ske,
        (0x4, ..) => skne,
        (0x5, .., 0x0) => skre,
        (0x6, ..) => load,
        (0x7, ..) => add,
        (0x8, .., 0x0) => mv,
        (0x8, .., 0x1) => or,
        (0x8, .., 0x2) => and,
        (0x8, .., 0x3) => xor,
        (0x8, .., 0x4) => addr,
        (0x8, .., 0x5) => sub,
        (0x8, .., 0x6) => shr,
        (0x8, .., 0x7) => subn,
        (0x8, .., 0xE) => shl,
        (0x9, .., 0x0) => skrne,
        (0xA, ..) => loadi,
        (0xB, ..) => jumpi,
        (0xC, ..) => rand,
        (0xD, ..) => draw,
        (0xE, _, 0x9, 0xE) => skpr,
        (0xE, _, 0xA, 0x1) => skup,
        (0xF, _, 0x0, 0x7) => moved,
        (0xF, _, 0x0, 0xA) => keyd,
        (0xF, _, 0x1, 0x5) => loads,
        (0xF, _, 0x1, 0x8) => ld,
        (0xF, _, 0x1, 0xE) => addi,
        (0xF, _, 0x2, 0x9) => ldspr,
        (0xF, _, 0x3, 0x3) => bcd,
        (0xF, _, 0x5, 0x5) => stor,
        (0xF, _, 0x6, 0x5) => read,
        _ => return None,
    };
    Some(operation)
}

/// Fetches, decodes and executes the instruction at the pc.
///
/// The pc is moved past the opcode before the instruction runs, so jumps and
/// calls set it outright and skips add a further 2. If the instruction fails
/// the pc is left pointing at it.
pub fn step(state: &mut State, keypad: &Keypad) -> Result<StepResult> {
    if state.pc > MAX_PC {
        return Err(Chip8Error::ProgramCounterOutOfRange(state.pc));
    }
    let op: u16 = state.read_word(state.pc)?;
    let operation = from_op(&op).ok_or(Chip8Error::UnknownOpcode(op))?;
    trace!(
        "{:04X} v{:02X?} i{:04X} pc{:04X}",
        op,
        state.v,
        state.i,
        state.pc
    );
    let pc = state.pc;
    state.pc = (pc + 2) & MAX_ADDRESS;
    match operation(&op, state, keypad) {
        Ok(effect) => Ok(StepResult::from(effect)),
        Err(e) => {
            state.pc = pc;
            Err(e)
        }
    }
}
