use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_ADDRESS, GLYPH_SIZE, MAX_ADDRESS};
use crate::error::Result;
use crate::keypad::Keypad;
use crate::opcode::Opcode;
use crate::state::State;

/// What an operation did beyond updating registers and memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Nothing the host needs to know about
    Continue,
    /// The frame buffer changed
    Redraw,
    /// `Fx0A` is still waiting for a key; the pc points back at it
    AwaitKey,
}

/// Every operation receives its opcode, the machine state (with the pc already
/// moved past the opcode) and a read-only view of the keypad.
pub type Operation = fn(op: &dyn Opcode, state: &mut State, keypad: &Keypad) -> Result<Effect>;

/// pc += 2, wrapping within memory
fn skip_if(state: &mut State, condition: bool) -> Result<Effect> {
    if condition {
        state.pc = state.pc.wrapping_add(2) & MAX_ADDRESS;
    }
    Ok(Effect::Continue)
}

/// machine code call; ignored
pub fn sys(_op: &dyn Opcode, _state: &mut State, _keypad: &Keypad) -> Result<Effect> {
    Ok(Effect::Continue)
}

/// clear
pub fn clr(_op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<Effect> {
    state.clear_frame_buffer();
    Ok(Effect::Redraw)
}

/// PC = STACK.pop()
pub fn rts(_op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<Effect> {
    state.pc = state.pop()?;
    Ok(Effect::Continue)
}

/// PC = addr
pub fn jump(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<Effect> {
    state.pc = op.addr();
    Ok(Effect::Continue)
}

/// STACK.push(PC); PC = addr
pub fn call(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<Effect> {
    state.push(state.pc)?;
    state.pc = op.addr();
    Ok(Effect::Continue)
}

/// if Vx == kk then pc += 2
pub fn ske(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<Effect> {
    let equal = state.v(op.x()) == op.kk();
    skip_if(state, equal)
}

/// if Vx != kk then pc += 2
pub fn skne(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<Effect> {
    let unequal = state.v(op.x()) != op.kk();
    skip_if(state, unequal)
}

/// if Vx == Vy then pc += 2
pub fn skre(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<Effect> {
    let equal = state.v(op.x()) == state.v(op.y());
    skip_if(state, equal)
}

/// Vx = kk
pub fn load(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<Effect> {
    state.set_v(op.x(), op.kk());
    Ok(Effect::Continue)
}

/// Vx += kk
/// Overflow wraps and VF is untouched
pub fn add(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<Effect> {
    let res = state.v(op.x()).wrapping_add(op.kk());
    state.set_v(op.x(), res);
    Ok(Effect::Continue)
}

/// Vx = Vy
pub fn mv(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<Effect> {
    state.set_v(op.x(), state.v(op.y()));
    Ok(Effect::Continue)
}

/// Shared tail of the logical operations
fn logic(op: &dyn Opcode, state: &mut State, res: u8) -> Result<Effect> {
    state.set_v(op.x(), res);
    if state.quirks.logic_resets_vf {
        state.set_flag(false);
    }
    Ok(Effect::Continue)
}

/// Vx |= Vy
pub fn or(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<Effect> {
    let res = state.v(op.x()) | state.v(op.y());
    logic(op, state, res)
}

/// Vx &= Vy
pub fn and(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<Effect> {
    let res = state.v(op.x()) & state.v(op.y());
    logic(op, state, res)
}

/// Vx ^= Vy
pub fn xor(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<Effect> {
    let res = state.v(op.x()) ^ state.v(op.y());
    logic(op, state, res)
}

// The arithmetic operations write VF after Vx so that the flag wins when x is F.

/// Vx += Vy; VF = carry
pub fn addr(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<Effect> {
    let (res, carry) = state.v(op.x()).overflowing_add(state.v(op.y()));
    state.set_v(op.x(), res);
    state.set_flag(carry);
    Ok(Effect::Continue)
}

/// Vx -= Vy; VF = !borrow
pub fn sub(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<Effect> {
    let (res, borrow) = state.v(op.x()).overflowing_sub(state.v(op.y()));
    state.set_v(op.x(), res);
    state.set_flag(!borrow);
    Ok(Effect::Continue)
}

/// The value a shift operates on
fn shift_operand(op: &dyn Opcode, state: &State) -> u8 {
    if state.quirks.shift_reads_vy {
        state.v(op.y())
    } else {
        state.v(op.x())
    }
}

/// Vx >>= 1; VF = the bit shifted out
pub fn shr(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<Effect> {
    let operand = shift_operand(op, state);
    state.set_v(op.x(), operand >> 1);
    state.set_flag(operand & 0x1 == 0x1);
    Ok(Effect::Continue)
}

/// Vx = Vy - Vx; VF = !borrow
pub fn subn(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<Effect> {
    let (res, borrow) = state.v(op.y()).overflowing_sub(state.v(op.x()));
    state.set_v(op.x(), res);
    state.set_flag(!borrow);
    Ok(Effect::Continue)
}

/// Vx <<= 1; VF = the bit shifted out
pub fn shl(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<Effect> {
    let operand = shift_operand(op, state);
    state.set_v(op.x(), operand << 1);
    state.set_flag(operand & 0x80 == 0x80);
    Ok(Effect::Continue)
}

/// if Vx != Vy then pc += 2
pub fn skrne(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<Effect> {
    let unequal = state.v(op.x()) != state.v(op.y());
    skip_if(state, unequal)
}

/// I = addr
pub fn loadi(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<Effect> {
    state.i = op.addr();
    Ok(Effect::Continue)
}

/// PC = V0 + addr
pub fn jumpi(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<Effect> {
    let offset = if state.quirks.jump_uses_vx {
        state.v(op.x())
    } else {
        state.v(0x0)
    };
    state.pc = (op.addr() + u16::from(offset)) & MAX_ADDRESS;
    Ok(Effect::Continue)
}

/// Vx = rand_byte & kk
pub fn rand(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<Effect> {
    let rand_byte = state.random_byte();
    state.set_v(op.x(), rand_byte & op.kk());
    Ok(Effect::Continue)
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory I..I+n at position x, y on the FrameBuffer.
/// Sets VF if any pixels were erased.
///
/// The origin always wraps onto the screen; pixels that run off an edge wrap
/// too unless sprites are clipped.
pub fn draw(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<Effect> {
    let height = op.n() as usize;
    let mut sprite = [0u8; 15];
    sprite[..height].copy_from_slice(state.read_bytes(state.i, height)?);

    let origin_x = state.v(op.x()) as usize % DISPLAY_WIDTH;
    let origin_y = state.v(op.y()) as usize % DISPLAY_HEIGHT;
    let clip = state.quirks.clip_sprites;

    let mut collision = false;
    let mut changed = false;
    for (row, byte) in sprite[..height].iter().enumerate() {
        let y = origin_y + row;
        if clip && y >= DISPLAY_HEIGHT {
            break;
        }
        for bit in 0..8 {
            let x = origin_x + bit;
            if clip && x >= DISPLAY_WIDTH {
                break;
            }
            if (byte >> (7 - bit)) & 0x1 == 0x1 {
                let pixel = &mut state.frame_buffer[y % DISPLAY_HEIGHT][x % DISPLAY_WIDTH];
                collision |= *pixel;
                *pixel = !*pixel;
                changed = true;
            }
        }
    }

    state.set_flag(collision);
    if changed {
        state.draw_flag = true;
        Ok(Effect::Redraw)
    } else {
        Ok(Effect::Continue)
    }
}

/// if Vx.pressed then pc += 2
pub fn skpr(op: &dyn Opcode, state: &mut State, keypad: &Keypad) -> Result<Effect> {
    let pressed = keypad.is_down(state.v(op.x()) & 0xF);
    skip_if(state, pressed)
}

/// if !Vx.pressed then pc += 2
pub fn skup(op: &dyn Opcode, state: &mut State, keypad: &Keypad) -> Result<Effect> {
    let pressed = keypad.is_down(state.v(op.x()) & 0xF);
    skip_if(state, !pressed)
}

/// Vx = DT
pub fn moved(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<Effect> {
    state.set_v(op.x(), state.delay_timer);
    Ok(Effect::Continue)
}

/// await keypress for Vx
/// Only a key that goes down after the wait began counts. Until one does the
/// pc is wound back so that this opcode runs again on the next step.
pub fn keyd(op: &dyn Opcode, state: &mut State, keypad: &Keypad) -> Result<Effect> {
    let poll = *state.key_wait.get_or_insert_with(|| keypad.poll());
    match keypad.any_down_since(poll) {
        Some(key) => {
            state.set_v(op.x(), key);
            state.key_wait = None;
            Ok(Effect::Continue)
        }
        None => {
            state.pc = state.pc.wrapping_sub(2) & MAX_ADDRESS;
            Ok(Effect::AwaitKey)
        }
    }
}

/// DT = Vx
pub fn loads(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<Effect> {
    state.delay_timer = state.v(op.x());
    Ok(Effect::Continue)
}

/// ST = Vx
pub fn ld(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<Effect> {
    state.sound_timer = state.v(op.x());
    Ok(Effect::Continue)
}

/// I += Vx
pub fn addi(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<Effect> {
    state.i = state.i.wrapping_add(u16::from(state.v(op.x()))) & MAX_ADDRESS;
    Ok(Effect::Continue)
}

/// I = address of the sprite for the low nibble of Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<Effect> {
    let digit = u16::from(state.v(op.x()) & 0xF);
    state.i = FONT_ADDRESS + digit * GLYPH_SIZE;
    Ok(Effect::Continue)
}

/// mem[I..I+3] = bcd(Vx)
pub fn bcd(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<Effect> {
    let vx = state.v(op.x());
    state.write_bytes(state.i, &[vx / 100, vx / 10 % 10, vx % 10])?;
    Ok(Effect::Continue)
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<Effect> {
    let count = op.x() as usize + 1;
    let registers = state.v;
    state.write_bytes(state.i, &registers[..count])?;
    if state.quirks.load_store_increments_i {
        state.i = state.i.wrapping_add(count as u16) & MAX_ADDRESS;
    }
    Ok(Effect::Continue)
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(op: &dyn Opcode, state: &mut State, _keypad: &Keypad) -> Result<Effect> {
    let count = op.x() as usize + 1;
    let mut registers = [0u8; 16];
    registers[..count].copy_from_slice(state.read_bytes(state.i, count)?);
    state.v[..count].copy_from_slice(&registers[..count]);
    if state.quirks.load_store_increments_i {
        state.i = state.i.wrapping_add(count as u16) & MAX_ADDRESS;
    }
    Ok(Effect::Continue)
}
