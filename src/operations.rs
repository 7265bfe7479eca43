use rand::Rng;

use crate::constants::{FONT_ADDRESS, GLYPH_SIZE, MAX_SPRITE_ROWS};
use crate::error::EmulationError;
use crate::instruction::Instruction;
use crate::memory::ReservedAddress;
use crate::quirks::ShiftSource;
use crate::state::State;

/// Where the program counter goes once an operation has run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Next {
    /// pc += 2
    Advance,
    /// pc += 4
    Skip,
    /// pc = address
    Jump(u16),
    /// pc stays put until a key is pressed, which is then stored in Vx
    WaitForKey(u8),
}

fn skip_if(condition: bool) -> Next {
    if condition {
        Next::Skip
    } else {
        Next::Advance
    }
}

fn reserved_write(state: &State) -> impl FnOnce(ReservedAddress) -> EmulationError {
    let pc = state.registers.pc();
    move |ReservedAddress(address)| EmulationError::ReservedWrite { pc, address }
}

/// Runs `instruction` against `state`
pub fn execute(instruction: Instruction, state: &mut State) -> Result<Next, EmulationError> {
    use Instruction::*;
    match instruction {
        Clear => Ok(clr(state)),
        Return => rts(state),
        Jump { nnn } => Ok(Next::Jump(nnn)),
        Call { nnn } => call(state, nnn),
        SkipEqImmediate { x, nn } => Ok(skip_if(state.registers.v(x) == nn)),
        SkipNeImmediate { x, nn } => Ok(skip_if(state.registers.v(x) != nn)),
        SkipEqRegister { x, y } => Ok(skip_if(state.registers.v(x) == state.registers.v(y))),
        LoadImmediate { x, nn } => Ok(load(state, x, nn)),
        AddImmediate { x, nn } => Ok(add(state, x, nn)),
        Move { x, y } => Ok(alu(state, x, y, |_, vy| vy)),
        Or { x, y } => Ok(alu(state, x, y, |vx, vy| vx | vy)),
        And { x, y } => Ok(alu(state, x, y, |vx, vy| vx & vy)),
        Xor { x, y } => Ok(alu(state, x, y, |vx, vy| vx ^ vy)),
        AddRegister { x, y } => Ok(addr(state, x, y)),
        Sub { x, y } => Ok(sub(state, x, y)),
        ShiftRight { x, y } => Ok(shr(state, x, y)),
        SubReverse { x, y } => Ok(subn(state, x, y)),
        ShiftLeft { x, y } => Ok(shl(state, x, y)),
        SkipNeRegister { x, y } => Ok(skip_if(state.registers.v(x) != state.registers.v(y))),
        LoadIndex { nnn } => {
            state.registers.set_i(nnn);
            Ok(Next::Advance)
        }
        JumpOffset { nnn } => Ok(Next::Jump(u16::from(state.registers.v(0x0)) + nnn)),
        Random { x, nn } => Ok(rnd(state, x, nn)),
        Draw { x, y, n } => Ok(draw(state, x, y, n)),
        SkipKeyPressed { x } => Ok(skpr(state, x)),
        SkipKeyNotPressed { x } => Ok(skup(state, x)),
        LoadDelay { x } => {
            let delay = state.timers.delay;
            Ok(load(state, x, delay))
        }
        WaitKey { x } => Ok(Next::WaitForKey(x)),
        SetDelay { x } => {
            state.timers.delay = state.registers.v(x);
            Ok(Next::Advance)
        }
        SetSound { x } => {
            state.timers.sound = state.registers.v(x);
            Ok(Next::Advance)
        }
        AddIndex { x } => {
            let i = state.registers.i().wrapping_add(u16::from(state.registers.v(x)));
            state.registers.set_i(i);
            Ok(Next::Advance)
        }
        LoadGlyph { x } => Ok(ldspr(state, x)),
        Bcd { x } => bcd(state, x),
        StoreRegisters { x } => stor(state, x),
        LoadRegisters { x } => Ok(read(state, x)),
    }
}

/// clear
fn clr(state: &mut State) -> Next {
    state.display.clear();
    Next::Advance
}

/// PC = STACK.pop() + 2
/// The stack holds the address of the call itself, so resume just past it.
fn rts(state: &mut State) -> Result<Next, EmulationError> {
    let call_site = state.registers.pop()?;
    Ok(Next::Jump(call_site.wrapping_add(0x2)))
}

/// STACK.push(PC); PC = addr
fn call(state: &mut State, nnn: u16) -> Result<Next, EmulationError> {
    state.registers.push(state.registers.pc())?;
    Ok(Next::Jump(nnn))
}

/// Vx = nn
fn load(state: &mut State, x: u8, nn: u8) -> Next {
    state.registers.set_v(x, nn);
    Next::Advance
}

/// Vx += nn
/// Wraps without touching VF
fn add(state: &mut State, x: u8, nn: u8) -> Next {
    state.registers.set_v(x, state.registers.v(x).wrapping_add(nn));
    Next::Advance
}

/// Vx = f(Vx, Vy)
fn alu(state: &mut State, x: u8, y: u8, f: impl Fn(u8, u8) -> u8) -> Next {
    let result = f(state.registers.v(x), state.registers.v(y));
    state.registers.set_v(x, result);
    Next::Advance
}

/// Vx += Vy; VF = carry
fn addr(state: &mut State, x: u8, y: u8) -> Next {
    let (result, carry) = state.registers.v(x).overflowing_add(state.registers.v(y));
    state.registers.set_v(x, result);
    state.registers.set_flag(carry);
    Next::Advance
}

/// Vx -= Vy; VF = !borrow
fn sub(state: &mut State, x: u8, y: u8) -> Next {
    let (result, borrow) = state.registers.v(x).overflowing_sub(state.registers.v(y));
    state.registers.set_v(x, result);
    state.registers.set_flag(!borrow);
    Next::Advance
}

/// Vx = Vy - Vx; VF = !borrow
fn subn(state: &mut State, x: u8, y: u8) -> Next {
    let (result, borrow) = state.registers.v(y).overflowing_sub(state.registers.v(x));
    state.registers.set_v(x, result);
    state.registers.set_flag(!borrow);
    Next::Advance
}

fn shift_operand(state: &State, x: u8, y: u8) -> u8 {
    match state.quirks.shift_source {
        ShiftSource::Vy => state.registers.v(y),
        ShiftSource::Vx => state.registers.v(x),
    }
}

/// Vx = Vy >> 1; VF = lsb
fn shr(state: &mut State, x: u8, y: u8) -> Next {
    let value = shift_operand(state, x, y);
    state.registers.set_v(x, value >> 1);
    state.registers.set_flag(value & 0x1 == 0x1);
    Next::Advance
}

/// Vx = Vy << 1; VF = msb
fn shl(state: &mut State, x: u8, y: u8) -> Next {
    let value = shift_operand(state, x, y);
    state.registers.set_v(x, value << 1);
    state.registers.set_flag(value & 0x80 == 0x80);
    Next::Advance
}

/// Vx = rand_byte & nn
fn rnd(state: &mut State, x: u8, nn: u8) -> Next {
    let rand_byte: u8 = state.rng.gen();
    state.registers.set_v(x, rand_byte & nn);
    Next::Advance
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory I..I+n at position x, y.
/// Sets VF if any pixels were erased
fn draw(state: &mut State, x: u8, y: u8, n: u8) -> Next {
    let mut rows = [0; MAX_SPRITE_ROWS];
    let rows = &mut rows[..n as usize];
    state.memory.read_into(state.registers.i(), rows);

    let collision = state.display.draw_sprite(
        state.registers.v(x),
        state.registers.v(y),
        rows,
        state.quirks.sprite_edges,
    );
    state.registers.set_flag(collision);
    Next::Advance
}

/// if Vx.pressed then pc += 2
/// A pressed key is consumed by the check
fn skpr(state: &mut State, x: u8) -> Next {
    skip_if(state.keypad.consume(state.registers.v(x)))
}

/// if !Vx.pressed then pc += 2
/// A pressed key is consumed by the check
fn skup(state: &mut State, x: u8) -> Next {
    skip_if(!state.keypad.consume(state.registers.v(x)))
}

/// I = Vx * 5
/// Points I at the glyph for the low nibble of Vx
fn ldspr(state: &mut State, x: u8) -> Next {
    let digit = (state.registers.v(x) & 0xF) as usize;
    state.registers.set_i((FONT_ADDRESS + digit * GLYPH_SIZE) as u16);
    Next::Advance
}

/// mem[I..I+3] = bcd(Vx)
fn bcd(state: &mut State, x: u8) -> Result<Next, EmulationError> {
    let value = state.registers.v(x);
    let digits = [value / 100, value / 10 % 10, value % 10];
    let on_error = reserved_write(state);
    state
        .memory
        .write_all(state.registers.i(), &digits)
        .map_err(on_error)?;
    Ok(Next::Advance)
}

/// mem[I..=I+x] = V0..=Vx
fn stor(state: &mut State, x: u8) -> Result<Next, EmulationError> {
    let v = state.registers.v_all();
    let on_error = reserved_write(state);
    state
        .memory
        .write_all(state.registers.i(), &v[..=(x & 0xF) as usize])
        .map_err(on_error)?;
    Ok(Next::Advance)
}

/// V0..=Vx = mem[I..=I+x]
fn read(state: &mut State, x: u8) -> Next {
    let i = state.registers.i();
    for register in 0..=(x & 0xF) {
        let value = state.memory.read(i.wrapping_add(u16::from(register)));
        state.registers.set_v(register, value);
    }
    Next::Advance
}
