use crate::memory::Memory;

/// How a parameter's raw value maps to the address that is dereferenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The raw value is itself the address.
    Direct,
    /// The parameter slot's own position is the address, so dereferencing
    /// yields the literal stored there.
    Immediate,
    /// The raw value is an offset from the relative base.
    Relative,
}

impl Mode {
    /// Digit 1 is immediate, digit 2 is relative, anything else is direct.
    pub fn from_digit(digit: i64) -> Self {
        match digit {
            1 => Mode::Immediate,
            2 => Mode::Relative,
            _ => Mode::Direct,
        }
    }
}

/// Number of parameter slots read ahead on every cycle.
pub const PARAM_SLOTS: usize = 3;

/// A decoded instruction.
///
/// Every parameter is resolved to an effective address, including immediate
/// ones, so an operand's value is always `memory[params[i]]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// Raw opcode. Values above 99 are reduced to their low two digits;
    /// smaller (or negative) values are kept as-is.
    pub opcode: i64,
    pub params: [i64; PARAM_SLOTS],
}

/// Decode the instruction at `pointer`.
///
/// Panics if `pointer` itself is outside memory. Parameter slots that fall
/// past the end of memory decode to raw `0` in direct mode.
pub fn decode(memory: &Memory, pointer: i64, relative_base: i64) -> Instruction {
    let value = memory[pointer];
    let opcode = if value > 99 { value % 100 } else { value };

    let mut params = [0i64; PARAM_SLOTS];
    let mut modes = value / 100;
    for (i, param) in params.iter_mut().enumerate() {
        let slot = pointer + 1 + i as i64;
        if let Some(raw) = memory.get(slot) {
            *param = match Mode::from_digit(modes % 10) {
                Mode::Direct => raw,
                Mode::Immediate => slot,
                Mode::Relative => relative_base.wrapping_add(raw),
            };
        }
        modes /= 10;
    }

    Instruction { opcode, params }
}
