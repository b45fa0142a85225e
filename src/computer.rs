use thiserror::Error;

use crate::channel::{Input, Output};
use crate::decoder::{Instruction, decode};
use crate::memory::Memory;

const ADD: i64 = 1;
const MULTIPLY: i64 = 2;
const READ: i64 = 3;
const WRITE: i64 = 4;
const JUMP_IF_TRUE: i64 = 5;
const JUMP_IF_FALSE: i64 = 6;
const LESS_THAN: i64 = 7;
const EQUALS: i64 = 8;
const ADJUST_BASE: i64 = 9;
const HALT: i64 = 99;

/// Reasons a run stops without reaching a halt instruction.
///
/// Out-of-range memory access is not one of them: it panics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    #[error("unexpected opcode {opcode} at memory position {pointer}")]
    UnknownOpcode { opcode: i64, pointer: i64 },
    #[error("input channel closed while reading at memory position {pointer}")]
    InputClosed { pointer: i64 },
    #[error("output channel closed while writing {value} at memory position {pointer}")]
    OutputClosed { value: i64, pointer: i64 },
}

/// An Intcode computer.
///
/// Memory is fixed at construction. The instruction pointer starts at 0 and
/// the relative base at 0. Opcode 3 blocks on `input`; opcode 4 sends on
/// `output`. There is no timeout: a read with no producer waits until the
/// producer writes or is dropped.
///
/// Dropping the other end of either channel is how a caller stops a running
/// computer early: the next read or write on it ends the run with
/// [`ExecutionError::InputClosed`] or [`ExecutionError::OutputClosed`].
#[derive(Debug)]
pub struct Computer {
    memory: Memory,
    pointer: i64,
    relative_base: i64,
    input: Input,
    output: Output,
}

impl Computer {
    /// Load `program` into a memory of `max(memory_size, program.len())` cells.
    pub fn new(program: &[i64], memory_size: usize, input: Input, output: Output) -> Self {
        Self {
            memory: Memory::new(program, memory_size),
            pointer: 0,
            relative_base: 0,
            input,
            output,
        }
    }

    /// Execute until opcode 99 or an error.
    ///
    /// # Panics
    ///
    /// If the instruction pointer or any operand address leaves memory.
    pub fn run(&mut self) -> Result<(), ExecutionError> {
        while self.step()? {}
        Ok(())
    }

    pub fn memory(&self) -> &[i64] {
        self.memory.as_slice()
    }

    pub fn into_memory(self) -> Vec<i64> {
        self.memory.into_vec()
    }

    pub fn pointer(&self) -> i64 {
        self.pointer
    }

    pub fn relative_base(&self) -> i64 {
        self.relative_base
    }

    /// Execute one instruction. Returns `false` once halted.
    fn step(&mut self) -> Result<bool, ExecutionError> {
        let Instruction { opcode, params: [a, b, c] } =
            decode(&self.memory, self.pointer, self.relative_base);
        let mem = &mut self.memory;

        match opcode {
            ADD => {
                mem[c] = mem[a].wrapping_add(mem[b]);
                self.pointer += 4;
            }
            MULTIPLY => {
                mem[c] = mem[a].wrapping_mul(mem[b]);
                self.pointer += 4;
            }
            READ => {
                let value = self.input.read().map_err(|_| ExecutionError::InputClosed {
                    pointer: self.pointer,
                })?;
                mem[a] = value;
                self.pointer += 2;
            }
            WRITE => {
                let value = mem[a];
                self.output
                    .write(value)
                    .map_err(|_| ExecutionError::OutputClosed {
                        value,
                        pointer: self.pointer,
                    })?;
                self.pointer += 2;
            }
            JUMP_IF_TRUE => {
                if mem[a] != 0 {
                    self.pointer = mem[b];
                } else {
                    self.pointer += 3;
                }
            }
            JUMP_IF_FALSE => {
                if mem[a] == 0 {
                    self.pointer = mem[b];
                } else {
                    self.pointer += 3;
                }
            }
            LESS_THAN => {
                mem[c] = (mem[a] < mem[b]) as i64;
                self.pointer += 4;
            }
            EQUALS => {
                mem[c] = (mem[a] == mem[b]) as i64;
                self.pointer += 4;
            }
            ADJUST_BASE => {
                self.relative_base = self.relative_base.wrapping_add(mem[a]);
                self.pointer += 2;
            }
            HALT => return Ok(false),
            _ => {
                return Err(ExecutionError::UnknownOpcode {
                    opcode,
                    pointer: self.pointer,
                });
            }
        }

        Ok(true)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::channel::channel;
    use proptest::prelude::*;

    fn outputs(program: &[i64], inputs: &[i64]) -> (Vec<i64>, Vec<i64>) {
        let (to_vm, input) = channel();
        let (output, from_vm) = channel();
        for &v in inputs {
            to_vm.write(v).unwrap();
        }
        let mut c = Computer::new(program, 0, input, output);
        c.run().unwrap();
        (from_vm.drain(), c.into_memory())
    }

    proptest! {
        #[test]
        fn add_and_multiply_match_wrapping_arithmetic(a in any::<i64>(), b in any::<i64>()) {
            let program = [3, 13, 3, 14, 1, 13, 14, 15, 2, 13, 14, 16, 99, 0, 0, 0, 0];
            let (out, mem) = outputs(&program, &[a, b]);
            prop_assert!(out.is_empty());
            prop_assert_eq!(mem[15], a.wrapping_add(b));
            prop_assert_eq!(mem[16], a.wrapping_mul(b));
        }

        #[test]
        fn comparisons_match_native(a in any::<i64>(), b in any::<i64>()) {
            let program = [3, 13, 3, 14, 7, 13, 14, 15, 8, 13, 14, 16, 99, 0, 0, 0, 0];
            let (_, mem) = outputs(&program, &[a, b]);
            prop_assert_eq!(mem[15], (a < b) as i64);
            prop_assert_eq!(mem[16], (a == b) as i64);
        }

        #[test]
        fn echo_preserves_order(values in prop::collection::vec(any::<i64>(), 0..32)) {
            // Read a count n into 100, then echo n values through 101.
            let mut program = vec![
                3, 100, // n
                1006, 100, 16, // n == 0 -> halt
                3, 101, 4, 101, // echo one value
                1001, 100, -1, 100, // n -= 1
                1105, 1, 2, // loop
                99,
            ];
            program.resize(102, 0);
            let mut inputs = vec![values.len() as i64];
            inputs.extend(&values);
            let (out, _) = outputs(&program, &inputs);
            prop_assert_eq!(out, values);
        }
    }
}
