//! Cycle-stepped 6502-family CPU core.
//!
//! [`Cpu6502`] owns a [`Bus`](emu_core::Bus) and advances one cycle per
//! [`tick`](emu_core::Tickable::tick). The tick that starts an instruction
//! runs it to completion through the bus; the remaining ticks of its cycle
//! cost only count down. Interrupts are sampled between instructions.
//!
//! Decoding goes through [`OPCODES`], a 256-entry table built at compile
//! time. Undocumented opcodes decode to a NOP that skips the right number of
//! operand bytes; see the [`table`] module for the exact policy.

mod addressing;
mod alu;
mod config;
mod cpu;
mod disasm;
mod error;
mod flags;
pub mod operations;
mod registers;
pub mod table;

pub use addressing::{AddressingMode, Operand, Resolved, page_crossed, resolve};
pub use config::{CpuConfig, Variant};
pub use cpu::{
    Cpu6502, CpuBuilder, INTERRUPT_CYCLES, NMI_VECTOR, PendingInterrupts, RESET_VECTOR,
};
pub use disasm::{Disassembly, disassemble};
pub use error::BuildError;
pub use flags::{Flag, Status};
pub use operations::{IRQ_VECTOR, Operation, execute};
pub use registers::{Registers, STACK_PAGE, read_word};
pub use table::{OPCODES, OpcodeDescriptor, decode};
