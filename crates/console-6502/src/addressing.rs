//! Addressing modes.
//!
//! Each resolver consumes the instruction's operand bytes at PC and leaves
//! an [`Operand`] for the operation, together with the extra cycle owed
//! when indexing crossed a page. Whether that cycle is actually charged is
//! up to the operation: reads pay it, stores and read-modify-writes have it
//! folded into their base cycle count.

use emu_core::Bus;

use crate::Registers;

/// The 6502 addressing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand bytes; the operand, if any, is the accumulator.
    Implied,
    /// `#$nn`: the operand byte itself.
    Immediate,
    /// `$nn`
    ZeroPage,
    /// `$nn,X`, wrapping within page zero.
    ZeroPageX,
    /// `$nn,Y`, wrapping within page zero.
    ZeroPageY,
    /// Signed branch offset from the following instruction.
    Relative,
    /// `$nnnn`
    Absolute,
    /// `$nnnn,X`
    AbsoluteX,
    /// `$nnnn,Y`
    AbsoluteY,
    /// `($nnnn)`, JMP only.
    Indirect,
    /// `($nn,X)`
    IndirectX,
    /// `($nn),Y`
    IndirectY,
}

impl AddressingMode {
    /// Operand bytes following the opcode.
    #[must_use]
    pub const fn operand_len(self) -> u8 {
        match self {
            Self::Implied => 0,
            Self::Immediate
            | Self::ZeroPage
            | Self::ZeroPageX
            | Self::ZeroPageY
            | Self::Relative
            | Self::IndirectX
            | Self::IndirectY => 1,
            Self::Absolute | Self::AbsoluteX | Self::AbsoluteY | Self::Indirect => 2,
        }
    }

    /// Fewest cycles any read instruction in this mode takes.
    #[must_use]
    pub const fn min_cycles(self) -> u8 {
        match self {
            Self::Implied | Self::Immediate | Self::Relative => 2,
            Self::ZeroPage => 3,
            Self::ZeroPageX
            | Self::ZeroPageY
            | Self::Absolute
            | Self::AbsoluteX
            | Self::AbsoluteY => 4,
            Self::Indirect | Self::IndirectY => 5,
            Self::IndirectX => 6,
        }
    }
}

/// Where an operation finds its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// The accumulator (implied mode).
    Accumulator,
    /// An effective address. For immediate mode this is the address of the
    /// operand byte; for relative mode it is the branch target.
    Address(u16),
}

/// Output of an addressing-mode resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub operand: Operand,
    /// 1 if indexing crossed a page boundary, else 0.
    pub extra_cycles: u8,
}

impl Resolved {
    const fn at(address: u16) -> Self {
        Self {
            operand: Operand::Address(address),
            extra_cycles: 0,
        }
    }

    const fn indexed(base: u16, address: u16) -> Self {
        Self {
            operand: Operand::Address(address),
            extra_cycles: page_crossed(base, address) as u8,
        }
    }
}

/// True if the two addresses lie in different pages.
#[must_use]
pub const fn page_crossed(a: u16, b: u16) -> bool {
    a & 0xFF00 != b & 0xFF00
}

/// Resolve `mode`, consuming its operand bytes.
pub fn resolve<B: Bus>(mode: AddressingMode, regs: &mut Registers, bus: &mut B) -> Resolved {
    match mode {
        AddressingMode::Implied => implied(),
        AddressingMode::Immediate => immediate(regs),
        AddressingMode::ZeroPage => zero_page(regs, bus),
        AddressingMode::ZeroPageX => {
            let index = regs.x;
            zero_page_indexed(regs, bus, index)
        }
        AddressingMode::ZeroPageY => {
            let index = regs.y;
            zero_page_indexed(regs, bus, index)
        }
        AddressingMode::Relative => relative(regs, bus),
        AddressingMode::Absolute => absolute(regs, bus),
        AddressingMode::AbsoluteX => {
            let index = regs.x;
            absolute_indexed(regs, bus, index)
        }
        AddressingMode::AbsoluteY => {
            let index = regs.y;
            absolute_indexed(regs, bus, index)
        }
        AddressingMode::Indirect => indirect(regs, bus),
        AddressingMode::IndirectX => indirect_x(regs, bus),
        AddressingMode::IndirectY => indirect_y(regs, bus),
    }
}

fn implied() -> Resolved {
    Resolved {
        operand: Operand::Accumulator,
        extra_cycles: 0,
    }
}

fn immediate(regs: &mut Registers) -> Resolved {
    let address = regs.pc;
    regs.pc = regs.pc.wrapping_add(1);
    Resolved::at(address)
}

fn zero_page<B: Bus>(regs: &mut Registers, bus: &mut B) -> Resolved {
    Resolved::at(u16::from(regs.fetch(bus)))
}

/// The index add never carries out of page zero.
fn zero_page_indexed<B: Bus>(regs: &mut Registers, bus: &mut B, index: u8) -> Resolved {
    let base = regs.fetch(bus);
    Resolved::at(u16::from(base.wrapping_add(index)))
}

fn relative<B: Bus>(regs: &mut Registers, bus: &mut B) -> Resolved {
    let offset = regs.fetch(bus) as i8;
    Resolved::at(regs.pc.wrapping_add_signed(i16::from(offset)))
}

fn absolute<B: Bus>(regs: &mut Registers, bus: &mut B) -> Resolved {
    Resolved::at(regs.fetch_word(bus))
}

fn absolute_indexed<B: Bus>(regs: &mut Registers, bus: &mut B, index: u8) -> Resolved {
    let base = regs.fetch_word(bus);
    Resolved::indexed(base, base.wrapping_add(u16::from(index)))
}

/// JMP ($xxFF) fetches the high byte from $xx00: the pointer increment
/// does not carry into the high byte.
fn indirect<B: Bus>(regs: &mut Registers, bus: &mut B) -> Resolved {
    let pointer = regs.fetch_word(bus);
    let lo = bus.read(pointer);
    let hi_addr = (pointer & 0xFF00) | (pointer.wrapping_add(1) & 0x00FF);
    let hi = bus.read(hi_addr);
    Resolved::at(u16::from_le_bytes([lo, hi]))
}

/// Both pointer bytes come from page zero, wrapping at $FF.
fn zero_page_pointer<B: Bus>(bus: &mut B, pointer: u8) -> u16 {
    let lo = bus.read(u16::from(pointer));
    let hi = bus.read(u16::from(pointer.wrapping_add(1)));
    u16::from_le_bytes([lo, hi])
}

fn indirect_x<B: Bus>(regs: &mut Registers, bus: &mut B) -> Resolved {
    let pointer = regs.fetch(bus).wrapping_add(regs.x);
    Resolved::at(zero_page_pointer(bus, pointer))
}

fn indirect_y<B: Bus>(regs: &mut Registers, bus: &mut B) -> Resolved {
    let pointer = regs.fetch(bus);
    let base = zero_page_pointer(bus, pointer);
    Resolved::indexed(base, base.wrapping_add(u16::from(regs.y)))
}
