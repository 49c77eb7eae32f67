//! Opcode table.
//!
//! All 256 opcode bytes decode to a descriptor. The 151 documented
//! opcodes are listed in [`DOCUMENTED`]; every other byte decodes to a
//! fallback NOP.
//!
//! # Undocumented opcodes
//!
//! This is a compatibility policy, not silicon-accurate behavior. An
//! undocumented opcode does nothing except consume the operand bytes its
//! opcode column implies, so the program counter lands where the real chip
//! would put it, and it takes the fewest cycles any documented read
//! instruction in that addressing mode takes (plus the page-crossing cycle
//! for indexed modes). The JAM/KIL column decodes as a 2-cycle implied NOP
//! rather than halting.

use crate::addressing::AddressingMode::{
    self, Absolute, AbsoluteX, AbsoluteY, Immediate, Implied, Indirect, IndirectX, IndirectY,
    Relative, ZeroPage, ZeroPageX, ZeroPageY,
};
use crate::operations::Operation::{
    self, Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc, Cld, Cli, Clv, Cmp,
    Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Jmp, Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php,
    Pla, Plp, Rol, Ror, Rti, Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx, Txa, Txs, Tya,
};

/// Immutable decode entry for one opcode byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeDescriptor {
    pub operation: Operation,
    pub mode: AddressingMode,
    /// Base cycle count, before page-crossing and branch extras.
    pub cycles: u8,
    /// False for the fallback entries standing in for undocumented opcodes.
    pub documented: bool,
}

impl OpcodeDescriptor {
    /// Assembler mnemonic.
    #[must_use]
    pub const fn mnemonic(&self) -> &'static str {
        self.operation.mnemonic()
    }

    /// Instruction length in bytes, including the opcode.
    #[must_use]
    pub const fn len(&self) -> u8 {
        1 + self.mode.operand_len()
    }
}

/// `(opcode, operation, mode, base cycles)` for every documented opcode.
#[rustfmt::skip]
pub const DOCUMENTED: [(u8, Operation, AddressingMode, u8); 151] = [
    (0x69, Adc, Immediate, 2), (0x65, Adc, ZeroPage, 3), (0x75, Adc, ZeroPageX, 4),
    (0x6D, Adc, Absolute, 4), (0x7D, Adc, AbsoluteX, 4), (0x79, Adc, AbsoluteY, 4),
    (0x61, Adc, IndirectX, 6), (0x71, Adc, IndirectY, 5),

    (0x29, And, Immediate, 2), (0x25, And, ZeroPage, 3), (0x35, And, ZeroPageX, 4),
    (0x2D, And, Absolute, 4), (0x3D, And, AbsoluteX, 4), (0x39, And, AbsoluteY, 4),
    (0x21, And, IndirectX, 6), (0x31, And, IndirectY, 5),

    (0x0A, Asl, Implied, 2), (0x06, Asl, ZeroPage, 5), (0x16, Asl, ZeroPageX, 6),
    (0x0E, Asl, Absolute, 6), (0x1E, Asl, AbsoluteX, 7),

    (0x90, Bcc, Relative, 2), (0xB0, Bcs, Relative, 2), (0xF0, Beq, Relative, 2),
    (0x30, Bmi, Relative, 2), (0xD0, Bne, Relative, 2), (0x10, Bpl, Relative, 2),
    (0x50, Bvc, Relative, 2), (0x70, Bvs, Relative, 2),

    (0x24, Bit, ZeroPage, 3), (0x2C, Bit, Absolute, 4),

    (0x00, Brk, Implied, 7),

    (0x18, Clc, Implied, 2), (0xD8, Cld, Implied, 2), (0x58, Cli, Implied, 2),
    (0xB8, Clv, Implied, 2),

    (0xC9, Cmp, Immediate, 2), (0xC5, Cmp, ZeroPage, 3), (0xD5, Cmp, ZeroPageX, 4),
    (0xCD, Cmp, Absolute, 4), (0xDD, Cmp, AbsoluteX, 4), (0xD9, Cmp, AbsoluteY, 4),
    (0xC1, Cmp, IndirectX, 6), (0xD1, Cmp, IndirectY, 5),

    (0xE0, Cpx, Immediate, 2), (0xE4, Cpx, ZeroPage, 3), (0xEC, Cpx, Absolute, 4),
    (0xC0, Cpy, Immediate, 2), (0xC4, Cpy, ZeroPage, 3), (0xCC, Cpy, Absolute, 4),

    (0xC6, Dec, ZeroPage, 5), (0xD6, Dec, ZeroPageX, 6), (0xCE, Dec, Absolute, 6),
    (0xDE, Dec, AbsoluteX, 7),
    (0xCA, Dex, Implied, 2), (0x88, Dey, Implied, 2),

    (0x49, Eor, Immediate, 2), (0x45, Eor, ZeroPage, 3), (0x55, Eor, ZeroPageX, 4),
    (0x4D, Eor, Absolute, 4), (0x5D, Eor, AbsoluteX, 4), (0x59, Eor, AbsoluteY, 4),
    (0x41, Eor, IndirectX, 6), (0x51, Eor, IndirectY, 5),

    (0xE6, Inc, ZeroPage, 5), (0xF6, Inc, ZeroPageX, 6), (0xEE, Inc, Absolute, 6),
    (0xFE, Inc, AbsoluteX, 7),
    (0xE8, Inx, Implied, 2), (0xC8, Iny, Implied, 2),

    (0x4C, Jmp, Absolute, 3), (0x6C, Jmp, Indirect, 5),
    (0x20, Jsr, Absolute, 6),

    (0xA9, Lda, Immediate, 2), (0xA5, Lda, ZeroPage, 3), (0xB5, Lda, ZeroPageX, 4),
    (0xAD, Lda, Absolute, 4), (0xBD, Lda, AbsoluteX, 4), (0xB9, Lda, AbsoluteY, 4),
    (0xA1, Lda, IndirectX, 6), (0xB1, Lda, IndirectY, 5),

    (0xA2, Ldx, Immediate, 2), (0xA6, Ldx, ZeroPage, 3), (0xB6, Ldx, ZeroPageY, 4),
    (0xAE, Ldx, Absolute, 4), (0xBE, Ldx, AbsoluteY, 4),

    (0xA0, Ldy, Immediate, 2), (0xA4, Ldy, ZeroPage, 3), (0xB4, Ldy, ZeroPageX, 4),
    (0xAC, Ldy, Absolute, 4), (0xBC, Ldy, AbsoluteX, 4),

    (0x4A, Lsr, Implied, 2), (0x46, Lsr, ZeroPage, 5), (0x56, Lsr, ZeroPageX, 6),
    (0x4E, Lsr, Absolute, 6), (0x5E, Lsr, AbsoluteX, 7),

    (0xEA, Nop, Implied, 2),

    (0x09, Ora, Immediate, 2), (0x05, Ora, ZeroPage, 3), (0x15, Ora, ZeroPageX, 4),
    (0x0D, Ora, Absolute, 4), (0x1D, Ora, AbsoluteX, 4), (0x19, Ora, AbsoluteY, 4),
    (0x01, Ora, IndirectX, 6), (0x11, Ora, IndirectY, 5),

    (0x48, Pha, Implied, 3), (0x08, Php, Implied, 3), (0x68, Pla, Implied, 4),
    (0x28, Plp, Implied, 4),

    (0x2A, Rol, Implied, 2), (0x26, Rol, ZeroPage, 5), (0x36, Rol, ZeroPageX, 6),
    (0x2E, Rol, Absolute, 6), (0x3E, Rol, AbsoluteX, 7),

    (0x6A, Ror, Implied, 2), (0x66, Ror, ZeroPage, 5), (0x76, Ror, ZeroPageX, 6),
    (0x6E, Ror, Absolute, 6), (0x7E, Ror, AbsoluteX, 7),

    (0x40, Rti, Implied, 6), (0x60, Rts, Implied, 6),

    (0xE9, Sbc, Immediate, 2), (0xE5, Sbc, ZeroPage, 3), (0xF5, Sbc, ZeroPageX, 4),
    (0xED, Sbc, Absolute, 4), (0xFD, Sbc, AbsoluteX, 4), (0xF9, Sbc, AbsoluteY, 4),
    (0xE1, Sbc, IndirectX, 6), (0xF1, Sbc, IndirectY, 5),

    (0x38, Sec, Implied, 2), (0xF8, Sed, Implied, 2), (0x78, Sei, Implied, 2),

    (0x85, Sta, ZeroPage, 3), (0x95, Sta, ZeroPageX, 4), (0x8D, Sta, Absolute, 4),
    (0x9D, Sta, AbsoluteX, 5), (0x99, Sta, AbsoluteY, 5), (0x81, Sta, IndirectX, 6),
    (0x91, Sta, IndirectY, 6),

    (0x86, Stx, ZeroPage, 3), (0x96, Stx, ZeroPageY, 4), (0x8E, Stx, Absolute, 4),
    (0x84, Sty, ZeroPage, 3), (0x94, Sty, ZeroPageX, 4), (0x8C, Sty, Absolute, 4),

    (0xAA, Tax, Implied, 2), (0xA8, Tay, Implied, 2), (0xBA, Tsx, Implied, 2),
    (0x8A, Txa, Implied, 2), (0x9A, Txs, Implied, 2), (0x98, Tya, Implied, 2),
];

/// The decode table, indexed by opcode byte.
pub static OPCODES: [OpcodeDescriptor; 256] = build();

/// Look up the descriptor for `opcode`.
#[must_use]
pub fn decode(opcode: u8) -> &'static OpcodeDescriptor {
    &OPCODES[usize::from(opcode)]
}

const fn build() -> [OpcodeDescriptor; 256] {
    let mut table = [fallback(0); 256];

    let mut opcode = 0;
    while opcode < 256 {
        table[opcode] = fallback(opcode as u8);
        opcode += 1;
    }

    let mut i = 0;
    while i < DOCUMENTED.len() {
        let (opcode, operation, mode, cycles) = DOCUMENTED[i];
        table[opcode as usize] = OpcodeDescriptor {
            operation,
            mode,
            cycles,
            documented: true,
        };
        i += 1;
    }

    table
}

const fn fallback(opcode: u8) -> OpcodeDescriptor {
    let mode = fallback_mode(opcode);
    OpcodeDescriptor {
        operation: Nop,
        mode,
        cycles: mode.min_cycles(),
        documented: false,
    }
}

/// Addressing mode implied by an opcode's position in the decode grid
/// (`aaabbbcc`: `bbb` picks the mode within each `cc` group).
const fn fallback_mode(opcode: u8) -> AddressingMode {
    let bbb = (opcode >> 2) & 0x07;
    match opcode & 0x03 {
        0x00 => match bbb {
            0 => Immediate,
            1 => ZeroPage,
            3 => Absolute,
            4 => Relative,
            5 => ZeroPageX,
            7 => AbsoluteX,
            _ => Implied,
        },
        0x02 => match bbb {
            // $02/$22/$42/$62 are JAM; $82/$C2/$E2 take an immediate byte
            0 if opcode >= 0x80 => Immediate,
            1 => ZeroPage,
            3 => Absolute,
            5 if opcode == 0x96 || opcode == 0xB6 => ZeroPageY,
            5 => ZeroPageX,
            7 if opcode == 0x9E || opcode == 0xBE => AbsoluteY,
            7 => AbsoluteX,
            _ => Implied,
        },
        // The 0x01 and 0x03 columns share the ALU group's modes
        _ => match bbb {
            0 => IndirectX,
            1 => ZeroPage,
            2 => Immediate,
            3 => Absolute,
            4 => IndirectY,
            5 if opcode == 0x97 || opcode == 0xB7 => ZeroPageY,
            5 => ZeroPageX,
            6 => AbsoluteY,
            7 if opcode == 0x9F || opcode == 0xBF => AbsoluteY,
            _ => AbsoluteX,
        },
    }
}
