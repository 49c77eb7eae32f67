//! One-instruction disassembler for traces and debuggers.

use std::fmt;

use crate::AddressingMode;
use crate::operations::Operation;
use crate::table::decode;

/// A disassembled instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disassembly {
    /// Assembler text, e.g. `LDA ($40),Y`.
    pub text: String,
    /// Instruction length in bytes.
    pub len: u8,
}

impl fmt::Display for Disassembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Disassemble the instruction at the start of `bytes`, which sits at
/// address `pc`. Operand bytes past the end of the slice read as zero.
///
/// Undocumented opcodes are prefixed with `*`; branch targets are shown as
/// absolute addresses.
#[must_use]
pub fn disassemble(bytes: &[u8], pc: u16) -> Disassembly {
    let byte = |i: usize| bytes.get(i).copied().unwrap_or(0);
    let descriptor = decode(byte(0));
    let lo = byte(1);
    let word = u16::from_le_bytes([lo, byte(2)]);

    let operand = match descriptor.mode {
        AddressingMode::Implied => match descriptor.operation {
            Operation::Asl | Operation::Lsr | Operation::Rol | Operation::Ror
                if descriptor.documented =>
            {
                "A".to_string()
            }
            _ => String::new(),
        },
        AddressingMode::Immediate => format!("#${lo:02X}"),
        AddressingMode::ZeroPage => format!("${lo:02X}"),
        AddressingMode::ZeroPageX => format!("${lo:02X},X"),
        AddressingMode::ZeroPageY => format!("${lo:02X},Y"),
        AddressingMode::Relative => {
            let target = pc.wrapping_add(2).wrapping_add_signed(i16::from(lo as i8));
            format!("${target:04X}")
        }
        AddressingMode::Absolute => format!("${word:04X}"),
        AddressingMode::AbsoluteX => format!("${word:04X},X"),
        AddressingMode::AbsoluteY => format!("${word:04X},Y"),
        AddressingMode::Indirect => format!("(${word:04X})"),
        AddressingMode::IndirectX => format!("(${lo:02X},X)"),
        AddressingMode::IndirectY => format!("(${lo:02X}),Y"),
    };

    let prefix = if descriptor.documented { "" } else { "*" };
    let text = if operand.is_empty() {
        format!("{prefix}{}", descriptor.mnemonic())
    } else {
        format!("{prefix}{} {operand}", descriptor.mnemonic())
    };

    Disassembly {
        text,
        len: descriptor.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(bytes: &[u8], pc: u16) -> String {
        disassemble(bytes, pc).text
    }

    #[test]
    fn formats_each_addressing_mode() {
        assert_eq!(text(&[0xEA], 0), "NOP");
        assert_eq!(text(&[0x0A], 0), "ASL A");
        assert_eq!(text(&[0xA9, 0x05], 0), "LDA #$05");
        assert_eq!(text(&[0xA5, 0x10], 0), "LDA $10");
        assert_eq!(text(&[0xB5, 0x10], 0), "LDA $10,X");
        assert_eq!(text(&[0xB6, 0x10], 0), "LDX $10,Y");
        assert_eq!(text(&[0xAD, 0x34, 0x12], 0), "LDA $1234");
        assert_eq!(text(&[0xBD, 0x34, 0x12], 0), "LDA $1234,X");
        assert_eq!(text(&[0xB9, 0x34, 0x12], 0), "LDA $1234,Y");
        assert_eq!(text(&[0x6C, 0xFF, 0x10], 0), "JMP ($10FF)");
        assert_eq!(text(&[0xA1, 0x40], 0), "LDA ($40,X)");
        assert_eq!(text(&[0xB1, 0x40], 0), "LDA ($40),Y");
    }

    #[test]
    fn branch_targets_are_absolute() {
        assert_eq!(text(&[0xD0, 0xFE], 0x8000), "BNE $8000");
        assert_eq!(text(&[0xF0, 0x10], 0x8000), "BEQ $8012");
        assert_eq!(text(&[0x10, 0x80], 0x0010), "BPL $FF92");
    }

    #[test]
    fn reports_instruction_length() {
        assert_eq!(disassemble(&[0xEA], 0).len, 1);
        assert_eq!(disassemble(&[0xA9, 0x00], 0).len, 2);
        assert_eq!(disassemble(&[0x20, 0x00, 0x80], 0).len, 3);
    }

    #[test]
    fn undocumented_opcodes_are_marked() {
        assert_eq!(text(&[0x1A], 0), "*NOP");
        assert_eq!(text(&[0x04, 0x44], 0), "*NOP $44");
        assert_eq!(text(&[0x1C, 0x00, 0x20], 0), "*NOP $2000,X");
        assert_eq!(disassemble(&[0x1C], 0).len, 3);
    }

    #[test]
    fn missing_operand_bytes_read_as_zero() {
        assert_eq!(text(&[0xAD], 0), "LDA $0000");
        assert_eq!(text(&[], 0), "BRK");
    }
}
