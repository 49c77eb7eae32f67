//! The 56 documented operations.
//!
//! An operation receives the operand its addressing mode resolved and
//! returns any extra cycles it costs beyond the descriptor's base count
//! (only taken branches do).

use emu_core::Bus;

use crate::addressing::{Operand, page_crossed};
use crate::registers::read_word;
use crate::{Flag, Registers, Status};

/// IRQ and BRK service vector.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Operation identifiers, one per documented mnemonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
}

impl Operation {
    /// Assembler mnemonic.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Adc => "ADC",
            Self::And => "AND",
            Self::Asl => "ASL",
            Self::Bcc => "BCC",
            Self::Bcs => "BCS",
            Self::Beq => "BEQ",
            Self::Bit => "BIT",
            Self::Bmi => "BMI",
            Self::Bne => "BNE",
            Self::Bpl => "BPL",
            Self::Brk => "BRK",
            Self::Bvc => "BVC",
            Self::Bvs => "BVS",
            Self::Clc => "CLC",
            Self::Cld => "CLD",
            Self::Cli => "CLI",
            Self::Clv => "CLV",
            Self::Cmp => "CMP",
            Self::Cpx => "CPX",
            Self::Cpy => "CPY",
            Self::Dec => "DEC",
            Self::Dex => "DEX",
            Self::Dey => "DEY",
            Self::Eor => "EOR",
            Self::Inc => "INC",
            Self::Inx => "INX",
            Self::Iny => "INY",
            Self::Jmp => "JMP",
            Self::Jsr => "JSR",
            Self::Lda => "LDA",
            Self::Ldx => "LDX",
            Self::Ldy => "LDY",
            Self::Lsr => "LSR",
            Self::Nop => "NOP",
            Self::Ora => "ORA",
            Self::Pha => "PHA",
            Self::Php => "PHP",
            Self::Pla => "PLA",
            Self::Plp => "PLP",
            Self::Rol => "ROL",
            Self::Ror => "ROR",
            Self::Rti => "RTI",
            Self::Rts => "RTS",
            Self::Sbc => "SBC",
            Self::Sec => "SEC",
            Self::Sed => "SED",
            Self::Sei => "SEI",
            Self::Sta => "STA",
            Self::Stx => "STX",
            Self::Sty => "STY",
            Self::Tax => "TAX",
            Self::Tay => "TAY",
            Self::Tsx => "TSX",
            Self::Txa => "TXA",
            Self::Txs => "TXS",
            Self::Tya => "TYA",
        }
    }

    /// Whether a page crossing during address resolution costs this
    /// operation a cycle. Only pure reads pay it; stores and
    /// read-modify-writes always spend the fix-up cycle, so it is already in
    /// their base count.
    #[must_use]
    pub const fn pays_page_penalty(self) -> bool {
        matches!(
            self,
            Self::Adc
                | Self::And
                | Self::Cmp
                | Self::Eor
                | Self::Lda
                | Self::Ldx
                | Self::Ldy
                | Self::Nop
                | Self::Ora
                | Self::Sbc
        )
    }

    /// Whether this is a conditional branch.
    #[must_use]
    pub const fn is_branch(self) -> bool {
        matches!(
            self,
            Self::Bcc
                | Self::Bcs
                | Self::Beq
                | Self::Bmi
                | Self::Bne
                | Self::Bpl
                | Self::Bvc
                | Self::Bvs
        )
    }
}

/// Execute `op` against `operand`. Returns the extra cycles the operation
/// itself costs. `bcd` enables decimal-mode ADC/SBC.
pub fn execute<B: Bus>(
    op: Operation,
    regs: &mut Registers,
    bus: &mut B,
    operand: Operand,
    bcd: bool,
) -> u8 {
    match op {
        // Loads and stores
        Operation::Lda => {
            regs.a = load(regs, bus, operand);
            regs.p.update_nz(regs.a);
        }
        Operation::Ldx => {
            regs.x = load(regs, bus, operand);
            regs.p.update_nz(regs.x);
        }
        Operation::Ldy => {
            regs.y = load(regs, bus, operand);
            regs.p.update_nz(regs.y);
        }
        Operation::Sta => {
            let value = regs.a;
            store(regs, bus, operand, value);
        }
        Operation::Stx => {
            let value = regs.x;
            store(regs, bus, operand, value);
        }
        Operation::Sty => {
            let value = regs.y;
            store(regs, bus, operand, value);
        }

        // Arithmetic and logic
        Operation::Adc => {
            let value = load(regs, bus, operand);
            regs.adc(value, bcd);
        }
        Operation::Sbc => {
            let value = load(regs, bus, operand);
            regs.sbc(value, bcd);
        }
        Operation::And => {
            let value = load(regs, bus, operand);
            regs.and(value);
        }
        Operation::Ora => {
            let value = load(regs, bus, operand);
            regs.ora(value);
        }
        Operation::Eor => {
            let value = load(regs, bus, operand);
            regs.eor(value);
        }
        Operation::Bit => {
            let value = load(regs, bus, operand);
            regs.bit(value);
        }
        Operation::Cmp => {
            let value = load(regs, bus, operand);
            regs.compare(regs.a, value);
        }
        Operation::Cpx => {
            let value = load(regs, bus, operand);
            regs.compare(regs.x, value);
        }
        Operation::Cpy => {
            let value = load(regs, bus, operand);
            regs.compare(regs.y, value);
        }

        // Shifts, rotates, memory increments
        Operation::Asl => modify(regs, bus, operand, Registers::asl),
        Operation::Lsr => modify(regs, bus, operand, Registers::lsr),
        Operation::Rol => modify(regs, bus, operand, Registers::rol),
        Operation::Ror => modify(regs, bus, operand, Registers::ror),
        Operation::Inc => modify(regs, bus, operand, Registers::inc),
        Operation::Dec => modify(regs, bus, operand, Registers::dec),

        // Register increments
        Operation::Inx => regs.x = regs.inc(regs.x),
        Operation::Iny => regs.y = regs.inc(regs.y),
        Operation::Dex => regs.x = regs.dec(regs.x),
        Operation::Dey => regs.y = regs.dec(regs.y),

        // Transfers
        Operation::Tax => {
            regs.x = regs.a;
            regs.p.update_nz(regs.x);
        }
        Operation::Tay => {
            regs.y = regs.a;
            regs.p.update_nz(regs.y);
        }
        Operation::Txa => {
            regs.a = regs.x;
            regs.p.update_nz(regs.a);
        }
        Operation::Tya => {
            regs.a = regs.y;
            regs.p.update_nz(regs.a);
        }
        Operation::Tsx => {
            regs.x = regs.s;
            regs.p.update_nz(regs.x);
        }
        // TXS does not affect flags
        Operation::Txs => regs.s = regs.x,

        // Branches
        Operation::Bcc
        | Operation::Bcs
        | Operation::Bne
        | Operation::Beq
        | Operation::Bpl
        | Operation::Bmi
        | Operation::Bvc
        | Operation::Bvs => {
            let taken = branch_taken(op, regs.p);
            return branch(regs, operand, taken);
        }

        // Jumps
        Operation::Jmp => regs.pc = address(regs, operand),
        Operation::Jsr => {
            let target = address(regs, operand);
            // Return address minus one: the last byte of the JSR itself
            let ret = regs.pc.wrapping_sub(1);
            regs.push_word(bus, ret);
            regs.pc = target;
        }
        Operation::Rts => regs.pc = regs.pull_word(bus).wrapping_add(1),

        // Stack
        Operation::Pha => {
            let a = regs.a;
            regs.push(bus, a);
        }
        Operation::Php => {
            let p = regs.p.pushed(true);
            regs.push(bus, p);
        }
        Operation::Pla => {
            regs.a = regs.pull(bus);
            regs.p.update_nz(regs.a);
        }
        Operation::Plp => regs.p = Status::from_pulled(regs.pull(bus)),

        // Flags
        Operation::Clc => regs.p.set(Flag::Carry, false),
        Operation::Sec => regs.p.set(Flag::Carry, true),
        Operation::Cli => regs.p.set(Flag::InterruptDisable, false),
        Operation::Sei => regs.p.set(Flag::InterruptDisable, true),
        Operation::Cld => regs.p.set(Flag::Decimal, false),
        Operation::Sed => regs.p.set(Flag::Decimal, true),
        Operation::Clv => regs.p.set(Flag::Overflow, false),

        // System
        Operation::Brk => {
            // The byte after BRK is skipped on return
            let ret = regs.pc.wrapping_add(1);
            enter_interrupt(regs, bus, ret, IRQ_VECTOR, true);
        }
        Operation::Rti => {
            regs.p = Status::from_pulled(regs.pull(bus));
            regs.pc = regs.pull_word(bus);
        }
        Operation::Nop => {}
    }
    0
}

/// Push the return address and status, mask IRQs and jump through
/// `vector`. Shared by BRK and the hardware interrupt sequence; only the
/// pushed Break bit differs.
pub(crate) fn enter_interrupt<B: Bus>(
    regs: &mut Registers,
    bus: &mut B,
    return_addr: u16,
    vector: u16,
    software: bool,
) {
    regs.push_word(bus, return_addr);
    let p = regs.p.pushed(software);
    regs.push(bus, p);
    regs.p.set(Flag::InterruptDisable, true);
    regs.pc = read_word(bus, vector);
}

fn load<B: Bus>(regs: &Registers, bus: &mut B, operand: Operand) -> u8 {
    match operand {
        Operand::Accumulator => regs.a,
        Operand::Address(addr) => bus.read(addr),
    }
}

fn store<B: Bus>(regs: &mut Registers, bus: &mut B, operand: Operand, value: u8) {
    match operand {
        Operand::Accumulator => regs.a = value,
        Operand::Address(addr) => bus.write(addr, value),
    }
}

/// Read-modify-write. Memory targets see the unmodified value written
/// back before the result, as on NMOS parts.
fn modify<B: Bus>(
    regs: &mut Registers,
    bus: &mut B,
    operand: Operand,
    op: fn(&mut Registers, u8) -> u8,
) {
    match operand {
        Operand::Accumulator => {
            let value = regs.a;
            regs.a = op(regs, value);
        }
        Operand::Address(addr) => {
            let value = bus.read(addr);
            bus.write(addr, value);
            let result = op(regs, value);
            bus.write(addr, result);
        }
    }
}

fn address(regs: &Registers, operand: Operand) -> u16 {
    match operand {
        Operand::Accumulator => regs.pc,
        Operand::Address(addr) => addr,
    }
}

fn branch_taken(op: Operation, p: Status) -> bool {
    match op {
        Operation::Bcc => !p.get(Flag::Carry),
        Operation::Bcs => p.get(Flag::Carry),
        Operation::Bne => !p.get(Flag::Zero),
        Operation::Beq => p.get(Flag::Zero),
        Operation::Bpl => !p.get(Flag::Negative),
        Operation::Bmi => p.get(Flag::Negative),
        Operation::Bvc => !p.get(Flag::Overflow),
        Operation::Bvs => p.get(Flag::Overflow),
        _ => false,
    }
}

/// One extra cycle when taken, another when the target is in a different
/// page from the instruction that follows the branch.
fn branch(regs: &mut Registers, operand: Operand, condition: bool) -> u8 {
    if !condition {
        return 0;
    }
    let target = address(regs, operand);
    let extra = 1 + u8::from(page_crossed(regs.pc, target));
    regs.pc = target;
    extra
}
