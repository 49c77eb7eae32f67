//! Execution engine.
//!
//! The engine works at instruction granularity with cycle-accurate timing:
//! the tick that fetches an opcode performs the whole instruction (every bus
//! read and write it makes), and the following ticks count down the rest of
//! its cycle cost. Hosts that interleave the CPU with other devices see the
//! right number of cycles per instruction, but not the per-cycle bus
//! activity inside one.

use emu_core::{Bus, Cpu, Interrupt, Observable, Tickable, Value};

use crate::addressing::resolve;
use crate::operations::{IRQ_VECTOR, enter_interrupt, execute};
use crate::registers::read_word;
use crate::table::decode;
use crate::{BuildError, CpuConfig, Flag, Registers, Status};

/// Reset vector.
pub const RESET_VECTOR: u16 = 0xFFFC;

/// NMI vector.
pub const NMI_VECTOR: u16 = 0xFFFA;

/// Cycles taken by the NMI and IRQ service sequences.
pub const INTERRUPT_CYCLES: u32 = 7;

/// Interrupt requests latched but not yet serviced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PendingInterrupts {
    pub nmi: bool,
    pub irq: bool,
}

/// A 6502-family CPU driving its own bus.
///
/// Each [`tick`](Tickable::tick) is one CPU cycle. The CPU is idle when
/// [`cycles_remaining`](Self::cycles_remaining) is zero; the next tick then
/// services a pending interrupt or fetches and executes an instruction.
#[derive(Debug)]
pub struct Cpu6502<B: Bus> {
    regs: Registers,
    bus: B,
    config: CpuConfig,

    /// Cycles left in the current instruction or interrupt sequence.
    remaining: u32,

    /// Ticks since power-on. Not cleared by reset.
    total_cycles: u64,

    nmi_pending: bool,
    /// Stays latched while InterruptDisable is set.
    irq_pending: bool,
}

impl<B: Bus> Cpu6502<B> {
    /// Create a CPU on `bus` and run the reset sequence, which loads PC from
    /// the reset vector.
    pub fn new(bus: B, config: CpuConfig) -> Self {
        let mut cpu = Self {
            regs: Registers::new(),
            bus,
            config,
            remaining: 0,
            total_cycles: 0,
            nmi_pending: false,
            irq_pending: false,
        };
        cpu.reset();
        cpu
    }

    /// Run until the current instruction (or interrupt sequence) has used
    /// all its cycles. When idle, runs exactly one instruction. Returns the
    /// number of ticks taken.
    pub fn step(&mut self) -> u32 {
        let mut ticks = 0;
        loop {
            self.tick();
            ticks += 1;
            if self.remaining == 0 {
                return ticks;
            }
        }
    }

    /// Test a status flag.
    #[must_use]
    pub fn get_flag(&self, flag: Flag) -> bool {
        self.regs.p.get(flag)
    }

    /// Set or clear a status flag. Unused stays set regardless.
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        self.regs.p.set(flag, value);
    }

    #[must_use]
    pub fn a(&self) -> u8 {
        self.regs.a
    }

    #[must_use]
    pub fn x(&self) -> u8 {
        self.regs.x
    }

    #[must_use]
    pub fn y(&self) -> u8 {
        self.regs.y
    }

    #[must_use]
    pub fn sp(&self) -> u8 {
        self.regs.s
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.regs.p
    }

    /// Load a register snapshot. Takes effect at the next instruction
    /// boundary; the cycle countdown is left alone.
    pub fn set_registers(&mut self, regs: Registers) {
        self.regs = regs;
        self.regs.p = Status::from_byte(regs.p.bits());
    }

    #[must_use]
    pub fn config(&self) -> CpuConfig {
        self.config
    }

    /// Cycles left before the next instruction boundary.
    #[must_use]
    pub fn cycles_remaining(&self) -> u32 {
        self.remaining
    }

    /// Ticks since power-on.
    #[must_use]
    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    #[must_use]
    pub fn pending_interrupts(&self) -> PendingInterrupts {
        PendingInterrupts {
            nmi: self.nmi_pending,
            irq: self.irq_pending,
        }
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Tear the CPU down and hand back its bus.
    pub fn into_bus(self) -> B {
        self.bus
    }

    /// Instruction boundary: service an interrupt or run one instruction.
    /// Returns its full cycle cost.
    fn begin(&mut self) -> u32 {
        if self.nmi_pending {
            self.nmi_pending = false;
            self.service_interrupt(Interrupt::Nmi);
            return INTERRUPT_CYCLES;
        }
        if self.irq_pending && !self.regs.p.get(Flag::InterruptDisable) {
            self.irq_pending = false;
            self.service_interrupt(Interrupt::Irq);
            return INTERRUPT_CYCLES;
        }
        self.execute_instruction()
    }

    fn service_interrupt(&mut self, kind: Interrupt) {
        let vector = match kind {
            Interrupt::Nmi => NMI_VECTOR,
            Interrupt::Irq => IRQ_VECTOR,
        };
        let return_addr = self.regs.pc;
        enter_interrupt(&mut self.regs, &mut self.bus, return_addr, vector, false);
        log::debug!(
            "{kind:?} at {return_addr:04X}: vector {vector:04X} -> {:04X}",
            self.regs.pc
        );
    }

    fn execute_instruction(&mut self) -> u32 {
        let pc = self.regs.pc;
        let opcode = self.regs.fetch(&mut self.bus);
        self.regs.p.set(Flag::Unused, true);
        let descriptor = decode(opcode);

        log::trace!(
            "{pc:04X}  {opcode:02X}  {:<4} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            descriptor.mnemonic(),
            self.regs.a,
            self.regs.x,
            self.regs.y,
            self.regs.p.bits(),
            self.regs.s,
            self.total_cycles - 1,
        );
        if !descriptor.documented {
            log::debug!("undocumented opcode {opcode:02X} at {pc:04X}, executed as NOP");
        }

        let resolved = resolve(descriptor.mode, &mut self.regs, &mut self.bus);
        let page_penalty = if descriptor.operation.pays_page_penalty() {
            resolved.extra_cycles
        } else {
            0
        };
        let op_extra = execute(
            descriptor.operation,
            &mut self.regs,
            &mut self.bus,
            resolved.operand,
            self.config.variant.decimal_enabled(),
        );

        u32::from(descriptor.cycles) + u32::from(page_penalty) + u32::from(op_extra)
    }
}

impl<B: Bus> Tickable for Cpu6502<B> {
    fn tick(&mut self) {
        self.total_cycles += 1;
        if self.remaining == 0 {
            self.remaining = self.begin();
        }
        self.remaining -= 1;
    }
}

impl<B: Bus> Cpu for Cpu6502<B> {
    type Registers = Registers;

    fn pc(&self) -> u16 {
        self.regs.pc
    }

    fn registers(&self) -> Registers {
        self.regs
    }

    fn request_interrupt(&mut self, kind: Interrupt) {
        match kind {
            Interrupt::Nmi => self.nmi_pending = true,
            Interrupt::Irq => self.irq_pending = true,
        }
    }

    /// A=X=Y=0, S=$FD, P=$24, PC from the reset vector. Pending interrupts
    /// and any unfinished cycle countdown are discarded.
    fn reset(&mut self) {
        self.regs = Registers::new();
        self.regs.pc = read_word(&mut self.bus, RESET_VECTOR);
        self.remaining = 0;
        self.nmi_pending = false;
        self.irq_pending = false;
        log::debug!("reset: PC={:04X}", self.regs.pc);
    }

    fn is_instruction_complete(&self) -> bool {
        self.remaining == 0
    }
}

impl<B: Bus> Observable for Cpu6502<B> {
    fn query(&self, path: &str) -> Option<Value> {
        match path {
            "pc" => Some(self.regs.pc.into()),
            "a" => Some(self.regs.a.into()),
            "x" => Some(self.regs.x.into()),
            "y" => Some(self.regs.y.into()),
            "s" | "sp" => Some(self.regs.s.into()),
            "p" | "status" => Some(self.regs.p.bits().into()),
            "flags.c" => Some(self.regs.p.get(Flag::Carry).into()),
            "flags.z" => Some(self.regs.p.get(Flag::Zero).into()),
            "flags.i" => Some(self.regs.p.get(Flag::InterruptDisable).into()),
            "flags.d" => Some(self.regs.p.get(Flag::Decimal).into()),
            "flags.v" => Some(self.regs.p.get(Flag::Overflow).into()),
            "flags.n" => Some(self.regs.p.get(Flag::Negative).into()),
            "cycle" => Some(Value::U64(self.total_cycles)),
            "remaining" => Some(Value::U32(self.remaining)),
            "nmi_pending" => Some(self.nmi_pending.into()),
            "irq_pending" => Some(self.irq_pending.into()),
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "pc",
            "a",
            "x",
            "y",
            "s",
            "p",
            "flags.c",
            "flags.z",
            "flags.i",
            "flags.d",
            "flags.v",
            "flags.n",
            "cycle",
            "remaining",
            "nmi_pending",
            "irq_pending",
        ]
    }
}

/// Builder for [`Cpu6502`], for hosts that assemble the bus separately from
/// the configuration.
#[derive(Debug)]
pub struct CpuBuilder<B> {
    bus: Option<B>,
    config: CpuConfig,
}

impl<B: Bus> Default for CpuBuilder<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Bus> CpuBuilder<B> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            bus: None,
            config: CpuConfig::default(),
        }
    }

    #[must_use]
    pub fn bus(mut self, bus: B) -> Self {
        self.bus = Some(bus);
        self
    }

    #[must_use]
    pub fn config(mut self, config: CpuConfig) -> Self {
        self.config = config;
        self
    }

    /// Build and reset the CPU.
    pub fn build(self) -> Result<Cpu6502<B>, BuildError> {
        let bus = self.bus.ok_or(BuildError::MissingBus)?;
        Ok(Cpu6502::new(bus, self.config))
    }
}
