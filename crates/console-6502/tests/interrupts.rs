//! NMI, IRQ, BRK and RTI sequencing and timing.

use console_6502::{
    Cpu6502, CpuConfig, Flag, IRQ_VECTOR, NMI_VECTOR, PendingInterrupts, RESET_VECTOR,
};
use emu_core::{Cpu, Interrupt, SimpleBus, Tickable};

const MAIN: u16 = 0x8000;
const NMI_HANDLER: u16 = 0x9000;
const IRQ_HANDLER: u16 = 0xA000;

/// Main program at $8000 and both handlers a single RTI.
fn system(program: &[u8]) -> Cpu6502<SimpleBus> {
    let mut bus = SimpleBus::new();
    bus.load(MAIN, program);
    bus.load(NMI_HANDLER, &[0x40]);
    bus.load(IRQ_HANDLER, &[0x40]);
    bus.poke_word(RESET_VECTOR, MAIN);
    bus.poke_word(NMI_VECTOR, NMI_HANDLER);
    bus.poke_word(IRQ_VECTOR, IRQ_HANDLER);
    Cpu6502::new(bus, CpuConfig::default())
}

#[test]
fn nmi_is_not_masked_by_interrupt_disable() {
    let mut cpu = system(&[0xEA, 0xEA]);
    assert!(cpu.get_flag(Flag::InterruptDisable));
    cpu.request_interrupt(Interrupt::Nmi);

    assert_eq!(cpu.step(), 7);
    assert_eq!(cpu.pc(), NMI_HANDLER);
    assert_eq!(cpu.sp(), 0xFA);
    assert_eq!(cpu.bus().peek(0x01FB), 0x24, "B clear, U set, I as before");
}

#[test]
fn nmi_has_priority_over_irq() {
    let mut cpu = system(&[0x58, 0xEA, 0xEA]); // CLI; NOP; NOP
    cpu.step();
    cpu.request_interrupt(Interrupt::Irq);
    cpu.request_interrupt(Interrupt::Nmi);

    cpu.step();
    assert_eq!(cpu.pc(), NMI_HANDLER);
    let pending = cpu.pending_interrupts();
    assert!(!pending.nmi);
    assert!(pending.irq, "IRQ waits behind the NMI");

    // The NMI set I, so the IRQ stays latched until RTI clears it again
    cpu.step();
    assert_eq!(cpu.pc(), MAIN + 1);
    assert_eq!(cpu.step(), 7);
    assert_eq!(cpu.pc(), IRQ_HANDLER);
    assert!(!cpu.pending_interrupts().irq);
}

#[test]
fn irq_latched_while_masked_then_serviced() {
    let mut cpu = system(&[0xEA, 0x58, 0xEA]); // NOP; CLI; NOP
    cpu.request_interrupt(Interrupt::Irq);

    cpu.step();
    assert_eq!(cpu.pc(), MAIN + 1, "masked IRQ must not be taken");
    assert!(cpu.pending_interrupts().irq);

    cpu.step();
    assert!(!cpu.get_flag(Flag::InterruptDisable));

    assert_eq!(cpu.step(), 7);
    assert_eq!(cpu.pc(), IRQ_HANDLER);
    assert!(cpu.get_flag(Flag::InterruptDisable));

    let pushed_p = cpu.bus().peek(0x01FB);
    assert_eq!(pushed_p & 0x30, 0x20, "hardware IRQ pushes B=0, U=1");
    assert_eq!(pushed_p & 0x04, 0x00, "I was clear when the IRQ hit");
    assert_eq!(cpu.bus().peek(0x01FD), 0x80);
    assert_eq!(cpu.bus().peek(0x01FC), 0x02);
}

#[test]
fn rti_returns_to_interrupted_instruction() {
    let mut cpu = system(&[0x58, 0xA9, 0x01]); // CLI; LDA #$01
    cpu.step();
    cpu.request_interrupt(Interrupt::Irq);

    cpu.step();
    assert_eq!(cpu.pc(), IRQ_HANDLER);

    assert_eq!(cpu.step(), 6, "RTI takes 6 cycles");
    assert_eq!(cpu.pc(), MAIN + 1);
    assert_eq!(cpu.sp(), 0xFD);
    assert!(!cpu.get_flag(Flag::InterruptDisable), "RTI restores I");

    cpu.step();
    assert_eq!(cpu.a(), 0x01);
}

#[test]
fn brk_pushes_break_and_skips_padding_byte() {
    let mut cpu = system(&[
        0x58, //       CLI
        0x00, 0xEA, // BRK + padding
        0xA9, 0x05, // LDA #$05
    ]);
    cpu.step();

    assert_eq!(cpu.step(), 7, "BRK takes 7 cycles");
    assert_eq!(cpu.pc(), IRQ_HANDLER);
    assert!(cpu.get_flag(Flag::InterruptDisable));
    assert!(!cpu.get_flag(Flag::Break), "live P has no B bit");

    assert_eq!(cpu.bus().peek(0x01FD), 0x80);
    assert_eq!(cpu.bus().peek(0x01FC), 0x03);
    let pushed_p = cpu.bus().peek(0x01FB);
    assert_eq!(pushed_p & 0x30, 0x30, "BRK pushes B=1, U=1");

    cpu.step();
    assert_eq!(cpu.pc(), MAIN + 3);
    assert!(!cpu.get_flag(Flag::Break));
    cpu.step();
    assert_eq!(cpu.a(), 0x05);
}

#[test]
fn interrupts_wait_for_instruction_boundary() {
    let mut cpu = system(&[0xAD, 0x00, 0x20, 0xEA]); // LDA $2000; NOP

    cpu.tick();
    cpu.request_interrupt(Interrupt::Nmi);
    for _ in 0..3 {
        cpu.tick();
    }
    assert!(cpu.is_instruction_complete());
    assert_eq!(cpu.pc(), MAIN + 3, "LDA finished before the NMI");
    assert!(cpu.pending_interrupts().nmi);

    cpu.tick();
    assert_eq!(cpu.pc(), NMI_HANDLER);
    assert_eq!(cpu.cycles_remaining(), 6);
}

#[test]
fn reset_clears_pending_requests() {
    let mut cpu = system(&[0xEA, 0xEA]);
    cpu.request_interrupt(Interrupt::Nmi);
    cpu.request_interrupt(Interrupt::Irq);
    cpu.reset();

    assert_eq!(cpu.pending_interrupts(), PendingInterrupts::default());
    cpu.step();
    assert_eq!(cpu.pc(), MAIN + 1);
}
