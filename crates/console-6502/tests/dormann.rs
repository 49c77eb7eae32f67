//! Klaus Dormann's 6502 functional test.
//!
//! The binary is assembled with load address $0000 and entry point $0400.
//! Every failure traps in a branch-to-self; success traps at $3469.

use console_6502::{Cpu6502, CpuConfig, RESET_VECTOR};
use emu_core::{Cpu, SimpleBus};

const ENTRY: u16 = 0x0400;
const SUCCESS: u16 = 0x3469;

/// Run until the program traps. Returns the trap address.
fn run_until_trap(cpu: &mut Cpu6502<SimpleBus>, limit: u64) -> Option<u16> {
    let mut instructions = 0u64;
    loop {
        let pc = cpu.pc();
        cpu.step();
        instructions += 1;

        if cpu.pc() == pc {
            eprintln!(
                "Trapped at ${pc:04X} after {instructions} instructions ({} cycles)",
                cpu.total_cycles()
            );
            return Some(pc);
        }
        if instructions % 1_000_000 == 0 {
            eprint!("\r[{instructions} instructions, PC=${:04X}]", cpu.pc());
        }
        if instructions > limit {
            eprintln!("\nExceeded {limit} instructions");
            return None;
        }
    }
}

#[test]
#[ignore]
fn dormann_functional() {
    let binary = std::fs::read("tests/data/6502_functional_test.bin").expect(
        "tests/data/6502_functional_test.bin not found - download from Klaus Dormann's repository",
    );

    let mut bus = SimpleBus::new();
    bus.load(0x0000, &binary);
    bus.poke_word(RESET_VECTOR, ENTRY);
    let mut cpu = Cpu6502::new(bus, CpuConfig::default());

    let trap = run_until_trap(&mut cpu, 100_000_000);
    assert_eq!(trap, Some(SUCCESS), "Klaus Dormann 6502 functional test failed");
}
