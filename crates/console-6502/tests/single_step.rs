//! Before/after CPU states in the `SingleStepTests` JSON layout.
//!
//! Each case runs exactly `cycles.len()` ticks from the initial state, then
//! expects the instruction to be complete and the final state to match.

use console_6502::{Cpu6502, CpuConfig, Registers, Status};
use emu_core::{Cpu, SimpleBus, Tickable};
use serde::Deserialize;

#[derive(Deserialize)]
struct TestCase {
    name: String,
    initial: CpuState,
    #[serde(rename = "final")]
    final_state: CpuState,
    cycles: Vec<(u16, u8, String)>,
}

#[derive(Deserialize)]
struct CpuState {
    pc: u16,
    s: u8,
    a: u8,
    x: u8,
    y: u8,
    p: u8,
    ram: Vec<(u16, u8)>,
}

fn setup(state: &CpuState) -> Cpu6502<SimpleBus> {
    let mut bus = SimpleBus::new();
    for &(addr, value) in &state.ram {
        bus.load(addr, &[value]);
    }
    let mut cpu = Cpu6502::new(bus, CpuConfig::default());
    cpu.set_registers(Registers {
        a: state.a,
        x: state.x,
        y: state.y,
        s: state.s,
        pc: state.pc,
        p: Status::from_byte(state.p),
    });
    cpu
}

fn compare(cpu: &Cpu6502<SimpleBus>, expected: &CpuState) -> Vec<String> {
    let mut errors = Vec::new();
    let regs = cpu.registers();

    let checks = [
        ("PC", u32::from(regs.pc), u32::from(expected.pc)),
        ("S", u32::from(regs.s), u32::from(expected.s)),
        ("A", u32::from(regs.a), u32::from(expected.a)),
        ("X", u32::from(regs.x), u32::from(expected.x)),
        ("Y", u32::from(regs.y), u32::from(expected.y)),
        ("P", u32::from(regs.p.bits()), u32::from(expected.p | 0x20)),
    ];
    for (name, got, want) in checks {
        if got != want {
            errors.push(format!("{name}: got ${got:02X}, want ${want:02X}"));
        }
    }

    for &(addr, want) in &expected.ram {
        let got = cpu.bus().peek(addr);
        if got != want {
            errors.push(format!("RAM[${addr:04X}]: got ${got:02X}, want ${want:02X}"));
        }
    }

    errors
}

const CASES: &str = r#"[
  {
    "name": "a9 lda immediate sets N",
    "initial": { "pc": 512, "s": 253, "a": 0, "x": 0, "y": 0, "p": 36,
                 "ram": [[512, 169], [513, 128]] },
    "final":   { "pc": 514, "s": 253, "a": 128, "x": 0, "y": 0, "p": 164,
                 "ram": [[512, 169], [513, 128]] },
    "cycles": [[512, 169, "read"], [513, 128, "read"]]
  },
  {
    "name": "69 adc decimal",
    "initial": { "pc": 512, "s": 253, "a": 25, "x": 0, "y": 0, "p": 40,
                 "ram": [[512, 105], [513, 1]] },
    "final":   { "pc": 514, "s": 253, "a": 32, "x": 0, "y": 0, "p": 40,
                 "ram": [] },
    "cycles": [[512, 105, "read"], [513, 1, "read"]]
  },
  {
    "name": "9d sta abs,x across page",
    "initial": { "pc": 512, "s": 253, "a": 90, "x": 1, "y": 0, "p": 36,
                 "ram": [[512, 157], [513, 255], [514, 32]] },
    "final":   { "pc": 515, "s": 253, "a": 90, "x": 1, "y": 0, "p": 36,
                 "ram": [[8448, 90]] },
    "cycles": [[512, 157, "read"], [513, 255, "read"], [514, 32, "read"],
               [8447, 0, "read"], [8448, 90, "write"]]
  },
  {
    "name": "6c jmp indirect page wrap",
    "initial": { "pc": 512, "s": 253, "a": 0, "x": 0, "y": 0, "p": 36,
                 "ram": [[512, 108], [513, 255], [514, 16],
                         [4351, 52], [4096, 18], [4352, 153]] },
    "final":   { "pc": 4660, "s": 253, "a": 0, "x": 0, "y": 0, "p": 36,
                 "ram": [] },
    "cycles": [[512, 108, "read"], [513, 255, "read"], [514, 16, "read"],
               [4351, 52, "read"], [4096, 18, "read"]]
  },
  {
    "name": "00 brk",
    "initial": { "pc": 1024, "s": 255, "a": 0, "x": 0, "y": 0, "p": 32,
                 "ram": [[1024, 0], [65534, 52], [65535, 18]] },
    "final":   { "pc": 4660, "s": 252, "a": 0, "x": 0, "y": 0, "p": 36,
                 "ram": [[511, 4], [510, 2], [509, 48]] },
    "cycles": [[1024, 0, "read"], [1025, 0, "read"], [511, 4, "write"],
               [510, 2, "write"], [509, 48, "write"], [65534, 52, "read"],
               [65535, 18, "read"]]
  },
  {
    "name": "60 rts",
    "initial": { "pc": 512, "s": 253, "a": 0, "x": 0, "y": 0, "p": 36,
                 "ram": [[512, 96], [510, 2], [511, 3]] },
    "final":   { "pc": 771, "s": 255, "a": 0, "x": 0, "y": 0, "p": 36,
                 "ram": [] },
    "cycles": [[512, 96, "read"], [513, 0, "read"], [509, 0, "read"],
               [510, 2, "read"], [511, 3, "read"], [770, 0, "read"]]
  },
  {
    "name": "f0 beq taken across page",
    "initial": { "pc": 765, "s": 253, "a": 0, "x": 0, "y": 0, "p": 38,
                 "ram": [[765, 240], [766, 5]] },
    "final":   { "pc": 772, "s": 253, "a": 0, "x": 0, "y": 0, "p": 38,
                 "ram": [] },
    "cycles": [[765, 240, "read"], [766, 5, "read"], [767, 0, "read"],
               [516, 0, "read"]]
  },
  {
    "name": "28 plp drops break",
    "initial": { "pc": 512, "s": 252, "a": 0, "x": 0, "y": 0, "p": 36,
                 "ram": [[512, 40], [509, 255]] },
    "final":   { "pc": 513, "s": 253, "a": 0, "x": 0, "y": 0, "p": 239,
                 "ram": [] },
    "cycles": [[512, 40, "read"], [513, 0, "read"], [508, 0, "read"],
               [509, 255, "read"]]
  },
  {
    "name": "04 undocumented nop zp",
    "initial": { "pc": 512, "s": 253, "a": 0, "x": 0, "y": 0, "p": 36,
                 "ram": [[512, 4], [513, 68]] },
    "final":   { "pc": 514, "s": 253, "a": 0, "x": 0, "y": 0, "p": 36,
                 "ram": [] },
    "cycles": [[512, 4, "read"], [513, 68, "read"], [68, 0, "read"]]
  }
]"#;

#[test]
fn single_step_cases() {
    let cases: Vec<TestCase> = serde_json::from_str(CASES).expect("valid test JSON");
    assert!(!cases.is_empty());

    let mut failures = Vec::new();
    for case in &cases {
        let mut cpu = setup(&case.initial);
        for _ in 0..case.cycles.len() {
            cpu.tick();
        }

        let mut errors = compare(&cpu, &case.final_state);
        if !cpu.is_instruction_complete() {
            errors.push(format!(
                "still busy after {} cycles ({} left)",
                case.cycles.len(),
                cpu.cycles_remaining()
            ));
        }
        if !errors.is_empty() {
            failures.push(format!("[{}]: {}", case.name, errors.join(", ")));
        }
    }

    assert!(failures.is_empty(), "{}", failures.join("\n"));
}
