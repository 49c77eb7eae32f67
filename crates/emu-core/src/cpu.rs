//! CPU core trait.

/// Hardware interrupt request lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interrupt {
    /// Non-maskable interrupt. Always serviced at the next instruction
    /// boundary, and takes priority over IRQ.
    Nmi,
    /// Maskable interrupt. Ignored while the interrupt-disable flag is set.
    Irq,
}

/// A CPU core, as seen by its host.
///
/// Cycle advancement comes from [`Tickable`](crate::Tickable); this trait
/// covers the rest of the host contract. The CPU owns its bus, so none of
/// these methods take one.
pub trait Cpu {
    /// The type used for register inspection.
    type Registers;

    /// Returns the current program counter.
    fn pc(&self) -> u16;

    /// Returns a snapshot of all registers for inspection.
    fn registers(&self) -> Self::Registers;

    /// Latch an interrupt request. It is serviced at the next instruction
    /// boundary where it is allowed.
    ///
    /// Requests are sampled only at instruction boundaries; a caller that
    /// sets and withdraws a request within one instruction may lose it.
    fn request_interrupt(&mut self, kind: Interrupt);

    /// Reset the CPU to its initial state.
    fn reset(&mut self);

    /// Returns true when the CPU is between instructions.
    fn is_instruction_complete(&self) -> bool;
}
