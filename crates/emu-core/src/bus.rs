//! Memory and I/O bus interface.

/// Memory and I/O bus interface.
///
/// A CPU reads and writes every byte through this trait and never caches
/// anything it reads. Implementations route addresses to RAM, mapped
/// devices or open bus. Reads may have side effects (mapped I/O registers),
/// which is why `read` takes `&mut self`.
///
/// Unmapped addresses are the implementation's business: the convention in
/// this workspace is that reads return 0 and writes are dropped.
pub trait Bus {
    /// Read a byte from the given address.
    fn read(&mut self, address: u16) -> u8;

    /// Write a byte to the given address.
    fn write(&mut self, address: u16, value: u8);
}

/// Full address space, in bytes.
const ADDRESS_SPACE: usize = 0x1_0000;

/// Flat RAM bus for tests and simple hosts.
///
/// Maps `0..mapped` to RAM. Anything above is unmapped: reads return 0 and
/// writes are silently dropped.
#[derive(Debug, Clone)]
pub struct SimpleBus {
    ram: Vec<u8>,
}

impl Default for SimpleBus {
    fn default() -> Self {
        Self::new()
    }
}

impl SimpleBus {
    /// A bus with the whole 64K address space mapped to RAM.
    #[must_use]
    pub fn new() -> Self {
        Self::with_mapped(ADDRESS_SPACE)
    }

    /// A bus with only the first `mapped` bytes backed by RAM.
    ///
    /// `mapped` is clamped to the 64K address space.
    #[must_use]
    pub fn with_mapped(mapped: usize) -> Self {
        Self {
            ram: vec![0; mapped.min(ADDRESS_SPACE)],
        }
    }

    /// Number of mapped bytes.
    #[must_use]
    pub fn mapped(&self) -> usize {
        self.ram.len()
    }

    /// Copy `data` into RAM starting at `address`.
    ///
    /// Bytes that would land outside the mapped range are dropped; the
    /// copy does not wrap past $FFFF.
    pub fn load(&mut self, address: u16, data: &[u8]) {
        let start = usize::from(address);
        if start >= self.ram.len() {
            return;
        }
        let end = (start + data.len()).min(self.ram.len());
        self.ram[start..end].copy_from_slice(&data[..end - start]);
    }

    /// Read without side effects (for observation and test assertions).
    #[must_use]
    pub fn peek(&self, address: u16) -> u8 {
        self.ram.get(usize::from(address)).copied().unwrap_or(0)
    }

    /// Little-endian word at `address`, as the CPU reads vectors.
    #[must_use]
    pub fn peek_word(&self, address: u16) -> u16 {
        u16::from_le_bytes([self.peek(address), self.peek(address.wrapping_add(1))])
    }

    /// Store a little-endian word, e.g. to set up a reset or interrupt vector.
    pub fn poke_word(&mut self, address: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.write(address, lo);
        self.write(address.wrapping_add(1), hi);
    }
}

impl Bus for SimpleBus {
    fn read(&mut self, address: u16) -> u8 {
        self.peek(address)
    }

    fn write(&mut self, address: u16, value: u8) {
        if let Some(cell) = self.ram.get_mut(usize::from(address)) {
            *cell = value;
        }
    }
}
