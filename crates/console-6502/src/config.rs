//! Core configuration.

/// Which member of the 6502 family to emulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Variant {
    /// Stock NMOS 6502 with decimal-mode ADC/SBC.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "nmos6502"))]
    Nmos6502,
    /// Ricoh 2A03/2A07 console CPU. The D flag is still stored, pushed and
    /// pulled, but ADC/SBC ignore it.
    #[cfg_attr(feature = "serde", serde(rename = "ricoh2a03"))]
    Ricoh2A03,
}

impl Variant {
    /// Whether ADC/SBC honor the Decimal flag.
    #[must_use]
    pub const fn decimal_enabled(self) -> bool {
        matches!(self, Self::Nmos6502)
    }
}

/// Configuration for [`Cpu6502`](crate::Cpu6502).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CpuConfig {
    pub variant: Variant,
}

impl CpuConfig {
    #[must_use]
    pub const fn new(variant: Variant) -> Self {
        Self { variant }
    }
}
