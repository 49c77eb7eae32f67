//! Arithmetic and logic unit.
//!
//! Pure register-level operations: each takes the operand byte and updates
//! A and/or P. Memory access is the caller's job.

use crate::{Flag, Registers};

impl Registers {
    /// ADC. `bcd` selects decimal arithmetic when the D flag is set.
    pub(crate) fn adc(&mut self, value: u8, bcd: bool) {
        if bcd && self.p.get(Flag::Decimal) {
            self.adc_decimal(value);
        } else {
            self.adc_binary(value);
        }
    }

    fn adc_binary(&mut self, value: u8) {
        let carry = u16::from(self.p.get(Flag::Carry));
        let sum = u16::from(self.a) + u16::from(value) + carry;
        let result = sum as u8;

        self.p.set(Flag::Carry, sum > 0xFF);
        self.p
            .set(Flag::Overflow, (self.a ^ result) & (value ^ result) & 0x80 != 0);
        self.p.update_nz(result);
        self.a = result;
    }

    /// NMOS decimal add: Z comes from the binary sum, N and V from the
    /// sum after only the low nibble has been adjusted.
    fn adc_decimal(&mut self, value: u8) {
        let a = u16::from(self.a);
        let v = u16::from(value);
        let carry = u16::from(self.p.get(Flag::Carry));

        let mut lo = (a & 0x0F) + (v & 0x0F) + carry;
        if lo > 0x09 {
            lo += 0x06;
        }
        let mut hi = (a >> 4) + (v >> 4) + u16::from(lo > 0x0F);

        let binary = (a + v + carry) as u8;
        let intermediate = ((hi << 4) | (lo & 0x0F)) as u8;
        self.p.set(Flag::Zero, binary == 0);
        self.p.set(Flag::Negative, intermediate & 0x80 != 0);
        self.p.set(
            Flag::Overflow,
            (self.a ^ intermediate) & (value ^ intermediate) & 0x80 != 0,
        );

        if hi > 0x09 {
            hi += 0x06;
        }
        self.p.set(Flag::Carry, hi > 0x0F);
        self.a = ((hi << 4) | (lo & 0x0F)) as u8;
    }

    /// SBC. `bcd` selects decimal arithmetic when the D flag is set.
    pub(crate) fn sbc(&mut self, value: u8, bcd: bool) {
        if bcd && self.p.get(Flag::Decimal) {
            self.sbc_decimal(value);
        } else {
            // A - M - !C is A + !M + C.
            self.adc_binary(!value);
        }
    }

    /// NMOS decimal subtract: every flag comes from the binary result,
    /// only A is BCD-adjusted.
    fn sbc_decimal(&mut self, value: u8) {
        let a = i16::from(self.a);
        let v = i16::from(value);
        let borrow = i16::from(!self.p.get(Flag::Carry));

        let binary = a - v - borrow;
        let result = binary as u8;
        self.p.set(Flag::Carry, binary >= 0);
        self.p
            .set(Flag::Overflow, (self.a ^ value) & (self.a ^ result) & 0x80 != 0);
        self.p.update_nz(result);

        let mut lo = (a & 0x0F) - (v & 0x0F) - borrow;
        if lo < 0 {
            lo = ((lo - 0x06) & 0x0F) - 0x10;
        }
        let mut adjusted = (a & 0xF0) - (v & 0xF0) + lo;
        if adjusted < 0 {
            adjusted -= 0x60;
        }
        self.a = adjusted as u8;
    }

    /// CMP/CPX/CPY: subtract without storing.
    pub(crate) fn compare(&mut self, register: u8, value: u8) {
        self.p.set(Flag::Carry, register >= value);
        self.p.update_nz(register.wrapping_sub(value));
    }

    pub(crate) fn and(&mut self, value: u8) {
        self.a &= value;
        self.p.update_nz(self.a);
    }

    pub(crate) fn ora(&mut self, value: u8) {
        self.a |= value;
        self.p.update_nz(self.a);
    }

    pub(crate) fn eor(&mut self, value: u8) {
        self.a ^= value;
        self.p.update_nz(self.a);
    }

    /// BIT: Z from A AND M, N and V copied from bits 7 and 6 of M.
    pub(crate) fn bit(&mut self, value: u8) {
        self.p.set(Flag::Zero, self.a & value == 0);
        self.p.set(Flag::Negative, value & 0x80 != 0);
        self.p.set(Flag::Overflow, value & 0x40 != 0);
    }

    pub(crate) fn asl(&mut self, value: u8) -> u8 {
        self.p.set(Flag::Carry, value & 0x80 != 0);
        let result = value << 1;
        self.p.update_nz(result);
        result
    }

    pub(crate) fn lsr(&mut self, value: u8) -> u8 {
        self.p.set(Flag::Carry, value & 0x01 != 0);
        let result = value >> 1;
        self.p.update_nz(result);
        result
    }

    pub(crate) fn rol(&mut self, value: u8) -> u8 {
        let carry_in = u8::from(self.p.get(Flag::Carry));
        self.p.set(Flag::Carry, value & 0x80 != 0);
        let result = (value << 1) | carry_in;
        self.p.update_nz(result);
        result
    }

    pub(crate) fn ror(&mut self, value: u8) -> u8 {
        let carry_in = u8::from(self.p.get(Flag::Carry)) << 7;
        self.p.set(Flag::Carry, value & 0x01 != 0);
        let result = (value >> 1) | carry_in;
        self.p.update_nz(result);
        result
    }

    pub(crate) fn inc(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.p.update_nz(result);
        result
    }

    pub(crate) fn dec(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.p.update_nz(result);
        result
    }
}
