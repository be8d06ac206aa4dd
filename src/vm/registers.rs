// VM Register system: register enum, storage, and access logic

use std::fmt;
use std::str::FromStr;

use super::error::RegisterError;

/// Enum for all VM registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    R0,
    R1,
}

impl Register {
    fn idx(self) -> usize {
        match self {
            Register::R0 => 0,
            Register::R1 => 1,
        }
    }
}

impl FromStr for Register {
    type Err = RegisterError;

    /// Register names are case-sensitive: `r0` is not a register.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "R0" => Ok(Register::R0),
            "R1" => Ok(Register::R1),
            _ => Err(RegisterError::InvalidRegister(s.to_string())),
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Register::R0 => f.write_str("R0"),
            Register::R1 => f.write_str("R1"),
        }
    }
}

/// Storage for all VM registers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Registers {
    data: [i64; 2],
}

impl Registers {
    pub fn new() -> Self {
        Registers::default()
    }

    pub fn get(&self, reg: Register) -> i64 {
        self.data[reg.idx()]
    }

    pub fn set(&mut self, reg: Register, value: i64) {
        self.data[reg.idx()] = value;
    }

    /// Increments without an upper bound other than the integer range itself
    pub fn increment(&mut self, reg: Register) {
        let slot = &mut self.data[reg.idx()];
        *slot = slot.saturating_add(1);
    }

    /// Decrements, stopping at zero
    pub fn decrement(&mut self, reg: Register) {
        let slot = &mut self.data[reg.idx()];
        if *slot > 0 {
            *slot -= 1;
        }
    }
}

impl fmt::Display for Registers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R0={} R1={}", self.get(Register::R0), self.get(Register::R1))
    }
}
