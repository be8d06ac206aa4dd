// VM State: registers, pc, cycle counter and the exercises emitted so far

use super::registers::Registers;
use crate::routine::Exercise;

/// Mutable state of one program run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VMState {
    pub registers: Registers,
    pub pc: usize,          // Program counter
    pub cycle_count: u64,   // Instructions completed, HALT excluded
    pub exercises: Vec<Exercise>,
}

impl VMState {
    pub fn new() -> Self {
        VMState::default()
    }

    pub fn with_registers(registers: Registers) -> Self {
        VMState {
            registers,
            ..VMState::default()
        }
    }

    pub fn advance_pc(&mut self) {
        self.pc += 1;
    }

    pub fn jump(&mut self, target: usize) {
        self.pc = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::registers::Register;

    #[test]
    fn test_vm_state_init() {
        let vm = VMState::new();
        assert_eq!(vm.pc, 0);
        assert_eq!(vm.cycle_count, 0);
        assert!(vm.exercises.is_empty());
        assert_eq!(vm.registers.get(Register::R0), 0);
        assert_eq!(vm.registers.get(Register::R1), 0);
    }

    #[test]
    fn test_pc_movement() {
        let mut vm = VMState::new();
        vm.advance_pc();
        vm.advance_pc();
        assert_eq!(vm.pc, 2);
        vm.jump(0);
        assert_eq!(vm.pc, 0);
    }
}
