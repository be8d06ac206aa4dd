use std::collections::HashMap;

use crate::vm::error::VMFault;
use crate::vm::registers::Register;
use crate::vm::state::VMState;

/// Shared branch logic for JZ/JNZ. The label is only looked up when the
/// branch is taken.
fn branch(
    state: &mut VMState,
    labels: &HashMap<String, usize>,
    label: &str,
    taken: bool,
) -> Result<(), VMFault> {
    if taken {
        let target = labels
            .get(label)
            .copied()
            .ok_or_else(|| VMFault::UndefinedLabel(label.to_string()))?;
        state.jump(target);
    } else {
        state.advance_pc();
    }
    Ok(())
}

/// JZ: jump when the register is zero
pub fn jz(
    state: &mut VMState,
    labels: &HashMap<String, usize>,
    reg: Register,
    label: &str,
) -> Result<(), VMFault> {
    let value = state.registers.get(reg);
    crate::debug_instructions!("Jz: {} = {}. Jumping to {}? {}", reg, value, label, value == 0);
    branch(state, labels, label, value == 0)
}

/// JNZ: jump when the register is not zero
pub fn jnz(
    state: &mut VMState,
    labels: &HashMap<String, usize>,
    reg: Register,
    label: &str,
) -> Result<(), VMFault> {
    let value = state.registers.get(reg);
    crate::debug_instructions!("Jnz: {} = {}. Jumping to {}? {}", reg, value, label, value != 0);
    branch(state, labels, label, value != 0)
}
