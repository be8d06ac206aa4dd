use crate::sensors::{SensorMap, sensor_names};
use crate::vm::error::VMFault;
use crate::vm::registers::Register;
use crate::vm::state::VMState;

/// INC: add one, no upper bound
pub fn inc(state: &mut VMState, reg: Register) {
    state.registers.increment(reg);
    crate::debug_instructions!("Inc: {} = {}", reg, state.registers.get(reg));
    state.advance_pc();
}

/// DEC: subtract one unless the register is already at or below zero
pub fn dec(state: &mut VMState, reg: Register) {
    state.registers.decrement(reg);
    crate::debug_instructions!("Dec: {} = {}", reg, state.registers.get(reg));
    state.advance_pc();
}

/// MOV: overwrite a register with an immediate
pub fn mov(state: &mut VMState, reg: Register, value: i64) {
    state.registers.set(reg, value);
    crate::debug_instructions!("Mov: {} = {}", reg, value);
    state.advance_pc();
}

/// SENSOR: copy a sensor reading into a register
pub fn sensor(
    state: &mut VMState,
    sensors: &SensorMap,
    reg: Register,
    name: &str,
) -> Result<(), VMFault> {
    let value = *sensors.get(name).ok_or_else(|| VMFault::UndefinedSensor {
        name: name.to_string(),
        available: sensor_names(sensors),
    })?;
    state.registers.set(reg, value);
    crate::debug_instructions!("Sensor: {} = {} ({})", reg, value, name);
    state.advance_pc();
    Ok(())
}
