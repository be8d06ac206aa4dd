// VM Instruction execution: applies decoded instructions to the VM state

pub mod control_flow_ops;
pub mod instruction_executor;
pub mod register_ops;
pub mod routine_ops;

use std::collections::HashMap;

use crate::sensors::SensorMap;

pub use crate::vm::instruction::Instruction;
pub use instruction_executor::InstructionExecutor;

/// Whether the run loop should fetch another instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Halt,
}

/// Read-only inputs an instruction may consult
#[derive(Debug, Clone, Copy)]
pub struct ExecutionContext<'a> {
    pub labels: &'a HashMap<String, usize>,
    pub sensors: &'a SensorMap,
}
