use super::{ExecutionContext, Flow, control_flow_ops, register_ops, routine_ops};
use crate::vm::error::VMFault;
use crate::vm::instruction::Instruction;
use crate::vm::state::VMState;

/// Applies decoded instructions against a fixed label table and sensor map
pub struct InstructionExecutor<'a> {
    context: ExecutionContext<'a>,
}

impl<'a> InstructionExecutor<'a> {
    pub fn new(context: ExecutionContext<'a>) -> Self {
        InstructionExecutor { context }
    }

    /// Executes one instruction. On error the state is left as it was
    /// before the instruction.
    pub fn execute_instruction(
        &self,
        state: &mut VMState,
        instr: Instruction,
    ) -> Result<Flow, VMFault> {
        match instr {
            Instruction::Inc(reg) => register_ops::inc(state, reg),
            Instruction::Dec(reg) => register_ops::dec(state, reg),
            Instruction::Mov(reg, value) => register_ops::mov(state, reg, value),
            Instruction::Sensor(reg, name) => {
                register_ops::sensor(state, self.context.sensors, reg, &name)?
            }
            Instruction::Jz(reg, label) => {
                control_flow_ops::jz(state, self.context.labels, reg, &label)?
            }
            Instruction::Jnz(reg, label) => {
                control_flow_ops::jnz(state, self.context.labels, reg, &label)?
            }
            Instruction::Exercise(exercise) => routine_ops::exercise(state, exercise),
            Instruction::Halt => return Ok(Flow::Halt),
        }
        Ok(Flow::Continue)
    }
}
