// Fetch-decode-execute loop over a loaded program

use super::error::{RunError, VMFault};
use super::executor::{ExecutionContext, Flow, InstructionExecutor};
use super::instruction::Instruction;
use super::parser::ParsedProgram;
use super::registers::Registers;
use super::state::VMState;
use crate::routine::{Exercise, Routine};
use crate::sensors::SensorMap;

/// Run options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunConfig {
    /// Abort after this many completed cycles. `None` runs until the program
    /// halts or falls off the end, however long that takes.
    pub max_cycles: Option<u64>,
}

/// Final state of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub registers: Registers,
    pub cycle_count: u64,
    pub exercises: Vec<Exercise>,
    /// True when the run stopped on HALT rather than by running past the end
    pub halted: bool,
}

impl RunOutcome {
    pub fn into_routine(self, name: impl Into<String>) -> Routine {
        Routine::new(name, self.exercises)
    }
}

/// One VM instance executing one program
pub struct Machine<'a> {
    program: &'a ParsedProgram,
    executor: InstructionExecutor<'a>,
    config: RunConfig,
    state: VMState,
}

impl<'a> Machine<'a> {
    pub fn new(program: &'a ParsedProgram, sensors: &'a SensorMap, registers: Registers) -> Self {
        Machine {
            program,
            executor: InstructionExecutor::new(ExecutionContext {
                labels: &program.labels,
                sensors,
            }),
            config: RunConfig::default(),
            state: VMState::with_registers(registers),
        }
    }

    pub fn with_config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    pub fn state(&self) -> &VMState {
        &self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.pc >= self.program.len()
    }

    /// Fetches, decodes and executes the instruction at the program counter.
    ///
    /// Returns `Ok(None)` once the program counter has run past the end.
    pub fn step(&mut self) -> Result<Option<Flow>, RunError> {
        let pc = self.state.pc;
        let program = self.program;
        let Some(line) = program.instructions.get(pc) else {
            return Ok(None);
        };

        let fail = |fault: VMFault| RunError {
            pc,
            instruction: line.clone(),
            fault,
        };

        if let Some(max) = self.config.max_cycles {
            if self.state.cycle_count >= max {
                return Err(fail(VMFault::CycleLimitExceeded(max)));
            }
        }

        crate::debug_vm!(
            "Cycle {} PC={} | {} | {}",
            self.state.cycle_count,
            pc,
            line,
            self.state.registers
        );

        let instr = Instruction::decode(line).map_err(fail)?;
        let flow = self
            .executor
            .execute_instruction(&mut self.state, instr)
            .map_err(fail)?;

        if flow == Flow::Continue {
            self.state.cycle_count += 1;
        }
        Ok(Some(flow))
    }

    /// Runs until HALT or until the program counter leaves the program
    pub fn run(mut self) -> Result<RunOutcome, RunError> {
        let mut halted = false;
        while let Some(flow) = self.step()? {
            if flow == Flow::Halt {
                halted = true;
                break;
            }
        }

        crate::debug_vm!("Program completed in {} cycles", self.state.cycle_count);
        crate::debug_vm!("Final registers: {}", self.state.registers);

        Ok(RunOutcome {
            registers: self.state.registers,
            cycle_count: self.state.cycle_count,
            exercises: self.state.exercises,
            halted,
        })
    }
}

/// Runs `program` from pc 0 with the given starting registers and sensors
pub fn run(
    program: &ParsedProgram,
    registers: Registers,
    sensors: &SensorMap,
    config: RunConfig,
) -> Result<RunOutcome, RunError> {
    Machine::new(program, sensors, registers).with_config(config).run()
}
