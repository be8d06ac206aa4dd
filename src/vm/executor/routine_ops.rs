use crate::routine::Exercise;
use crate::vm::state::VMState;

/// EXERCISE: append a record to the routine
pub fn exercise(state: &mut VMState, exercise: Exercise) {
    crate::debug_instructions!("Added exercise: {}", exercise);
    state.exercises.push(exercise);
    state.advance_pc();
}
