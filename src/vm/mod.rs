// VM module entry point

pub mod error;
pub mod executor;
pub mod exercise;
pub mod instruction;
pub mod machine;
pub mod parser;
pub mod registers;
pub mod state;

pub use error::{LoadError, RunError, VMFault};
pub use machine::{Machine, RunConfig, RunOutcome, run};
pub use parser::{ParsedProgram, load_program, parse_assembly};
pub use registers::{Register, Registers};
