//! FitWatch: a two-register assembly VM that turns sensor readings into a
//! workout routine.
//!
//! ```
//! use fitwatch::sensors::default_sensors;
//! use fitwatch::vm::{RunConfig, Registers, parse_assembly, run};
//!
//! let program = parse_assembly("SENSOR R0 ENERGY_LEVEL\nEXERCISE \"Push Ups\" reps:10\nHALT");
//! let outcome = run(&program, Registers::new(), &default_sensors(), RunConfig::default()).unwrap();
//! assert_eq!(outcome.exercises[0].name, "Push Ups");
//! ```

pub mod config;
pub mod logging;
pub mod routine;
pub mod sensors;
pub mod vm;
