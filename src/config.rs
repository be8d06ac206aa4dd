//! Configuration constants for the FitWatch VM and its command line.

// Program source format
pub const COMMENT_MARKER: char = ';'; // Everything from here to end of line is ignored
pub const LABEL_SUFFIX: char = ':'; // `name:` on its own line defines a label

// Routine output
pub const DEFAULT_ROUTINE_NAME: &str = "Workout Routine";

// Sensors used when the caller supplies none
pub const DEFAULT_SENSORS: [(&str, i64); 3] = [
    ("ENERGY_LEVEL", 5),
    ("HEART_RATE", 100),
    ("TIME_AVAILABLE", 60), // minutes
];
