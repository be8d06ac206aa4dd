// VM Assembly Parser: strips comments, records labels, produces the instruction list

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::error::LoadError;
use crate::config::{COMMENT_MARKER, LABEL_SUFFIX};

/// Result of loading an assembly program.
///
/// Instructions are kept as trimmed source text; opcode and operand checks
/// happen only when an instruction is executed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedProgram {
    pub instructions: Vec<String>,
    pub labels: HashMap<String, usize>,
}

impl ParsedProgram {
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn label(&self, name: &str) -> Option<usize> {
        self.labels.get(name).copied()
    }
}

/// Parses a FitWatch assembly program from a string.
///
/// A label points at the index of the next instruction, so a label at the end
/// of the file resolves to `instructions.len()`. Redefining a label silently
/// moves it to the later position.
pub fn parse_assembly(source: &str) -> ParsedProgram {
    let mut program = ParsedProgram::default();

    for line in source.lines() {
        let line = match line.find(COMMENT_MARKER) {
            Some(idx) => &line[..idx],
            None => line,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(label) = line.strip_suffix(LABEL_SUFFIX) {
            let label = label.trim();
            let index = program.instructions.len();
            if let Some(previous) = program.labels.insert(label.to_string(), index) {
                crate::debug_loader!("Label '{}' redefined: {} -> {}", label, previous, index);
            } else {
                crate::debug_loader!("Found label '{}' at instruction {}", label, index);
            }
        } else {
            program.instructions.push(line.to_string());
        }
    }

    crate::debug_loader!("Loaded {} instructions", program.instructions.len());
    crate::debug_loader!("Labels: {:?}", program.labels);

    program
}

/// Reads and parses a program file
pub fn load_program(path: impl AsRef<Path>) -> Result<ParsedProgram, LoadError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| LoadError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_assembly(&source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_program() {
        let source = r#"
        ; Read the sensor and loop
        start:          ; Label definition
            SENSOR R0 ENERGY_LEVEL
            DEC R0      ; Count down
            JNZ R0 start
            HALT
        "#;
        let program = parse_assembly(source);
        assert_eq!(program.len(), 4);
        assert_eq!(program.label("start"), Some(0));
        assert_eq!(program.instructions[0], "SENSOR R0 ENERGY_LEVEL");
        assert_eq!(program.instructions[1], "DEC R0");
        assert_eq!(program.instructions[3], "HALT");
    }

    #[test]
    fn test_labels_are_positional() {
        let source = "INC R0\n\n; comment only\nfirst:\n  DEC R0\nsecond:\nthird:\nHALT\nend:";
        let program = parse_assembly(source);
        assert_eq!(program.len(), 3);
        assert_eq!(program.label("first"), Some(1));
        assert_eq!(program.label("second"), Some(2));
        assert_eq!(program.label("third"), Some(2));
        // A trailing label points one past the last instruction
        assert_eq!(program.label("end"), Some(3));
    }

    #[test]
    fn test_duplicate_label_last_wins() {
        let source = "loop:\nINC R0\nloop:\nINC R1";
        let program = parse_assembly(source);
        assert_eq!(program.label("loop"), Some(1));
        assert_eq!(program.labels.len(), 1);
    }

    #[test]
    fn test_label_name_is_trimmed() {
        let program = parse_assembly("  spaced   :  ; trailing comment\nHALT");
        assert_eq!(program.label("spaced"), Some(0));
    }

    #[test]
    fn test_instruction_text_kept_verbatim() {
        // No validation happens at load time
        let program = parse_assembly("bogus   stuff  here\nEXERCISE \"Push Ups\"   reps:10");
        assert_eq!(program.instructions[0], "bogus   stuff  here");
        assert_eq!(program.instructions[1], "EXERCISE \"Push Ups\"   reps:10");
    }

    #[test]
    fn test_comment_truncates_quoted_text() {
        let program = parse_assembly("EXERCISE \"Jump; Rope\" reps:5");
        assert_eq!(program.instructions[0], "EXERCISE \"Jump");
    }

    #[test]
    fn test_empty_source() {
        let program = parse_assembly("\n   \n; nothing\n");
        assert!(program.is_empty());
        assert!(program.labels.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_program("/nonexistent/fitwatch/program.fasm");
        assert!(matches!(result, Err(LoadError::SourceUnreadable { .. })));
    }
}
