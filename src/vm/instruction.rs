use std::fmt;
use std::str::FromStr;

use super::error::VMFault;
use super::exercise::{self, Exercise};
use super::registers::Register;

/// Instruction mnemonics understood by the VM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Inc,
    Dec,
    Jz,
    Jnz,
    Mov,
    Sensor,
    Exercise,
    Halt,
}

impl Opcode {
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Inc => "INC",
            Opcode::Dec => "DEC",
            Opcode::Jz => "JZ",
            Opcode::Jnz => "JNZ",
            Opcode::Mov => "MOV",
            Opcode::Sensor => "SENSOR",
            Opcode::Exercise => "EXERCISE",
            Opcode::Halt => "HALT",
        }
    }
}

impl FromStr for Opcode {
    type Err = VMFault;

    /// Expects an already uppercased mnemonic
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INC" => Ok(Opcode::Inc),
            "DEC" => Ok(Opcode::Dec),
            "JZ" => Ok(Opcode::Jz),
            "JNZ" => Ok(Opcode::Jnz),
            "MOV" => Ok(Opcode::Mov),
            "SENSOR" => Ok(Opcode::Sensor),
            "EXERCISE" => Ok(Opcode::Exercise),
            "HALT" => Ok(Opcode::Halt),
            _ => Err(VMFault::UnknownOpcode(s.to_string())),
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// A fully decoded instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Inc(Register),
    Dec(Register),
    // Labels stay symbolic until the branch is taken
    Jz(Register, String),
    Jnz(Register, String),
    Mov(Register, i64),
    Sensor(Register, String),
    Exercise(Exercise),
    Halt,
}

/// Splits an instruction line into its uppercased opcode token and the
/// remaining operand text.
///
/// Only the first run of whitespace separates the two; whitespace inside the
/// operand text is preserved.
pub fn split_instruction(line: &str) -> (String, &str) {
    let line = line.trim_start();
    match line.find(char::is_whitespace) {
        Some(idx) => (line[..idx].to_uppercase(), line[idx..].trim()),
        None => (line.to_uppercase(), ""),
    }
}

/// Splits operand text into exactly two parts at the first whitespace run.
/// The second part keeps any inner whitespace.
fn two_operands<'a>(opcode: Opcode, operands: &'a str) -> Result<(&'a str, &'a str), VMFault> {
    let operands = operands.trim();
    operands
        .split_once(char::is_whitespace)
        .map(|(first, rest)| (first, rest.trim()))
        .filter(|(_, rest)| !rest.is_empty())
        .ok_or_else(|| VMFault::MalformedOperands {
            opcode: opcode.mnemonic(),
            operands: operands.to_string(),
        })
}

impl Instruction {
    /// Decodes one instruction line
    pub fn decode(line: &str) -> Result<Instruction, VMFault> {
        let (mnemonic, operands) = split_instruction(line);
        let opcode: Opcode = mnemonic.parse()?;
        Instruction::from_parts(opcode, operands)
    }

    /// Builds an instruction from a known opcode and its operand text
    pub fn from_parts(opcode: Opcode, operands: &str) -> Result<Instruction, VMFault> {
        match opcode {
            Opcode::Inc => Ok(Instruction::Inc(operands.trim().parse()?)),
            Opcode::Dec => Ok(Instruction::Dec(operands.trim().parse()?)),
            Opcode::Jz | Opcode::Jnz => {
                let (reg, label) = two_operands(opcode, operands)?;
                let reg: Register = reg.parse()?;
                if opcode == Opcode::Jz {
                    Ok(Instruction::Jz(reg, label.to_string()))
                } else {
                    Ok(Instruction::Jnz(reg, label.to_string()))
                }
            }
            Opcode::Mov => {
                let (reg, value) = two_operands(opcode, operands)?;
                let reg: Register = reg.parse()?;
                let value = value
                    .parse::<i64>()
                    .map_err(|_| VMFault::InvalidImmediate(value.to_string()))?;
                Ok(Instruction::Mov(reg, value))
            }
            Opcode::Sensor => {
                let (reg, name) = two_operands(opcode, operands)?;
                Ok(Instruction::Sensor(reg.parse()?, name.to_string()))
            }
            Opcode::Exercise => Ok(Instruction::Exercise(exercise::parse_exercise(operands)?)),
            Opcode::Halt => Ok(Instruction::Halt),
        }
    }

    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::Inc(_) => Opcode::Inc,
            Instruction::Dec(_) => Opcode::Dec,
            Instruction::Jz(_, _) => Opcode::Jz,
            Instruction::Jnz(_, _) => Opcode::Jnz,
            Instruction::Mov(_, _) => Opcode::Mov,
            Instruction::Sensor(_, _) => Opcode::Sensor,
            Instruction::Exercise(_) => Opcode::Exercise,
            Instruction::Halt => Opcode::Halt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routine::PropertyValue;

    #[test]
    fn test_split_instruction() {
        assert_eq!(split_instruction("inc R0"), ("INC".to_string(), "R0"));
        assert_eq!(split_instruction("HALT"), ("HALT".to_string(), ""));
        assert_eq!(
            split_instruction("EXERCISE   \"Push  Ups\"  reps:10"),
            ("EXERCISE".to_string(), "\"Push  Ups\"  reps:10")
        );
        assert_eq!(split_instruction("Jnz\tR1 loop"), ("JNZ".to_string(), "R1 loop"));
    }

    #[test]
    fn test_decode_register_ops() {
        assert_eq!(Instruction::decode("INC R0"), Ok(Instruction::Inc(Register::R0)));
        assert_eq!(Instruction::decode("dec R1"), Ok(Instruction::Dec(Register::R1)));
        assert_eq!(
            Instruction::decode("MOV R1 -12"),
            Ok(Instruction::Mov(Register::R1, -12))
        );
        assert_eq!(
            Instruction::decode("SENSOR R0 HEART_RATE"),
            Ok(Instruction::Sensor(Register::R0, "HEART_RATE".to_string()))
        );
    }

    #[test]
    fn test_decode_jumps() {
        assert_eq!(
            Instruction::decode("JZ R0 done"),
            Ok(Instruction::Jz(Register::R0, "done".to_string()))
        );
        assert_eq!(
            Instruction::decode("JNZ R1 loop"),
            Ok(Instruction::Jnz(Register::R1, "loop".to_string()))
        );
    }

    #[test]
    fn test_decode_exercise() {
        let instr = Instruction::decode("EXERCISE Squats reps:20").unwrap();
        match instr {
            Instruction::Exercise(ex) => {
                assert_eq!(ex.name, "Squats");
                assert_eq!(ex.properties.get("reps"), Some(&PropertyValue::Integer(20)));
            }
            other => panic!("Expected Exercise, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(
            Instruction::decode("JMP start"),
            Err(VMFault::UnknownOpcode("JMP".to_string()))
        );
        assert_eq!(
            Instruction::decode("INC R2"),
            Err(VMFault::InvalidRegister("R2".to_string()))
        );
        assert_eq!(
            Instruction::decode("INC"),
            Err(VMFault::InvalidRegister(String::new()))
        );
        assert!(matches!(
            Instruction::decode("JZ R0"),
            Err(VMFault::MalformedOperands { opcode: "JZ", .. })
        ));
        assert!(matches!(
            Instruction::decode("MOV R0"),
            Err(VMFault::MalformedOperands { opcode: "MOV", .. })
        ));
        assert!(matches!(
            Instruction::decode("SENSOR"),
            Err(VMFault::MalformedOperands { opcode: "SENSOR", .. })
        ));
        assert_eq!(
            Instruction::decode("MOV R0 ten"),
            Err(VMFault::InvalidImmediate("ten".to_string()))
        );
        assert_eq!(
            Instruction::decode("MOV R0 1 2"),
            Err(VMFault::InvalidImmediate("1 2".to_string()))
        );
        assert_eq!(
            Instruction::decode("JNZ R9 loop"),
            Err(VMFault::InvalidRegister("R9".to_string()))
        );
        assert_eq!(Instruction::decode("EXERCISE"), Err(VMFault::MissingExerciseName));
    }

    #[test]
    fn test_halt_ignores_operands() {
        assert_eq!(Instruction::decode("HALT now"), Ok(Instruction::Halt));
        assert_eq!(Instruction::decode("halt").map(|i| i.opcode()), Ok(Opcode::Halt));
    }
}
