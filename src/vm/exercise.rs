// EXERCISE operand grammar: exercise name followed by key:value properties

use indexmap::IndexMap;

use super::error::VMFault;
pub use crate::routine::{Exercise, PropertyValue};

const QUOTE: char = '"';
const PROPERTY_SEPARATOR: char = ':';

/// Parses the operand text of an EXERCISE instruction.
///
/// When the text contains a `"`, the name is whatever sits between the first
/// quote and the next one, and the properties follow the closing quote.
/// Otherwise the first whitespace-delimited token is the name.
pub fn parse_exercise(operands: &str) -> Result<Exercise, VMFault> {
    if operands.is_empty() {
        return Err(VMFault::MissingExerciseName);
    }

    let (name, tail) = match operands.find(QUOTE) {
        Some(open) => {
            let quoted = &operands[open + 1..];
            let close = quoted
                .find(QUOTE)
                .ok_or_else(|| VMFault::UnterminatedExerciseName(operands.to_string()))?;
            (&quoted[..close], &quoted[close + 1..])
        }
        None => {
            let operands = operands.trim();
            match operands.split_once(char::is_whitespace) {
                Some((name, tail)) => (name, tail),
                None if operands.is_empty() => return Err(VMFault::MissingExerciseName),
                None => (operands, ""),
            }
        }
    };

    Ok(Exercise {
        name: name.to_string(),
        properties: parse_properties(tail),
    })
}

/// Parses whitespace-separated `key:value` tokens in source order.
///
/// Tokens without a `:` separator are skipped. A repeated key keeps its first
/// position but takes the later value.
pub fn parse_properties(tail: &str) -> IndexMap<String, PropertyValue> {
    let mut properties = IndexMap::new();
    for token in tail.split_whitespace() {
        let Some((key, value)) = token.split_once(PROPERTY_SEPARATOR) else {
            crate::debug_instructions!("Skipping property token without separator: {}", token);
            continue;
        };
        properties.insert(key.to_string(), parse_property_value(value));
    }
    properties
}

/// Integer-looking values become integers; anything else is text with the
/// surrounding quote characters removed.
pub fn parse_property_value(value: &str) -> PropertyValue {
    match value.parse::<i64>() {
        Ok(n) => PropertyValue::Integer(n),
        Err(_) => PropertyValue::Text(value.trim_matches(|c| c == '"' || c == '\'').to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> PropertyValue {
        PropertyValue::Text(s.to_string())
    }

    #[test]
    fn test_quoted_name_with_properties() {
        let ex = parse_exercise("\"Push Ups\" reps:10 difficulty:\"hard\"").unwrap();
        assert_eq!(ex.name, "Push Ups");
        let props: Vec<_> = ex.properties.iter().collect();
        assert_eq!(
            props,
            vec![
                (&"reps".to_string(), &PropertyValue::Integer(10)),
                (&"difficulty".to_string(), &text("hard")),
            ]
        );
    }

    #[test]
    fn test_bare_name() {
        let ex = parse_exercise("Plank duration:60 rest:'short'").unwrap();
        assert_eq!(ex.name, "Plank");
        assert_eq!(ex.properties.get("duration"), Some(&PropertyValue::Integer(60)));
        assert_eq!(ex.properties.get("rest"), Some(&text("short")));

        let ex = parse_exercise("Burpees").unwrap();
        assert_eq!(ex.name, "Burpees");
        assert!(ex.properties.is_empty());
    }

    #[test]
    fn test_quote_anywhere_selects_quoted_name() {
        // The first quote wins even when it belongs to a property
        let ex = parse_exercise("Squats note:\"easy\" sets:3").unwrap();
        assert_eq!(ex.name, "easy");
        assert_eq!(ex.properties.get("sets"), Some(&PropertyValue::Integer(3)));
        assert_eq!(ex.properties.len(), 1);
    }

    #[test]
    fn test_empty_quoted_name() {
        let ex = parse_exercise("\"\" reps:1").unwrap();
        assert_eq!(ex.name, "");
        assert_eq!(ex.properties.len(), 1);
    }

    #[test]
    fn test_missing_name() {
        assert_eq!(parse_exercise(""), Err(VMFault::MissingExerciseName));
        assert_eq!(
            parse_exercise("\"Open ended reps:3"),
            Err(VMFault::UnterminatedExerciseName("\"Open ended reps:3".to_string()))
        );
    }

    #[test]
    fn test_tokens_without_separator_are_skipped() {
        let props = parse_properties("reps:5 quickly sets:2 :");
        assert_eq!(props.len(), 3);
        assert_eq!(props.get("reps"), Some(&PropertyValue::Integer(5)));
        assert_eq!(props.get("sets"), Some(&PropertyValue::Integer(2)));
        assert_eq!(props.get(""), Some(&text("")));
        assert!(props.get("quickly").is_none());
    }

    #[test]
    fn test_split_on_first_separator() {
        let props = parse_properties("time:10:30");
        assert_eq!(props.get("time"), Some(&text("10:30")));
    }

    #[test]
    fn test_duplicate_keys_overwrite() {
        let props = parse_properties("reps:5 sets:2 reps:8");
        let keys: Vec<_> = props.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["reps", "sets"]);
        assert_eq!(props.get("reps"), Some(&PropertyValue::Integer(8)));
    }

    #[test]
    fn test_property_values() {
        assert_eq!(parse_property_value("-4"), PropertyValue::Integer(-4));
        assert_eq!(parse_property_value("+7"), PropertyValue::Integer(7));
        assert_eq!(parse_property_value("\"42\""), text("42"));
        assert_eq!(parse_property_value("'mixed\""), text("mixed"));
        assert_eq!(parse_property_value("low"), text("low"));
        assert_eq!(parse_property_value("99999999999999999999"), text("99999999999999999999"));
    }
}
