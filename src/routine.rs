//! Routine output model
//!
//! Exercises are collected by the VM in emission order and exported as
//! `{"routine": ..., "exercises": [{"name": ..., <properties>}, ...]}`.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_ROUTINE_NAME;

/// Value of a single exercise property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Integer(i64),
    Text(String),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Integer(n) => write!(f, "{}", n),
            PropertyValue::Text(s) => write!(f, "{:?}", s),
        }
    }
}

/// One emitted exercise record
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Exercise {
    pub name: String,
    pub properties: IndexMap<String, PropertyValue>,
}

impl Exercise {
    pub fn new(name: impl Into<String>) -> Self {
        Exercise {
            name: name.into(),
            properties: IndexMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Flat field view used for serialization: `name` first, then the
    /// properties. A property called `name` replaces the exercise name.
    pub fn fields(&self) -> IndexMap<&str, PropertyValue> {
        let mut fields = IndexMap::with_capacity(self.properties.len() + 1);
        fields.insert("name", PropertyValue::Text(self.name.clone()));
        for (key, value) in &self.properties {
            fields.insert(key.as_str(), value.clone());
        }
        fields
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for (key, value) in &self.properties {
            write!(f, " {}={}", key, value)?;
        }
        Ok(())
    }
}

impl Serialize for Exercise {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = self.fields();
        let mut map = serializer.serialize_map(Some(fields.len()))?;
        for (key, value) in &fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Exercise {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut properties = IndexMap::<String, PropertyValue>::deserialize(deserializer)?;
        let name = match properties.shift_remove("name") {
            Some(PropertyValue::Text(name)) => name,
            Some(PropertyValue::Integer(n)) => n.to_string(),
            None => return Err(de::Error::missing_field("name")),
        };
        Ok(Exercise { name, properties })
    }
}

/// A named list of exercises, ready for export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routine {
    pub routine: String,
    pub exercises: Vec<Exercise>,
}

impl Routine {
    pub fn new(name: impl Into<String>, exercises: Vec<Exercise>) -> Self {
        Routine {
            routine: name.into(),
            exercises,
        }
    }

    /// Pretty JSON with two-space indentation
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Routine> {
        serde_json::from_str(json)
    }
}

impl Default for Routine {
    fn default() -> Self {
        Routine::new(DEFAULT_ROUTINE_NAME, Vec::new())
    }
}
