//! Tool definitions and input schemas
//!
//! A schema lists each parameter's name, type, description, and whether it is
//! required or defaulted. It renders to the JSON Schema object advertised by
//! `tools/list` and validates incoming arguments before a handler runs.

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::error::{BridgeError, Result};

/// Tool definition as advertised to the client
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// JSON types a parameter may take
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Integer,
    Boolean,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => value.is_u64() || value.is_i64(),
            Self::Boolean => value.is_boolean(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Param {
    name: &'static str,
    param_type: ParamType,
    description: &'static str,
    required: bool,
    default: Option<Value>,
}

/// Ordered parameter list for one tool
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSchema {
    params: Vec<Param>,
}

impl InputSchema {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// A parameter the caller must supply
    pub fn required(self, name: &'static str, param_type: ParamType, description: &'static str) -> Self {
        self.push(Param {
            name,
            param_type,
            description,
            required: true,
            default: None,
        })
    }

    /// A parameter that may be omitted
    pub fn optional(self, name: &'static str, param_type: ParamType, description: &'static str) -> Self {
        self.push(Param {
            name,
            param_type,
            description,
            required: false,
            default: None,
        })
    }

    /// An optional parameter filled in with `default` when omitted
    pub fn defaulted(
        self,
        name: &'static str,
        param_type: ParamType,
        description: &'static str,
        default: Value,
    ) -> Self {
        self.push(Param {
            name,
            param_type,
            description,
            required: false,
            default: Some(default),
        })
    }

    pub fn required_names(&self) -> Vec<&'static str> {
        self.params.iter().filter(|p| p.required).map(|p| p.name).collect()
    }

    /// Render as a JSON Schema object
    pub fn to_json(&self) -> Value {
        let mut properties = Map::new();
        for param in &self.params {
            let mut prop = Map::new();
            prop.insert("type".to_string(), Value::String(param.param_type.as_str().to_string()));
            prop.insert("description".to_string(), Value::String(param.description.to_string()));
            if let Some(default) = &param.default {
                prop.insert("default".to_string(), default.clone());
            }
            properties.insert(param.name.to_string(), Value::Object(prop));
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": self.required_names(),
        })
    }

    /// Check `args` against the schema and fill in defaults
    ///
    /// `null` arguments count as absent. Unknown keys pass through untouched.
    pub fn validate(&self, args: Value) -> Result<Arguments> {
        let mut map = match args {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(BridgeError::Validation(format!(
                    "arguments must be an object, got {}",
                    json_type(&other)
                )));
            }
        };

        for param in &self.params {
            match map.get(param.name) {
                Some(value) if !value.is_null() => {
                    if !param.param_type.accepts(value) {
                        return Err(BridgeError::Validation(format!(
                            "Argument '{}' must be of type {}, got {}",
                            param.name,
                            param.param_type.as_str(),
                            json_type(value)
                        )));
                    }
                }
                _ => {
                    if param.required {
                        return Err(BridgeError::Validation(format!(
                            "Missing required argument: {}",
                            param.name
                        )));
                    }
                    match &param.default {
                        Some(default) => {
                            map.insert(param.name.to_string(), default.clone());
                        }
                        None => {
                            map.remove(param.name);
                        }
                    }
                }
            }
        }

        Ok(Arguments(map))
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Validated tool arguments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments(Map<String, Value>);

impl Arguments {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    /// A string argument that validation guaranteed to be present
    pub fn str(&self, name: &str) -> Result<&str> {
        self.opt_str(name)
            .ok_or_else(|| BridgeError::Validation(format!("Missing required argument: {}", name)))
    }

    /// A string argument, `None` when absent or blank
    pub fn opt_str(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    /// A non-negative integer argument
    pub fn u64(&self, name: &str) -> Result<u64> {
        self.0
            .get(name)
            .and_then(Value::as_u64)
            .ok_or_else(|| BridgeError::Validation(format!("Argument '{}' must be a non-negative integer", name)))
    }
}
