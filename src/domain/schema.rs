//! Declarative object schemas for JSON request bodies.
//!
//! A schema is an ordered list of field rules. Validation walks the rules in
//! declaration order and stops at the first violation, so the error message is
//! deterministic for a given input. Fields the schema does not know about are
//! copied through untouched.

use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

/// First violated rule, rendered as a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: String) -> Self {
        Self {
            field: field.to_string(),
            message,
        }
    }
}

#[derive(Debug, Clone)]
pub enum FieldKind {
    /// Whole number; numeric strings and floats without a fractional part are converted.
    Integer,
    /// Any finite number; numeric strings are converted.
    Number,
    /// Non-empty string with optional length bounds (in characters).
    String { min: Option<usize>, max: Option<usize> },
    /// Array whose elements are all strings.
    StringList,
    /// String restricted to a fixed set of values.
    OneOf(&'static [&'static str]),
}

#[derive(Debug, Clone)]
pub struct FieldRule {
    name: &'static str,
    kind: FieldKind,
    required: bool,
}

impl FieldRule {
    pub fn integer(name: &'static str) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    pub fn number(name: &'static str) -> Self {
        Self::new(name, FieldKind::Number)
    }

    pub fn string(name: &'static str) -> Self {
        Self::new(name, FieldKind::String { min: None, max: None })
    }

    pub fn string_list(name: &'static str) -> Self {
        Self::new(name, FieldKind::StringList)
    }

    pub fn one_of(name: &'static str, allowed: &'static [&'static str]) -> Self {
        Self::new(name, FieldKind::OneOf(allowed))
    }

    fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_len(mut self, n: usize) -> Self {
        if let FieldKind::String { min, .. } = &mut self.kind {
            *min = Some(n);
        }
        self
    }

    pub fn max_len(mut self, n: usize) -> Self {
        if let FieldKind::String { max, .. } = &mut self.kind {
            *max = Some(n);
        }
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Checks a single value against this rule and returns its normalized form.
    pub fn check(&self, value: &JsonValue) -> Result<JsonValue, ValidationError> {
        let label = format!("\"{}\"", self.name);
        let fail = |msg: String| Err(ValidationError::new(self.name, msg));

        match &self.kind {
            FieldKind::Integer => match coerce_number(value) {
                Some(Numeric::Int(n)) if is_safe(n) => Ok(JsonValue::from(n)),
                Some(Numeric::Float(f)) if f.abs() <= MAX_SAFE_INTEGER as f64 => {
                    if f.fract() == 0.0 {
                        Ok(JsonValue::from(f as i64))
                    } else {
                        fail(format!("{} must be an integer", label))
                    }
                }
                Some(_) => fail(format!("{} must be a safe number", label)),
                None => fail(format!("{} must be a number", label)),
            },
            FieldKind::Number => match coerce_number(value) {
                Some(Numeric::Int(n)) if is_safe(n) => Ok(JsonValue::from(n)),
                Some(Numeric::Float(f)) if f.abs() <= MAX_SAFE_INTEGER as f64 => Ok(JsonValue::from(f)),
                Some(_) => fail(format!("{} must be a safe number", label)),
                None => fail(format!("{} must be a number", label)),
            },
            FieldKind::String { min, max } => {
                let Some(s) = value.as_str() else {
                    return fail(format!("{} must be a string", label));
                };
                let len = s.chars().count();
                if len == 0 {
                    return fail(format!("{} is not allowed to be empty", label));
                }
                if let Some(min) = min {
                    if len < *min {
                        return fail(format!(
                            "{} length must be at least {} characters long",
                            label, min
                        ));
                    }
                }
                if let Some(max) = max {
                    if len > *max {
                        return fail(format!(
                            "{} length must be less than or equal to {} characters long",
                            label, max
                        ));
                    }
                }
                Ok(value.clone())
            }
            FieldKind::StringList => {
                let Some(items) = value.as_array() else {
                    return fail(format!("{} must be an array", label));
                };
                for (idx, item) in items.iter().enumerate() {
                    if !item.is_string() {
                        return fail(format!("\"{}[{}]\" must be a string", self.name, idx));
                    }
                }
                Ok(value.clone())
            }
            FieldKind::OneOf(allowed) => match value.as_str() {
                Some(s) if allowed.contains(&s) => Ok(value.clone()),
                _ => fail(format!("{} must be one of [{}]", label, allowed.join(", "))),
            },
        }
    }
}

/// Largest integer a JSON client can send without losing precision (2^53 - 1).
pub const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

enum Numeric {
    Int(i64),
    Float(f64),
}

fn is_safe(n: i64) -> bool {
    (-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(&n)
}

/// Numbers pass as-is; strings are accepted when they parse as a finite number.
/// Integral input stays integral so large ids are never rounded through `f64`.
fn coerce_number(value: &JsonValue) -> Option<Numeric> {
    match value {
        JsonValue::Number(n) => n
            .as_i64()
            .map(Numeric::Int)
            .or_else(|| n.as_f64().map(Numeric::Float)),
        JsonValue::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().map(Numeric::Int).or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(Numeric::Float)
            })
        }
        _ => None,
    }
}

/// An open object schema: known fields are validated, unknown fields pass through.
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    rules: Vec<FieldRule>,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn field(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn validate(&self, input: &JsonValue) -> Result<Map<String, JsonValue>, ValidationError> {
        let Some(obj) = input.as_object() else {
            return Err(ValidationError::new(
                "value",
                "\"value\" must be of type object".to_string(),
            ));
        };

        let mut out = obj.clone();
        for rule in &self.rules {
            // `null` is a present value and fails the type check like any other.
            match obj.get(rule.name()) {
                None => {
                    if rule.required {
                        return Err(ValidationError::new(
                            rule.name(),
                            format!("\"{}\" is required", rule.name()),
                        ));
                    }
                }
                Some(v) => {
                    out.insert(rule.name().to_string(), rule.check(v)?);
                }
            }
        }
        Ok(out)
    }
}
