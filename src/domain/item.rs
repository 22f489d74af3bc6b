//! The item record managed by the items API.

use crate::domain::schema::{FieldRule, ObjectSchema, ValidationError};
use serde_json::{Map, Value as JsonValue};
use std::sync::OnceLock;

pub const NAME_MAX_LEN: usize = 30;

/// Schema applied to every create/update body.
pub fn item_schema() -> &'static ObjectSchema {
    static SCHEMA: OnceLock<ObjectSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        ObjectSchema::new()
            .field(FieldRule::integer("id").required())
            .field(
                FieldRule::string("name")
                    .min_len(1)
                    .max_len(NAME_MAX_LEN)
                    .required(),
            )
            .field(FieldRule::string("description").required())
    })
}

/// A validated item. Fields outside the schema are kept in `extra` and written
/// back out unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub extra: Map<String, JsonValue>,
}

impl Item {
    /// Validates `input` against the item schema and builds the normalized item.
    pub fn parse(input: &JsonValue) -> Result<Self, ValidationError> {
        let mut fields = item_schema().validate(input)?;

        // The schema guarantees these are present and correctly typed.
        let id = fields.remove("id").and_then(|v| v.as_i64());
        let name = take_string(&mut fields, "name");
        let description = take_string(&mut fields, "description");

        match (id, name, description) {
            (Some(id), Some(name), Some(description)) => Ok(Self {
                id,
                name,
                description,
                extra: fields,
            }),
            _ => Err(ValidationError {
                field: "value".to_string(),
                message: "\"value\" does not match the item schema".to_string(),
            }),
        }
    }

    pub fn to_json(&self) -> JsonValue {
        let mut out = self.extra.clone();
        out.insert("id".to_string(), JsonValue::from(self.id));
        out.insert("name".to_string(), JsonValue::from(self.name.clone()));
        out.insert(
            "description".to_string(),
            JsonValue::from(self.description.clone()),
        );
        JsonValue::Object(out)
    }
}

fn take_string(fields: &mut Map<String, JsonValue>, key: &str) -> Option<String> {
    match fields.remove(key) {
        Some(JsonValue::String(s)) => Some(s),
        _ => None,
    }
}
