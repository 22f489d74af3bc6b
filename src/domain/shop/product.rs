use crate::domain::schema::{FieldRule, ObjectSchema, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::OnceLock;
use utoipa::ToSchema;
use uuid::Uuid;

pub fn product_schema() -> &'static ObjectSchema {
    static SCHEMA: OnceLock<ObjectSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        ObjectSchema::new()
            .field(FieldRule::string("productName").required())
            .field(FieldRule::number("cost").required())
            .field(FieldRule::string_list("productImages"))
            .field(FieldRule::string("description"))
            .field(FieldRule::string("stockStatus"))
    })
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub product_name: String,
    pub cost: f64,
    pub product_images: Vec<String>,
    pub description: Option<String>,
    pub stock_status: Option<String>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Product fields supplied by the client. Unknown body fields are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub product_name: String,
    pub cost: f64,
    #[serde(default)]
    pub product_images: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stock_status: Option<String>,
}

impl NewProduct {
    pub fn parse(input: &JsonValue) -> Result<Self, ValidationError> {
        let fields = product_schema().validate(input)?;
        serde_json::from_value(JsonValue::Object(fields)).map_err(|e| ValidationError {
            field: "value".to_string(),
            message: format!("\"value\" is not a valid product: {}", e),
        })
    }

    pub fn into_product(self, owner_id: Uuid) -> Product {
        Product {
            id: Uuid::new_v4(),
            product_name: self.product_name,
            cost: self.cost,
            product_images: self.product_images,
            description: self.description,
            stock_status: self.stock_status,
            owner_id,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_minimal_product() {
        let p = NewProduct::parse(&json!({ "productName": "Mug", "cost": "12.5" })).unwrap();
        assert_eq!(p.product_name, "Mug");
        assert_eq!(p.cost, 12.5);
        assert!(p.product_images.is_empty());
        assert!(p.description.is_none());
    }

    #[test]
    fn requires_name_and_cost() {
        let err = NewProduct::parse(&json!({ "cost": 3 })).unwrap_err();
        assert_eq!(err.message, "\"productName\" is required");
        let err = NewProduct::parse(&json!({ "productName": "Mug" })).unwrap_err();
        assert_eq!(err.message, "\"cost\" is required");
    }

    #[test]
    fn owner_is_recorded() {
        let owner = Uuid::new_v4();
        let p = NewProduct::parse(&json!({
            "productName": "Mug",
            "cost": 4,
            "productImages": ["a.png"],
            "stockStatus": "in stock",
            "ownerId": "ignored"
        }))
        .unwrap()
        .into_product(owner);
        assert_eq!(p.owner_id, owner);
        assert_eq!(p.product_images, vec!["a.png".to_string()]);
        assert_eq!(p.stock_status.as_deref(), Some("in stock"));
    }
}
