use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// A catalog entry as stored and returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Storage-assigned identifier
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Widget")]
    pub name: String,
    /// Exact decimal, serialized as a string
    #[schema(example = "9.99")]
    pub price: Decimal,
    pub description: Option<String>,
    #[schema(example = 5)]
    pub stock: i32,
}

/// Request body for create and update.
///
/// `id` is ignored on update. On create a present `id` overwrites that row
/// when it exists and is otherwise replaced by a storage-assigned one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductInput {
    #[serde(default)]
    pub id: Option<i64>,
    #[validate(length(max = 255))]
    #[schema(example = "Widget")]
    pub name: String,
    #[schema(example = "9.99")]
    pub price: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    #[schema(example = 5)]
    pub stock: i32,
}

impl From<Product> for ProductInput {
    fn from(product: Product) -> Self {
        Self {
            id: Some(product.id),
            name: product.name,
            price: product.price,
            description: product.description,
            stock: product.stock,
        }
    }
}

/// `?nome=` for the name search
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameQuery {
    /// Case-insensitive fragment of the product name
    pub nome: String,
}

/// `?precoMin=&precoMax=` for the inclusive price range search
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PriceRangeQuery {
    #[serde(rename = "precoMin")]
    #[param(value_type = String, example = "5.00")]
    pub min_price: Decimal,
    #[serde(rename = "precoMax")]
    #[param(value_type = String, example = "20.00")]
    pub max_price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn test_input_defaults_for_missing_fields() {
        let input: ProductInput =
            serde_json::from_value(json!({"name": "Widget", "price": "9.99"})).unwrap();

        assert_eq!(input.id, None);
        assert_eq!(input.description, None);
        assert_eq!(input.stock, 0);
        assert_eq!(input.price, Decimal::from_str("9.99").unwrap());
    }

    #[test]
    fn test_input_requires_name_and_price() {
        assert!(serde_json::from_value::<ProductInput>(json!({"price": "1.00"})).is_err());
        assert!(serde_json::from_value::<ProductInput>(json!({"name": "Widget"})).is_err());
    }

    #[test]
    fn test_input_name_length_validation() {
        let mut input = ProductInput {
            id: None,
            name: "a".repeat(255),
            price: Decimal::ONE,
            description: None,
            stock: 0,
        };
        assert!(input.validate().is_ok());

        input.name.push('a');
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_product_price_serializes_exactly() {
        let product = Product {
            id: 1,
            name: "Widget".to_string(),
            price: Decimal::new(1999, 2),
            description: None,
            stock: 0,
        };

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["price"], "19.99");
        assert_eq!(value["description"], serde_json::Value::Null);
    }

    #[test]
    fn test_input_from_product_keeps_id() {
        let product = Product {
            id: 7,
            name: "Gadget".to_string(),
            price: Decimal::new(500, 2),
            description: Some("blue".to_string()),
            stock: 3,
        };

        let input = ProductInput::from(product.clone());
        assert_eq!(input.id, Some(7));
        assert_eq!(input.name, product.name);
        assert_eq!(input.description, product.description);
    }
}
