//! Payload shape checks for the mutating item routes.
//!
//! A create must carry both a string `name` and a numeric `price`. An update
//! may carry either or both, but whatever it carries must have the right type.
//! Both reject anything that is not a JSON object, including a missing body.

use serde_json::{Map, Value};

use crate::api_error::ApiError;
use crate::items::model::Item;

/// Checks a `POST /items` payload and returns it as the item to append.
pub fn new_item(payload: Option<&Value>) -> Result<Item, ApiError> {
    let fields = object(payload)?;
    if !has_string_name(fields) || !has_numeric_price(fields) {
        return Err(ApiError::InvalidItem);
    }
    Ok(Item::from(fields.clone()))
}

/// Checks a `PATCH /items/{name}` payload and returns the fields to merge.
pub fn item_patch(payload: Option<&Value>) -> Result<Map<String, Value>, ApiError> {
    let fields = object(payload)?;
    let name_ok = !fields.contains_key("name") || has_string_name(fields);
    let price_ok = !fields.contains_key("price") || has_numeric_price(fields);
    if !name_ok || !price_ok {
        return Err(ApiError::InvalidItem);
    }
    Ok(fields.clone())
}

fn object(payload: Option<&Value>) -> Result<&Map<String, Value>, ApiError> {
    payload.and_then(Value::as_object).ok_or(ApiError::InvalidItem)
}

fn has_string_name(fields: &Map<String, Value>) -> bool {
    fields.get("name").is_some_and(Value::is_string)
}

fn has_numeric_price(fields: &Map<String, Value>) -> bool {
    fields.get("price").is_some_and(Value::is_number)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn create_requires_name_and_price() {
        assert!(new_item(Some(&json!({ "name": "popsicle", "price": 1.45 }))).is_ok());
        assert!(new_item(Some(&json!({ "name": "popsicle", "price": -3 }))).is_ok());

        for bad in [
            json!({ "name": "popsicle" }),
            json!({ "price": 1.45 }),
            json!({ "name": "popsicle", "price": "1.45" }),
            json!({ "name": 7, "price": 1.45 }),
            json!([{ "name": "popsicle", "price": 1.45 }]),
            json!("popsicle"),
        ] {
            assert!(matches!(new_item(Some(&bad)), Err(ApiError::InvalidItem)), "{bad}");
        }
        assert!(matches!(new_item(None), Err(ApiError::InvalidItem)));
    }

    #[test]
    fn create_keeps_payload_verbatim() {
        let item = new_item(Some(&json!({ "name": "tea", "price": 3, "aisle": 4 }))).unwrap();
        assert_eq!(serde_json::to_value(&item).unwrap(), json!({ "name": "tea", "price": 3, "aisle": 4 }));
    }

    #[test]
    fn patch_accepts_partial_payloads() {
        assert!(item_patch(Some(&json!({ "price": 2.45 }))).is_ok());
        assert!(item_patch(Some(&json!({ "name": "new popsicle" }))).is_ok());
        assert!(item_patch(Some(&json!({ "name": "new popsicle", "price": 2.45 }))).is_ok());
    }

    #[test]
    fn patch_rejects_wrong_types() {
        assert!(matches!(item_patch(Some(&json!({ "price": "cheap" }))), Err(ApiError::InvalidItem)));
        assert!(matches!(item_patch(Some(&json!({ "name": null }))), Err(ApiError::InvalidItem)));
        assert!(matches!(item_patch(None), Err(ApiError::InvalidItem)));
    }
}
