//! Request body validation: JSON shape into typed inputs, before any storage call.

use crate::error::AppError;
use crate::model::{ProductCreate, ProductUpdate};
use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub struct RequestValidator;

impl RequestValidator {
    /// Unwrap the JSON extractor, turning its rejections into the error envelope.
    pub fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
        body.map(|Json(v)| v).map_err(AppError::from_json_rejection)
    }

    /// All required fields present with the right JSON types.
    pub fn create(body: Value) -> Result<ProductCreate, AppError> {
        Self::shape(body)
    }

    /// Only the fields present in body; required is not enforced for missing fields.
    pub fn update(body: Value) -> Result<ProductUpdate, AppError> {
        Self::shape(body)
    }

    /// Path id: must parse as the integer primary key.
    pub fn product_id(id_str: &str) -> Result<i32, AppError> {
        id_str
            .parse()
            .map_err(|_| AppError::Validation(format!("product_id must be an integer, got '{}'", id_str)))
    }

    fn shape<T: DeserializeOwned>(body: Value) -> Result<T, AppError> {
        if !body.is_object() {
            return Err(AppError::Validation("body must be a JSON object".into()));
        }
        serde_json::from_value(body).map_err(|e| AppError::Validation(e.to_string()))
    }
}
