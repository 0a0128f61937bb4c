//! Product shapes on the wire: create input, partial update input, read output.

use crate::sql::SqlValue;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use utoipa::openapi::schema::{ObjectBuilder, Schema, SchemaType, Type};
use utoipa::openapi::RefOr;
use utoipa::{PartialSchema, ToSchema};

/// Create input. Type and requiredness are the only checks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductCreate {
    pub product_name: String,
    pub price: i32,
    #[serde(default)]
    pub description: Option<String>,
    pub in_stock: bool,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl ProductCreate {
    pub fn columns(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("product_name", self.product_name.clone().into()),
            ("price", self.price.into()),
            ("description", self.description.clone().into()),
            ("in_stock", self.in_stock.into()),
            ("image_url", self.image_url.clone().into()),
        ]
    }
}

/// Output shape, one per row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct ProductRead {
    pub id: i32,
    pub product_name: String,
    pub price: i32,
    pub description: Option<String>,
    pub in_stock: bool,
    pub image_url: Option<String>,
}

impl ProductRead {
    pub fn from_create(id: i32, input: &ProductCreate) -> Self {
        ProductRead {
            id,
            product_name: input.product_name.clone(),
            price: input.price,
            description: input.description.clone(),
            in_stock: input.in_stock,
            image_url: input.image_url.clone(),
        }
    }

    pub fn apply(&mut self, changes: &ProductUpdate) {
        for field in changes.fields() {
            match field {
                ProductField::ProductName(v) => self.product_name = v.clone(),
                ProductField::Price(v) => self.price = *v,
                ProductField::Description(v) => self.description = v.clone(),
                ProductField::InStock(v) => self.in_stock = *v,
                ProductField::ImageUrl(v) => self.image_url = v.clone(),
            }
        }
    }
}

/// One field the caller explicitly set in an update. `None` on a nullable field
/// means "set to null", never "leave alone".
#[derive(Clone, Debug, PartialEq)]
pub enum ProductField {
    ProductName(String),
    Price(i32),
    Description(Option<String>),
    InStock(bool),
    ImageUrl(Option<String>),
}

impl ProductField {
    pub fn column(&self) -> &'static str {
        match self {
            ProductField::ProductName(_) => "product_name",
            ProductField::Price(_) => "price",
            ProductField::Description(_) => "description",
            ProductField::InStock(_) => "in_stock",
            ProductField::ImageUrl(_) => "image_url",
        }
    }

    pub fn value(&self) -> SqlValue {
        match self {
            ProductField::ProductName(v) => v.clone().into(),
            ProductField::Price(v) => (*v).into(),
            ProductField::Description(v) | ProductField::ImageUrl(v) => v.clone().into(),
            ProductField::InStock(v) => (*v).into(),
        }
    }

    fn parse(key: &str, value: Value) -> Result<Option<Self>, String> {
        Ok(Some(match key {
            "product_name" => ProductField::ProductName(required_string(key, value)?),
            "price" => ProductField::Price(required_i32(key, value)?),
            "description" => ProductField::Description(nullable_string(key, value)?),
            "in_stock" => match value {
                Value::Bool(b) => ProductField::InStock(b),
                Value::Null => return Err(format!("{} may not be null", key)),
                _ => return Err(format!("{} must be a boolean", key)),
            },
            "image_url" => ProductField::ImageUrl(nullable_string(key, value)?),
            _ => return Ok(None),
        }))
    }
}

fn required_string(key: &str, value: Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Null => Err(format!("{} may not be null", key)),
        _ => Err(format!("{} must be a string", key)),
    }
}

fn nullable_string(key: &str, value: Value) -> Result<Option<String>, String> {
    match value {
        Value::Null => Ok(None),
        other => required_string(key, other).map(Some),
    }
}

fn required_i32(key: &str, value: Value) -> Result<i32, String> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| format!("{} must be a 32-bit integer", key)),
        Value::Null => Err(format!("{} may not be null", key)),
        _ => Err(format!("{} must be an integer", key)),
    }
}

/// Partial update: only the fields present in the request body.
/// Unknown keys (including `id`) are ignored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductUpdate {
    fields: Vec<ProductField>,
}

impl ProductUpdate {
    pub fn new(fields: Vec<ProductField>) -> Self {
        ProductUpdate { fields }
    }

    pub fn fields(&self) -> &[ProductField] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn columns(&self) -> Vec<(&'static str, SqlValue)> {
        self.fields.iter().map(|f| (f.column(), f.value())).collect()
    }

    pub fn from_map(map: Map<String, Value>) -> Result<Self, String> {
        let mut fields = Vec::with_capacity(map.len());
        for (key, value) in map {
            if let Some(field) = ProductField::parse(&key, value)? {
                fields.push(field);
            }
        }
        Ok(ProductUpdate { fields })
    }
}

impl<'de> Deserialize<'de> for ProductUpdate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        ProductUpdate::from_map(map).map_err(de::Error::custom)
    }
}

fn property(ty: impl Into<SchemaType>) -> RefOr<Schema> {
    RefOr::T(Schema::Object(ObjectBuilder::new().schema_type(ty).build()))
}

impl PartialSchema for ProductUpdate {
    fn schema() -> RefOr<Schema> {
        let nullable_text = || SchemaType::from_iter([Type::String, Type::Null]);
        RefOr::T(Schema::Object(
            ObjectBuilder::new()
                .schema_type(Type::Object)
                .description(Some(
                    "Partial update. Only keys present are changed; absent keys keep their value.",
                ))
                .property("product_name", property(Type::String))
                .property("price", property(Type::Integer))
                .property("description", property(nullable_text()))
                .property("in_stock", property(Type::Boolean))
                .property("image_url", property(nullable_text()))
                .build(),
        ))
    }
}

impl ToSchema for ProductUpdate {
    fn name() -> Cow<'static, str> {
        Cow::Borrowed("ProductUpdate")
    }
}
