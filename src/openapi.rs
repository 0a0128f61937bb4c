//! OpenAPI document for the product endpoints, served at `/openapi.json`.

use crate::error::{ErrorBody, ErrorDetail};
use crate::handlers::product;
use crate::model::{ProductCreate, ProductRead, ProductUpdate};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(product::create, product::read, product::list, product::update, product::delete),
    components(schemas(ProductCreate, ProductUpdate, ProductRead, ErrorBody, ErrorDetail)),
    tags((name = "products", description = "Products catalog CRUD"))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_product_path() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        assert!(paths.contains(&"/products/"));
        assert!(paths.contains(&"/products/{product_id}/"));
        let components = doc.components.expect("components");
        for name in ["ProductCreate", "ProductUpdate", "ProductRead", "ErrorBody"] {
            assert!(components.schemas.contains_key(name), "missing schema {name}");
        }
    }
}
