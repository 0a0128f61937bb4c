//! Record transfer objects.

mod product;
pub use product::*;
