use crate::{db_types::Product, traits::StoreError};

#[allow(async_fn_in_trait)]
pub trait ProductCatalog {
    /// Fetches the current version of the product with the given id. Ids less than 1 never match.
    async fn fetch_product(&self, id: i64) -> Result<Option<Product>, StoreError>;
}
