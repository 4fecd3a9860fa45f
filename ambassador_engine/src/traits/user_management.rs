use std::future::Future;

use crate::{db_types::User, traits::StoreError};

pub trait UserManagement {
    fn fetch_user(&self, id: i64) -> impl Future<Output = Result<Option<User>, StoreError>> + Send;
}
