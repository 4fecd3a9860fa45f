use crate::{db_types::ReferralLink, traits::StoreError};

#[allow(async_fn_in_trait)]
pub trait LinkManagement {
    /// Fetches the referral link with the given code, along with its owner's e-mail address.
    ///
    /// Blank codes never match a link; `Ok(None)` is returned for them without touching the database.
    async fn fetch_link_by_code(&self, code: &str) -> Result<Option<ReferralLink>, StoreError>;
}
