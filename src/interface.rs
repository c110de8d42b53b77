#![allow(async_fn_in_trait)]

use crate::error::Result;
use crate::model::dtos::{
    Credentials, EnrollmentRequest, NewAccount, RegistrationReceipt, WorkshopDraft, WorkshopUpdate,
};
use crate::model::structs::{User, Workshop};

/// Account registration, login and the session slot.
pub trait SessionApi {
    /// Create a new account. Never grants a role.
    async fn register_account(&self, account: &NewAccount) -> Result<()>;

    /// Exact-match login; writes the session slot on success, replacing
    /// any prior session.
    async fn login(&self, credentials: &Credentials) -> Result<User>;

    /// Current identity, if any. Pure read.
    fn current_session(&self) -> Result<Option<User>>;

    /// Clear the session slot. Idempotent.
    fn logout(&self) -> Result<()>;
}

/// Operations against the workshop collection.
pub trait WorkshopApi {
    /// Fetch the full workshop list.
    async fn fetch_workshops(&self) -> Result<Vec<Workshop>>;

    /// Create a workshop from an admin draft.
    async fn create_workshop(&self, draft: &WorkshopDraft) -> Result<Workshop>;

    /// Replace the editable fields of a workshop.
    async fn update_workshop(&self, id: u32, update: &WorkshopUpdate) -> Result<Workshop>;

    /// Remove a workshop record for good.
    async fn delete_workshop(&self, id: u32) -> Result<()>;

    /// Register a student, consuming one seat.
    async fn register_student(
        &self,
        id: u32,
        request: &EnrollmentRequest,
    ) -> Result<RegistrationReceipt>;
}
