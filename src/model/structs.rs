use serde::{Deserialize, Serialize};

/// Lifecycle state of a workshop. Cancellation is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkshopStatus {
    Active,
    Cancelled,
}

impl WorkshopStatus {
    pub fn is_active(self) -> bool {
        matches!(self, WorkshopStatus::Active)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Workshop {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: String,
    pub time: String,
    pub category: String,
    pub capacity: u32,
    #[serde(default)]
    pub enrolled: u32,
    pub status: WorkshopStatus,
}

impl Workshop {
    /// Seats still open. Saturates instead of underflowing if a backend
    /// ever hands us an over-subscribed record.
    pub fn seats_left(&self) -> u32 {
        self.capacity.saturating_sub(self.enrolled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Student,
}

/// The authenticated identity held in the session slot. Never carries a
/// password.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

/// One entry of the registered-users store.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Account {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl Account {
    pub fn user(&self) -> User {
        User {
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}
