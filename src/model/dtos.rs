use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, Result};
use crate::model::structs::{User, Workshop, WorkshopStatus};

/// Credentials submitted at login time.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn validate(&self) -> Result<()> {
        required("email", &self.email)?;
        required("password", &self.password)
    }
}

/// Payload for creating an account. Deliberately carries no role: who is
/// an admin is decided by the backend or by seed data, never by the
/// registration form.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl NewAccount {
    pub fn validate(&self) -> Result<()> {
        required("name", &self.name)?;
        required("email", &self.email)?;
        required("password", &self.password)
    }
}

/// The fields an admin fills in when creating or editing a workshop.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkshopDraft {
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: String,
    pub time: String,
    pub category: String,
    pub capacity: u32,
}

impl WorkshopDraft {
    /// Draft pre-filled from an existing record, for the edit form.
    pub fn of(workshop: &Workshop) -> WorkshopDraft {
        WorkshopDraft {
            title: workshop.title.clone(),
            description: workshop.description.clone(),
            location: workshop.location.clone(),
            date: workshop.date.clone(),
            time: workshop.time.clone(),
            category: workshop.category.clone(),
            capacity: workshop.capacity,
        }
    }

    pub fn validate(&self) -> Result<()> {
        required("title", &self.title)?;
        required("description", &self.description)?;
        required("location", &self.location)?;
        required("date", &self.date)?;
        required("time", &self.time)?;
        required("category", &self.category)?;
        if self.capacity == 0 {
            return Err(
                ErrorKind::ValidationError("capacity must be at least 1".to_string()).into(),
            );
        }
        Ok(())
    }
}

/// Full update payload for an edit; carries the status so a cancellation
/// round-trips through the same endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkshopUpdate {
    #[serde(flatten)]
    pub fields: WorkshopDraft,
    pub status: WorkshopStatus,
}

/// Student identity submitted with an enrollment; camelCase on the wire.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRequest {
    pub student_name: String,
    pub student_email: String,
}

impl EnrollmentRequest {
    pub fn validate(&self) -> Result<()> {
        required("student name", &self.student_name)?;
        required("student email", &self.student_email)
    }
}

/// The row the backend records for a successful enrollment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StudentRecord {
    pub name: String,
    pub email: String,
    pub workshop_id: u32,
}

/// What the backend answers after a successful registration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistrationReceipt {
    pub message: String,
    pub student: StudentRecord,
    pub workshop: Workshop,
}

/// Login response body.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginReply {
    pub message: String,
    pub user: User,
}

/// Generic `{ "message": … }` body used by error responses and deletions.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerMessage {
    pub message: String,
}

fn required(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ErrorKind::ValidationError(format!("{field} is required")).into());
    }
    Ok(())
}
