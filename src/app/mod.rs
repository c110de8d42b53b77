//! Application operations the view dispatches to.
//!
//! Each mutating operation issues exactly one request and, on success,
//! re-fetches the full workshop list so the caller can replace its
//! snapshot rather than patch it.

use crate::error::{ErrorKind, Result};
use crate::guard;
use crate::interface::{SessionApi, WorkshopApi};
use crate::model::dtos::{
    Credentials, EnrollmentRequest, NewAccount, RegistrationReceipt, WorkshopDraft, WorkshopUpdate,
};
use crate::model::structs::{User, Workshop, WorkshopStatus};

pub async fn sign_in<S: SessionApi>(store: &S, email: &str, password: &str) -> Result<User> {
    let credentials = Credentials {
        email: email.to_string(),
        password: password.to_string(),
    };
    credentials.validate()?;
    store.login(&credentials).await
}

pub async fn create_account<S: SessionApi>(
    store: &S,
    name: &str,
    email: &str,
    password: &str,
) -> Result<()> {
    let account = NewAccount {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    };
    account.validate()?;
    store.register_account(&account).await
}

pub async fn refresh<W: WorkshopApi>(api: &W) -> Result<Vec<Workshop>> {
    api.fetch_workshops().await
}

/// Create when `editing` is empty, update otherwise. Returns the fresh
/// list on success.
pub async fn save_workshop<W: WorkshopApi>(
    api: &W,
    draft: &WorkshopDraft,
    editing: Option<u32>,
    snapshot: &[Workshop],
) -> Result<Vec<Workshop>> {
    draft.validate()?;
    match editing {
        Some(id) => {
            let current = find(snapshot, id)?;
            let update = WorkshopUpdate {
                fields: draft.clone(),
                status: current.status,
            };
            api.update_workshop(id, &update).await?;
        }
        None => {
            api.create_workshop(draft).await?;
        }
    }
    api.fetch_workshops().await
}

/// Flip a workshop to cancelled, keeping every other field.
pub async fn cancel_workshop<W: WorkshopApi>(
    api: &W,
    snapshot: &[Workshop],
    id: u32,
) -> Result<Vec<Workshop>> {
    let current = find(snapshot, id)?;
    let update = WorkshopUpdate {
        fields: WorkshopDraft::of(current),
        status: WorkshopStatus::Cancelled,
    };
    api.update_workshop(id, &update).await?;
    api.fetch_workshops().await
}

pub async fn delete_workshop<W: WorkshopApi>(api: &W, id: u32) -> Result<Vec<Workshop>> {
    api.delete_workshop(id).await?;
    api.fetch_workshops().await
}

/// Whether the view should offer the enroll action for this workshop at
/// all, judged against the latest fetched snapshot.
pub fn can_enroll(snapshot: &[Workshop], id: u32) -> bool {
    snapshot
        .iter()
        .find(|w| w.id == id)
        .map(|w| guard::check_admissible(w).is_ok())
        .unwrap_or(false)
}

/// Enroll a student. The snapshot is re-checked before the request goes
/// out, so a full or cancelled workshop never reaches the wire.
pub async fn enroll_student<W: WorkshopApi>(
    api: &W,
    snapshot: &[Workshop],
    id: u32,
    name: &str,
    email: &str,
) -> Result<(RegistrationReceipt, Vec<Workshop>)> {
    let request = EnrollmentRequest {
        student_name: name.to_string(),
        student_email: email.to_string(),
    };
    request.validate()?;

    let target = find(snapshot, id)?;
    guard::check_admissible(target)?;

    let receipt = api.register_student(id, &request).await?;
    let workshops = api.fetch_workshops().await?;
    Ok((receipt, workshops))
}

fn find(snapshot: &[Workshop], id: u32) -> Result<&Workshop> {
    snapshot
        .iter()
        .find(|w| w.id == id)
        .ok_or_else(|| ErrorKind::WorkshopNotFound(id).into())
}

pub fn print_workshops(workshops: &[Workshop]) {
    println!("======================== talleres ========================");
    for w in workshops {
        let state = if !w.status.is_active() {
            "[cancelled]"
        } else if w.seats_left() == 0 {
            "[full]"
        } else {
            ""
        };
        println!(
            "#{:<4} {:<38} {:<12} {:>3}/{:<3} {:<16} {}",
            w.id, w.title, w.date, w.enrolled, w.capacity, w.category, state
        );
    }
    println!("==========================================================");
}
