//! Enrollment-capacity guard.
//!
//! Decides whether a registration attempt is admissible and performs the
//! seat increment. This is the only place the `enrolled <= capacity`
//! invariant is maintained.

use crate::error::{ErrorKind, Result};
use crate::model::structs::Workshop;

/// Admissible iff the workshop is active and a seat is open.
///
/// Cancellation wins over capacity: a cancelled workshop is rejected as
/// cancelled even when seats remain.
pub fn check_admissible(workshop: &Workshop) -> Result<()> {
    if !workshop.status.is_active() {
        return Err(ErrorKind::WorkshopCancelled(workshop.title.clone()).into());
    }
    if workshop.enrolled >= workshop.capacity {
        return Err(ErrorKind::WorkshopFull(workshop.title.clone()).into());
    }
    Ok(())
}

/// Check admissibility, then consume exactly one seat.
pub fn admit(workshop: &mut Workshop) -> Result<()> {
    check_admissible(workshop)?;
    workshop.enrolled += 1;
    Ok(())
}
