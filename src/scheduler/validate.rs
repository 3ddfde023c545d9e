use super::{eligibility, NoStaffReason, SchedError, ScheduleWarning, Scheduler, WarningKind};
use crate::model::{Assignment, AssignmentId, SlotId, Staff, StaffId, StaffRequest};
use chrono::NaiveDate;

/// Vérifie une affectation saisie à la main. Consultatif : rien n'est bloqué,
/// tous les avertissements applicables sont renvoyés ensemble.
pub fn check_violations(
    candidate: &Assignment,
    all: &[Assignment],
    staff: &[Staff],
    requests: &[StaffRequest],
) -> Vec<ScheduleWarning> {
    let mut out = Vec::new();
    let Some(person) = staff.iter().find(|s| s.id == candidate.staff_id) else {
        return out;
    };
    let date = candidate.date;

    if eligibility::find_request(requests, &person.id, date).is_some_and(|r| !r.available) {
        out.push(ScheduleWarning {
            message: format!("{} asked not to work on {date}", person.name),
            kind: WarningKind::NoStaff {
                date,
                staff_id: person.id.clone(),
                reason: NoStaffReason::RequestedUnavailable,
            },
        });
    }

    if eligibility::booked_on(all, &person.id, date, Some(&candidate.id)) {
        out.push(ScheduleWarning {
            message: format!("{} is already assigned to another slot on {date}", person.name),
            kind: WarningKind::NoStaff {
                date,
                staff_id: person.id.clone(),
                reason: NoStaffReason::DoubleBooked,
            },
        });
    }

    if let Some(limit) = person.weekly_limit() {
        let count = eligibility::week_count(all, &person.id, date, Some(&candidate.id));
        if count >= limit {
            out.push(ScheduleWarning {
                message: format!("{} has reached the weekly limit of {limit}", person.name),
                kind: WarningKind::WeeklyLimit {
                    staff_id: person.id.clone(),
                    date,
                    week_end: super::calendar::week_end(date),
                    limit,
                    count,
                },
            });
        }
    }

    out
}

/// Saisie manuelle d'une cellule (date, créneau).
#[derive(Debug, Clone)]
pub struct ManualEdit {
    /// `Some` = réaffecte une affectation existante. Seul le membre change :
    /// `date` et `slot_id` doivent alors désigner la cellule déjà enregistrée.
    pub id: Option<AssignmentId>,
    pub date: NaiveDate,
    pub slot_id: SlotId,
    pub staff_id: StaffId,
}

pub(super) fn assign_manual(
    scheduler: &mut Scheduler,
    edit: ManualEdit,
) -> Result<(Assignment, Vec<ScheduleWarning>), SchedError> {
    let roster = &mut scheduler.roster;
    if roster.find_staff_by_id(&edit.staff_id).is_none() {
        return Err(SchedError::UnknownStaff(edit.staff_id.to_string()));
    }
    if let Some(settings) = &roster.settings {
        if settings.find_slot(&edit.slot_id).is_none() {
            return Err(SchedError::UnknownSlot(edit.slot_id.to_string()));
        }
    }

    let target = match edit.id {
        Some(id) => {
            let Some(existing) = roster.assignments.iter_mut().find(|a| a.id == id) else {
                return Err(SchedError::UnknownAssignment(id.to_string()));
            };
            if existing.date != edit.date || existing.slot_id != edit.slot_id {
                return Err(SchedError::CellMismatch {
                    id: id.to_string(),
                    date: existing.date,
                    slot_id: existing.slot_id.to_string(),
                });
            }
            existing.staff_id = edit.staff_id;
            existing.is_manual = true;
            existing.clone()
        }
        None => {
            let created = Assignment::manual(edit.date, &edit.slot_id, &edit.staff_id);
            roster.assignments.push(created.clone());
            created
        }
    };

    let warnings = check_violations(&target, &roster.assignments, &roster.staff, &roster.requests);

    #[cfg(feature = "logging")]
    tracing::debug!(id = %target.id, warnings = warnings.len(), "manual assignment saved");

    Ok((target, warnings))
}
