use super::calendar;
use crate::model::{Assignment, AssignmentId, Role, SlotId, Staff, StaffId, StaffRequest};
use chrono::NaiveDate;
use std::cmp::Reverse;
use std::collections::HashMap;

/// Candidats affectables à (rôle, date, créneau), du plus au moins prioritaire.
///
/// Filtres : rôle identique, pas de refus pour la date, créneau accepté,
/// pas déjà affecté ce jour-là, limite hebdomadaire non atteinte.
/// Tri stable : priorité décroissante puis nombre d'affectations déjà
/// présentes dans `existing` croissant.
pub fn eligible_candidates<'a>(
    all_staff: &'a [Staff],
    role: Role,
    date: NaiveDate,
    slot: &SlotId,
    existing: &[Assignment],
    requests: &[StaffRequest],
) -> Vec<&'a Staff> {
    let mut out: Vec<&Staff> = all_staff
        .iter()
        .filter(|s| s.role == role)
        .filter(|s| find_request(requests, &s.id, date).map_or(true, |r| r.allows(slot)))
        .filter(|s| !booked_on(existing, &s.id, date, None))
        .filter(|s| {
            s.weekly_limit()
                .map_or(true, |limit| week_count(existing, &s.id, date, None) < limit)
        })
        .collect();

    let mut totals: HashMap<&StaffId, usize> = HashMap::new();
    for a in existing {
        *totals.entry(&a.staff_id).or_default() += 1;
    }
    out.sort_by_key(|s| {
        (
            Reverse(s.priority),
            totals.get(&s.id).copied().unwrap_or(0),
        )
    });
    out
}

pub(super) fn find_request<'r>(
    requests: &'r [StaffRequest],
    staff: &StaffId,
    date: NaiveDate,
) -> Option<&'r StaffRequest> {
    requests
        .iter()
        .find(|r| &r.staff_id == staff && r.date == date)
}

/// Le membre a-t-il déjà une affectation ce jour-là (hors `exclude`) ?
pub(super) fn booked_on(
    assignments: &[Assignment],
    staff: &StaffId,
    date: NaiveDate,
    exclude: Option<&AssignmentId>,
) -> bool {
    assignments
        .iter()
        .any(|a| &a.staff_id == staff && a.date == date && Some(&a.id) != exclude)
}

/// Affectations du membre dans la semaine lundi-dimanche de `date` (hors `exclude`).
pub(super) fn week_count(
    assignments: &[Assignment],
    staff: &StaffId,
    date: NaiveDate,
    exclude: Option<&AssignmentId>,
) -> u32 {
    let start = calendar::week_start(date);
    let end = calendar::week_end(date);
    let n = assignments
        .iter()
        .filter(|a| {
            &a.staff_id == staff && a.date >= start && a.date <= end && Some(&a.id) != exclude
        })
        .count();
    u32::try_from(n).unwrap_or(u32::MAX)
}
