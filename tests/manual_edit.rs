#![forbid(unsafe_code)]
mod common;

use common::{date, slot, staff, weekday_settings};
use shiftmaker::{
    check_violations, generate_schedule, Assignment, AssignmentId, ManualEdit, MonthSettings,
    NoStaffReason, Role, Roster, SchedError, ScheduleOptions, Scheduler, StaffId, StaffRequest,
    WarningKind,
};

fn reasons(warnings: &[shiftmaker::ScheduleWarning]) -> Vec<NoStaffReason> {
    warnings
        .iter()
        .filter_map(|w| match w.kind {
            WarningKind::NoStaff { reason, .. } => Some(reason),
            _ => None,
        })
        .collect()
}

#[test]
fn revalidating_generated_output_only_flags_real_duplicates() {
    let people = vec![staff("alone", Role::Leader, 5, None)];
    let settings = weekday_settings(2026, 6, &[(Role::Leader, 1)]);
    let schedule =
        generate_schedule(2026, 6, &people, &settings, &[], ScheduleOptions::default()).unwrap();

    let own = &schedule.assignments[0];
    assert!(check_violations(own, &schedule.assignments, &people, &[]).is_empty());

    let duplicate = Assignment::manual(own.date, &slot("slot-2"), &own.staff_id);
    let warnings = check_violations(&duplicate, &schedule.assignments, &people, &[]);
    assert_eq!(reasons(&warnings), vec![NoStaffReason::DoubleBooked]);
    assert_eq!(warnings[0].kind.tag(), "no_staff");
    assert_eq!(
        warnings[0].message,
        "ALONE is already assigned to another slot on 2026-06-01"
    );
}

#[test]
fn all_applicable_warnings_are_returned_together() {
    let person = staff("h", Role::Hall, 3, Some(1));
    let existing = vec![Assignment::generated(date(2026, 6, 1), &slot("slot-1"), &person.id)];
    let requests = vec![StaffRequest::unavailable(&person.id, date(2026, 6, 1))];

    let candidate = Assignment::manual(date(2026, 6, 1), &slot("slot-3"), &person.id);
    let warnings = check_violations(&candidate, &existing, &[person], &requests);

    assert_eq!(
        reasons(&warnings),
        vec![NoStaffReason::RequestedUnavailable, NoStaffReason::DoubleBooked]
    );
    assert_eq!(
        warnings.iter().map(|w| w.kind.tag()).collect::<Vec<_>>(),
        vec!["no_staff", "no_staff", "weekly_limit"]
    );
}

#[test]
fn weekly_limit_excludes_the_edited_assignment() {
    let person = staff("h", Role::Hall, 3, Some(2));
    let monday = Assignment::generated(date(2026, 6, 1), &slot("slot-1"), &person.id);
    let tuesday = Assignment::generated(date(2026, 6, 2), &slot("slot-1"), &person.id);
    let existing = vec![monday, tuesday.clone()];
    let people = [person];

    assert!(check_violations(&tuesday, &existing, &people, &[]).is_empty());

    let wednesday = Assignment::manual(date(2026, 6, 3), &slot("slot-1"), &people[0].id);
    let warnings = check_violations(&wednesday, &existing, &people, &[]);
    assert_eq!(warnings.len(), 1);
    assert!(matches!(
        warnings[0].kind,
        WarningKind::WeeklyLimit { limit: 2, count: 2, .. }
    ));

    // semaine suivante : compteur repart de zéro
    let next_monday = Assignment::manual(date(2026, 6, 8), &slot("slot-1"), &people[0].id);
    assert!(check_violations(&next_monday, &existing, &people, &[]).is_empty());
}

#[test]
fn unknown_staff_yields_no_warning() {
    let candidate = Assignment::manual(date(2026, 6, 1), &slot("slot-1"), &StaffId::new("ghost"));
    assert!(check_violations(&candidate, &[], &[], &[]).is_empty());
}

fn scheduler_with_month() -> Scheduler {
    let mut settings = MonthSettings::default_for(2026, 6);
    settings.set_requirement(shiftmaker::DayType::Weekday, &slot("slot-1"), Role::Hall, 1);
    let roster = Roster {
        staff: vec![
            staff("a", Role::Hall, 5, None),
            staff("b", Role::Hall, 1, Some(1)),
        ],
        settings: Some(settings),
        ..Roster::default()
    };
    let mut scheduler = Scheduler::with_roster(roster, ScheduleOptions::default());
    scheduler.generate(2026, 6, true).unwrap();
    scheduler
}

#[test]
fn reassigning_keeps_id_and_marks_manual() {
    let mut scheduler = scheduler_with_month();
    let id = AssignmentId::new("2026-06-01-slot-1-a");

    let (saved, warnings) = scheduler
        .assign_manual(ManualEdit {
            id: Some(id.clone()),
            date: date(2026, 6, 1),
            slot_id: slot("slot-1"),
            staff_id: StaffId::new("b"),
        })
        .unwrap();

    assert_eq!(saved.id, id);
    assert!(saved.is_manual);
    assert_eq!(saved.staff_id.as_str(), "b");
    assert!(warnings.is_empty());
    assert_eq!(
        scheduler.roster().find_assignment(&id).map(|a| a.staff_id.as_str()),
        Some("b")
    );
}

#[test]
fn new_manual_cell_is_stored_with_warnings() {
    let mut scheduler = scheduler_with_month();
    scheduler.roster_mut().requests.push(StaffRequest::unavailable(
        &StaffId::new("a"),
        date(2026, 6, 2),
    ));

    let (saved, warnings) = scheduler
        .assign_manual(ManualEdit {
            id: None,
            date: date(2026, 6, 2),
            slot_id: slot("slot-3"),
            staff_id: StaffId::new("a"),
        })
        .unwrap();

    assert!(saved.is_manual);
    assert!(scheduler.roster().find_assignment(&saved.id).is_some());
    assert_eq!(
        reasons(&warnings),
        vec![NoStaffReason::RequestedUnavailable, NoStaffReason::DoubleBooked]
    );

    let audit = scheduler.check_month(2026, 6).unwrap();
    assert!(audit.iter().all(|w| w.kind.tag() == "consecutive"));
}

#[test]
fn manual_edit_rejects_unknown_references() {
    let mut scheduler = scheduler_with_month();
    let edit = |id: Option<&str>, slot_id: &str, staff_id: &str| ManualEdit {
        id: id.map(AssignmentId::new),
        date: date(2026, 6, 1),
        slot_id: slot(slot_id),
        staff_id: StaffId::new(staff_id),
    };

    assert!(matches!(
        scheduler.assign_manual(edit(Some("nope"), "slot-1", "a")),
        Err(SchedError::UnknownAssignment(_))
    ));
    assert!(matches!(
        scheduler.assign_manual(edit(None, "slot-9", "a")),
        Err(SchedError::UnknownSlot(_))
    ));
    assert!(matches!(
        scheduler.assign_manual(edit(None, "slot-1", "ghost")),
        Err(SchedError::UnknownStaff(_))
    ));
}

#[test]
fn reassigning_requires_the_stored_cell() {
    let mut scheduler = scheduler_with_month();
    let id = AssignmentId::new("2026-06-01-slot-1-a");
    let moved = |date, slot_id: &str| ManualEdit {
        id: Some(id.clone()),
        date,
        slot_id: slot(slot_id),
        staff_id: StaffId::new("b"),
    };

    let err = scheduler.assign_manual(moved(date(2026, 6, 2), "slot-1")).unwrap_err();
    assert!(matches!(
        err,
        SchedError::CellMismatch { date: d, .. } if d == date(2026, 6, 1)
    ));
    assert!(matches!(
        scheduler.assign_manual(moved(date(2026, 6, 1), "slot-2")),
        Err(SchedError::CellMismatch { .. })
    ));
    // rien n'a bougé
    assert_eq!(
        scheduler.roster().find_assignment(&id).map(|a| (a.staff_id.as_str(), a.is_manual)),
        Some(("a", false))
    );
}
