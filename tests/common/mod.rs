#![allow(dead_code)]
use chrono::{NaiveDate, TimeZone, Utc};
use shiftmaker::{DayType, MonthSettings, Role, ShiftSlot, SlotId, Staff, StaffId};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn staff(id: &str, role: Role, priority: u8, weekly_limit: Option<u32>) -> Staff {
    Staff {
        id: StaffId::new(id),
        name: id.to_uppercase(),
        role,
        priority,
        weekly_limit,
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub fn slot(id: &str) -> SlotId {
    SlotId::new(id)
}

/// Un seul créneau "slot-1", exigences en semaine uniquement.
pub fn weekday_settings(year: i32, month: u32, needs: &[(Role, u32)]) -> MonthSettings {
    let mut settings = MonthSettings {
        year,
        month,
        slots: vec![ShiftSlot::new("slot-1", "08:00-17:00", 1)],
        requirements: Vec::new(),
    };
    for (role, count) in needs {
        settings.set_requirement(DayType::Weekday, &slot("slot-1"), *role, *count);
    }
    settings
}

/// Jeu de données proche d'une vraie boutique : 3 créneaux, 10 personnes.
pub fn shop(year: i32, month: u32) -> (Vec<Staff>, MonthSettings) {
    let staff = vec![
        staff("staff-1", Role::Leader, 5, Some(5)),
        staff("staff-2", Role::Leader, 4, Some(4)),
        staff("staff-3", Role::Hall, 4, Some(5)),
        staff("staff-4", Role::Hall, 3, Some(4)),
        staff("staff-5", Role::Hall, 3, None),
        staff("staff-6", Role::Hall, 2, Some(3)),
        staff("staff-7", Role::Kitchen, 5, Some(5)),
        staff("staff-8", Role::Kitchen, 4, Some(4)),
        staff("staff-9", Role::Kitchen, 3, None),
        staff("staff-10", Role::Kitchen, 2, Some(3)),
    ];
    let mut settings = MonthSettings::default_for(year, month);
    let table = [
        (DayType::Weekday, "slot-1", [1, 1, 1]),
        (DayType::Weekday, "slot-2", [1, 2, 1]),
        (DayType::Weekday, "slot-3", [1, 2, 1]),
        (DayType::Weekend, "slot-1", [1, 2, 1]),
        (DayType::Weekend, "slot-2", [1, 3, 2]),
        (DayType::Weekend, "slot-3", [1, 3, 2]),
    ];
    for (day_type, slot_id, counts) in table {
        for (role, count) in Role::FILL_ORDER.into_iter().zip(counts) {
            settings.set_requirement(day_type, &slot(slot_id), role, count);
        }
    }
    (staff, settings)
}
