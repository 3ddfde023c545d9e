#![forbid(unsafe_code)]
//! Shiftmaker — planification mensuelle du personnel d'un restaurant (sans BD).
//!
//! - Stockage fichier (JSON), imports CSV.
//! - Remplissage glouton jour × créneau × rôle (leader d'abord).
//! - Audit non bloquant : limites hebdomadaires, jours consécutifs.
//! - Validation consultative des retouches manuelles.

pub mod io;
pub mod model;
pub mod scheduler;
pub mod settings;
pub mod storage;

pub use model::{
    Assignment, AssignmentId, DayType, RequestEntry, Requirement, Role, Roster, ShiftSlot, SlotId,
    Staff, StaffId, StaffRequest, StaffUpdate,
};
pub use scheduler::{
    check_violations, eligible_candidates, generate_schedule, ManualEdit, NoStaffReason, SchedError,
    Schedule, ScheduleOptions, ScheduleWarning, Scheduler, WarningKind,
};
pub use settings::{export_settings_json, load_settings_from_file, MonthSettings};
pub use storage::{JsonStorage, Storage};
