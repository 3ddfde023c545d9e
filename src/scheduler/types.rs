use crate::model::{Assignment, Role, SlotId, StaffId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Options de génération
#[derive(Debug, Clone, Copy)]
pub struct ScheduleOptions {
    /// Longueur de série de jours travaillés à partir de laquelle on avertit.
    pub consecutive_warn_days: u32,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            consecutive_warn_days: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoStaffReason {
    RequestedUnavailable,
    DoubleBooked,
}

/// Nature d'un avertissement, avec les références utiles à chaque cas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum WarningKind {
    RoleShortage {
        date: NaiveDate,
        slot_id: SlotId,
        role: Role,
        required: u32,
        filled: u32,
    },
    WeeklyLimit {
        staff_id: StaffId,
        /// Début de fenêtre (borné au mois pour l'audit mensuel).
        date: NaiveDate,
        week_end: NaiveDate,
        limit: u32,
        count: u32,
    },
    Consecutive {
        staff_id: StaffId,
        date: NaiveDate,
        streak: u32,
    },
    NoStaff {
        date: NaiveDate,
        staff_id: StaffId,
        reason: NoStaffReason,
    },
}

impl WarningKind {
    pub fn tag(&self) -> &'static str {
        match self {
            WarningKind::RoleShortage { .. } => "role_shortage",
            WarningKind::WeeklyLimit { .. } => "weekly_limit",
            WarningKind::Consecutive { .. } => "consecutive",
            WarningKind::NoStaff { .. } => "no_staff",
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            WarningKind::RoleShortage { date, .. }
            | WarningKind::WeeklyLimit { date, .. }
            | WarningKind::Consecutive { date, .. }
            | WarningKind::NoStaff { date, .. } => *date,
        }
    }

    pub fn staff_id(&self) -> Option<&StaffId> {
        match self {
            WarningKind::RoleShortage { .. } => None,
            WarningKind::WeeklyLimit { staff_id, .. }
            | WarningKind::Consecutive { staff_id, .. }
            | WarningKind::NoStaff { staff_id, .. } => Some(staff_id),
        }
    }

    pub fn slot_id(&self) -> Option<&SlotId> {
        match self {
            WarningKind::RoleShortage { slot_id, .. } => Some(slot_id),
            _ => None,
        }
    }
}

/// Observation non bloquante produite à côté des affectations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleWarning {
    #[serde(flatten)]
    pub kind: WarningKind,
    pub message: String,
}

/// Résultat d'une génération mensuelle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    pub assignments: Vec<Assignment>,
    pub warnings: Vec<ScheduleWarning>,
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("invalid month: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },
    #[error("no month settings configured")]
    MissingSettings,
    #[error("no staff registered")]
    NoStaff,
    #[error("unknown staff: {0}")]
    UnknownStaff(String),
    #[error("unknown assignment: {0}")]
    UnknownAssignment(String),
    #[error("unknown slot: {0}")]
    UnknownSlot(String),
    #[error("invalid staff: {0}")]
    InvalidStaff(String),
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("assignment {id} is on {date} / {slot_id}, not on the edited cell")]
    CellMismatch {
        id: String,
        date: NaiveDate,
        slot_id: String,
    },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
