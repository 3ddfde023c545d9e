mod assignment;
pub mod audit;
pub mod calendar;
mod eligibility;
mod types;
mod validate;

pub use eligibility::eligible_candidates;
pub use types::{
    NoStaffReason, SchedError, Schedule, ScheduleOptions, ScheduleWarning, WarningKind,
};
pub use validate::{check_violations, ManualEdit};

use crate::model::{Assignment, Roster, Staff, StaffId, StaffRequest, StaffUpdate};
use crate::settings::MonthSettings;

/// Génération pure d'un mois : ne lit ni n'écrit rien en dehors de ses arguments.
pub fn generate_schedule(
    year: i32,
    month: u32,
    staff: &[Staff],
    settings: &MonthSettings,
    requests: &[StaffRequest],
    opts: ScheduleOptions,
) -> Result<Schedule, SchedError> {
    assignment::generate(year, month, staff, settings, requests, opts)
}

/// Scheduler : encapsule le Roster d'un établissement
#[derive(Debug, Default)]
pub struct Scheduler {
    roster: Roster,
    opts: ScheduleOptions,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_roster(roster: Roster, opts: ScheduleOptions) -> Self {
        Self { roster, opts }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }
    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }
    pub fn into_roster(self) -> Roster {
        self.roster
    }

    pub fn options(&self) -> ScheduleOptions {
        self.opts
    }

    /// Génère le mois à partir du roster et range le résultat.
    /// `overwrite` remplace les affectations existantes du mois.
    pub fn generate(
        &mut self,
        year: i32,
        month: u32,
        overwrite: bool,
    ) -> Result<Schedule, SchedError> {
        let settings = self.roster.settings.as_ref().ok_or(SchedError::MissingSettings)?;
        settings
            .validate()
            .map_err(|e| SchedError::InvalidSettings(e.to_string()))?;
        if self.roster.staff.is_empty() {
            return Err(SchedError::NoStaff);
        }
        let schedule = generate_schedule(
            year,
            month,
            &self.roster.staff,
            settings,
            &self.roster.requests,
            self.opts,
        )?;
        self.roster
            .apply_generated(year, month, schedule.assignments.clone(), overwrite);
        Ok(schedule)
    }

    pub fn add_staff(&mut self, staff: Staff) -> Result<StaffId, SchedError> {
        self.roster.add_staff(staff).map_err(SchedError::InvalidStaff)
    }

    /// Mise à jour partielle ; un identifiant inconnu est une erreur distincte
    /// d'une mise à jour invalide.
    pub fn update_staff(&mut self, id: &StaffId, update: StaffUpdate) -> Result<Staff, SchedError> {
        if self.roster.find_staff_by_id(id).is_none() {
            return Err(SchedError::UnknownStaff(id.to_string()));
        }
        self.roster
            .update_staff(id, update)
            .map_err(SchedError::InvalidStaff)
    }

    pub fn assign_manual(
        &mut self,
        edit: ManualEdit,
    ) -> Result<(Assignment, Vec<ScheduleWarning>), SchedError> {
        validate::assign_manual(self, edit)
    }

    /// Ré-audite les affectations enregistrées d'un mois (après retouches manuelles).
    pub fn check_month(&self, year: i32, month: u32) -> Result<Vec<ScheduleWarning>, SchedError> {
        let assignments: Vec<Assignment> = self
            .roster
            .assignments_for_month(year, month)
            .cloned()
            .collect();
        audit::audit_month(year, month, &self.roster.staff, &assignments, self.opts)
    }
}
