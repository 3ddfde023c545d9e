use crate::settings::MonthSettings;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new<S: AsRef<str>>(s: S) -> Self {
                Self(s.as_ref().to_owned())
            }
            pub fn random() -> Self {
                Self(Uuid::new_v4().to_string())
            }
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifiant fort pour Staff
    StaffId
);
string_id!(
    /// Identifiant fort pour ShiftSlot
    SlotId
);
string_id!(
    /// Identifiant fort pour Assignment
    AssignmentId
);
string_id!(RequestId);

impl AssignmentId {
    /// Id déterministe d'une affectation produite par le générateur.
    pub fn generated(date: NaiveDate, slot: &SlotId, staff: &StaffId) -> Self {
        Self(format!("{date}-{slot}-{staff}"))
    }
}

/// Compétence d'un membre du personnel. Catégorielle, pas hiérarchique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Leader,
    Hall,
    Kitchen,
}

impl Role {
    /// Ordre de remplissage dans un créneau : l'encadrement d'abord.
    pub const FILL_ORDER: [Role; 3] = [Role::Leader, Role::Hall, Role::Kitchen];

    pub fn label(self) -> &'static str {
        match self {
            Role::Leader => "Leader",
            Role::Hall => "Hall",
            Role::Kitchen => "Kitchen",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "leader" => Ok(Role::Leader),
            "hall" => Ok(Role::Hall),
            "kitchen" => Ok(Role::Kitchen),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    Weekday,
    Weekend,
}

impl std::str::FromStr for DayType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekday" => Ok(DayType::Weekday),
            "weekend" | "holiday" => Ok(DayType::Weekend),
            other => Err(format!("unknown day type: {other}")),
        }
    }
}

/// Membre du personnel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: StaffId,
    pub name: String,
    pub role: Role,
    /// 1..=5, 5 = planifié en priorité
    pub priority: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_limit: Option<u32>,
    pub created_at: DateTime<Utc>,
}

impl Staff {
    pub const PRIORITY_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

    pub fn new<N: Into<String>>(name: N, role: Role, priority: u8) -> Self {
        Self {
            id: StaffId::random(),
            name: name.into(),
            role,
            priority,
            weekly_limit: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_weekly_limit(mut self, limit: u32) -> Self {
        self.weekly_limit = Some(limit);
        self
    }

    /// Limite hebdomadaire effective ; une limite à 0 vaut absence de limite.
    pub fn weekly_limit(&self) -> Option<u32> {
        self.weekly_limit.filter(|&n| n > 0)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("staff name cannot be empty".to_string());
        }
        if !Self::PRIORITY_RANGE.contains(&self.priority) {
            return Err(format!("priority must be within 1..=5, got {}", self.priority));
        }
        Ok(())
    }
}

/// Créneau horaire nommé ("08:00-17:00").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftSlot {
    pub id: SlotId,
    pub label: String,
    pub order: i32,
}

impl ShiftSlot {
    pub fn new<S: AsRef<str>, L: Into<String>>(id: S, label: L, order: i32) -> Self {
        Self {
            id: SlotId::new(id),
            label: label.into(),
            order,
        }
    }
}

/// Effectif requis pour un triplet (type de jour, créneau, rôle).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    pub id: String,
    pub day_type: DayType,
    pub slot_id: SlotId,
    pub role: Role,
    pub count: u32,
}

impl Requirement {
    pub fn new(day_type: DayType, slot_id: &SlotId, role: Role, count: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            day_type,
            slot_id: slot_id.clone(),
            role,
            count,
        }
    }
}

/// Disponibilité déclarée d'un membre pour une date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffRequest {
    pub id: RequestId,
    pub staff_id: StaffId,
    pub date: NaiveDate,
    pub available: bool,
    /// Vide = tous les créneaux acceptés.
    #[serde(default)]
    pub available_slots: Vec<SlotId>,
    pub updated_at: DateTime<Utc>,
}

impl StaffRequest {
    pub fn unavailable(staff_id: &StaffId, date: NaiveDate) -> Self {
        Self::new(staff_id, date, false, Vec::new())
    }

    pub fn only_slots(staff_id: &StaffId, date: NaiveDate, slots: Vec<SlotId>) -> Self {
        Self::new(staff_id, date, true, slots)
    }

    pub fn new(staff_id: &StaffId, date: NaiveDate, available: bool, slots: Vec<SlotId>) -> Self {
        Self {
            id: RequestId::random(),
            staff_id: staff_id.clone(),
            date,
            available,
            available_slots: slots,
            updated_at: Utc::now(),
        }
    }

    /// Le membre accepte-t-il ce créneau ce jour-là ?
    pub fn allows(&self, slot: &SlotId) -> bool {
        self.available && (self.available_slots.is_empty() || self.available_slots.contains(slot))
    }
}

/// Affectation d'un membre à un créneau pour une date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: AssignmentId,
    pub date: NaiveDate,
    pub slot_id: SlotId,
    pub staff_id: StaffId,
    pub year: i32,
    pub month: u32,
    pub is_manual: bool,
}

impl Assignment {
    pub fn generated(date: NaiveDate, slot_id: &SlotId, staff_id: &StaffId) -> Self {
        Self {
            id: AssignmentId::generated(date, slot_id, staff_id),
            date,
            slot_id: slot_id.clone(),
            staff_id: staff_id.clone(),
            year: date.year(),
            month: date.month(),
            is_manual: false,
        }
    }

    pub fn manual(date: NaiveDate, slot_id: &SlotId, staff_id: &StaffId) -> Self {
        Self {
            id: AssignmentId::random(),
            is_manual: true,
            ..Self::generated(date, slot_id, staff_id)
        }
    }

    pub fn in_month(&self, year: i32, month: u32) -> bool {
        self.year == year && self.month == month
    }
}

/// Champs modifiables d'un membre ; `None` = inchangé.
#[derive(Debug, Clone, Default)]
pub struct StaffUpdate {
    pub name: Option<String>,
    pub role: Option<Role>,
    pub priority: Option<u8>,
    /// `Some(None)` efface la limite.
    pub weekly_limit: Option<Option<u32>>,
}

/// Entrée d'une saisie de disponibilités mensuelle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestEntry {
    pub date: NaiveDate,
    pub available: bool,
    pub available_slots: Vec<SlotId>,
}

/// Ensemble des données persistées d'un établissement.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Roster {
    #[serde(default)]
    pub staff: Vec<Staff>,
    #[serde(default)]
    pub settings: Option<MonthSettings>,
    #[serde(default)]
    pub requests: Vec<StaffRequest>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

impl Roster {
    pub fn find_staff_by_id<'a>(&'a self, id: &StaffId) -> Option<&'a Staff> {
        self.staff.iter().find(|s| &s.id == id)
    }
    pub fn find_staff_by_name<'a>(&'a self, name: &str) -> Option<&'a Staff> {
        self.staff.iter().find(|s| s.name == name)
    }
    pub fn find_staff_mut_by_id(&mut self, id: &StaffId) -> Option<&mut Staff> {
        self.staff.iter_mut().find(|s| &s.id == id)
    }
    pub fn find_assignment(&self, id: &AssignmentId) -> Option<&Assignment> {
        self.assignments.iter().find(|a| &a.id == id)
    }

    pub fn add_staff(&mut self, staff: Staff) -> Result<StaffId, String> {
        staff.validate()?;
        let id = staff.id.clone();
        self.staff.push(staff);
        Ok(id)
    }

    /// Applique une mise à jour partielle et renvoie l'état résultant.
    pub fn update_staff(&mut self, id: &StaffId, update: StaffUpdate) -> Result<Staff, String> {
        let staff = self
            .find_staff_mut_by_id(id)
            .ok_or_else(|| format!("unknown staff: {id}"))?;
        let mut next = staff.clone();
        if let Some(name) = update.name {
            next.name = name.trim().to_string();
        }
        if let Some(role) = update.role {
            next.role = role;
        }
        if let Some(priority) = update.priority {
            next.priority = priority;
        }
        if let Some(limit) = update.weekly_limit {
            next.weekly_limit = limit.filter(|&n| n > 0);
        }
        next.validate()?;
        *staff = next.clone();
        Ok(next)
    }

    /// Retire un membre ainsi que ses disponibilités et ses affectations :
    /// aucune affectation ne doit référencer un membre inconnu.
    pub fn remove_staff(&mut self, id: &StaffId) -> Option<Staff> {
        let pos = self.staff.iter().position(|s| &s.id == id)?;
        self.requests.retain(|r| &r.staff_id != id);
        self.assignments.retain(|a| &a.staff_id != id);
        Some(self.staff.remove(pos))
    }

    pub fn requests_for_staff<'a>(
        &'a self,
        id: &'a StaffId,
    ) -> impl Iterator<Item = &'a StaffRequest> + 'a {
        self.requests.iter().filter(move |r| &r.staff_id == id)
    }

    pub fn requests_for_month(&self, year: i32, month: u32) -> impl Iterator<Item = &StaffRequest> {
        self.requests
            .iter()
            .filter(move |r| r.date.year() == year && r.date.month() == month)
    }

    /// Remplace les disponibilités d'un membre pour un mois donné.
    /// Les entrées hors du mois sont ignorées. Renvoie le nombre d'entrées enregistrées.
    pub fn replace_month_requests(
        &mut self,
        staff_id: &StaffId,
        year: i32,
        month: u32,
        entries: Vec<RequestEntry>,
    ) -> usize {
        self.requests.retain(|r| {
            !(&r.staff_id == staff_id && r.date.year() == year && r.date.month() == month)
        });
        let before = self.requests.len();
        self.requests.extend(
            entries
                .into_iter()
                .filter(|e| e.date.year() == year && e.date.month() == month)
                .map(|e| StaffRequest::new(staff_id, e.date, e.available, e.available_slots)),
        );
        self.requests.len() - before
    }

    /// Enregistre (ou remplace) la disponibilité d'un membre pour une date.
    pub fn set_request(&mut self, staff_id: &StaffId, entry: RequestEntry) -> &StaffRequest {
        self.requests
            .retain(|r| !(&r.staff_id == staff_id && r.date == entry.date));
        self.requests.push(StaffRequest::new(
            staff_id,
            entry.date,
            entry.available,
            entry.available_slots,
        ));
        &self.requests[self.requests.len() - 1]
    }

    pub fn assignments_for_month(
        &self,
        year: i32,
        month: u32,
    ) -> impl Iterator<Item = &Assignment> {
        self.assignments.iter().filter(move |a| a.in_month(year, month))
    }

    /// Range une génération : `overwrite` remplace le mois ciblé, sinon ajoute
    /// les seules affectations dont l'identifiant n'est pas déjà enregistré.
    /// Renvoie le nombre d'affectations ajoutées.
    pub fn apply_generated(
        &mut self,
        year: i32,
        month: u32,
        generated: Vec<Assignment>,
        overwrite: bool,
    ) -> usize {
        if overwrite {
            self.assignments.retain(|a| !a.in_month(year, month));
        }
        let mut known: HashSet<AssignmentId> =
            self.assignments.iter().map(|a| a.id.clone()).collect();
        let before = self.assignments.len();
        self.assignments
            .extend(generated.into_iter().filter(|a| known.insert(a.id.clone())));
        self.assignments.len() - before
    }

    pub fn remove_assignment(&mut self, id: &AssignmentId) -> Option<Assignment> {
        let pos = self.assignments.iter().position(|a| &a.id == id)?;
        Some(self.assignments.remove(pos))
    }
}
