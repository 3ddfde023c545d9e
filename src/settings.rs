use crate::model::{DayType, Requirement, Role, ShiftSlot, SlotId};
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Configuration d'un mois : créneaux et effectifs requis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSettings {
    pub year: i32,
    /// 1..=12
    pub month: u32,
    #[serde(default)]
    pub slots: Vec<ShiftSlot>,
    #[serde(default)]
    pub requirements: Vec<Requirement>,
}

impl MonthSettings {
    /// Trois créneaux standards, aucun effectif requis.
    pub fn default_for(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            slots: vec![
                ShiftSlot::new("slot-1", "08:00-17:00", 1),
                ShiftSlot::new("slot-2", "11:00-L", 2),
                ShiftSlot::new("slot-3", "17:00-22:00", 3),
            ],
            requirements: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if NaiveDate::from_ymd_opt(self.year, self.month, 1).is_none() {
            bail!("invalid month: {}-{}", self.year, self.month);
        }
        let mut ids = HashSet::new();
        for slot in &self.slots {
            if slot.id.as_str().trim().is_empty() {
                bail!("slot id cannot be empty");
            }
            if !ids.insert(&slot.id) {
                bail!("duplicate slot id: {}", slot.id);
            }
        }
        let mut keys = HashSet::new();
        for req in &self.requirements {
            if !ids.contains(&req.slot_id) {
                bail!("requirement {} references unknown slot {}", req.id, req.slot_id);
            }
            if !keys.insert((req.day_type, &req.slot_id, req.role)) {
                bail!(
                    "duplicate requirement for {:?}/{}/{}",
                    req.day_type,
                    req.slot_id,
                    req.role.label()
                );
            }
        }
        Ok(())
    }

    pub fn find_slot(&self, id: &SlotId) -> Option<&ShiftSlot> {
        self.slots.iter().find(|s| &s.id == id)
    }

    /// Créneaux dans l'ordre configuré (stable à ordre égal).
    pub fn ordered_slots(&self) -> Vec<&ShiftSlot> {
        let mut slots: Vec<&ShiftSlot> = self.slots.iter().collect();
        slots.sort_by_key(|s| s.order);
        slots
    }

    /// Effectif requis ; 0 si aucune exigence n'est configurée.
    pub fn required_count(&self, day_type: DayType, slot: &SlotId, role: Role) -> u32 {
        self.requirements
            .iter()
            .find(|r| r.day_type == day_type && &r.slot_id == slot && r.role == role)
            .map_or(0, |r| r.count)
    }

    /// Ajoute ou remplace l'exigence pour ce triplet.
    pub fn set_requirement(&mut self, day_type: DayType, slot: &SlotId, role: Role, count: u32) {
        if let Some(existing) = self
            .requirements
            .iter_mut()
            .find(|r| r.day_type == day_type && &r.slot_id == slot && r.role == role)
        {
            existing.count = count;
        } else {
            self.requirements
                .push(Requirement::new(day_type, slot, role, count));
        }
    }
}

pub fn load_settings_from_file<P: AsRef<Path>>(path: P) -> Result<MonthSettings> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading settings {}", path.display()))?;
    let settings: MonthSettings = serde_json::from_slice(&data)
        .with_context(|| format!("parsing settings {}", path.display()))?;
    settings.validate()?;
    Ok(settings)
}

pub fn export_settings_json<P: AsRef<Path>>(path: P, settings: &MonthSettings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    Ok(())
}
