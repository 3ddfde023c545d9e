use crate::model::{Role, SlotId, Staff, StaffRequest};
use crate::scheduler::Schedule;
use anyhow::{bail, Context};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use std::fs;
use std::path::Path;

/// Import du personnel depuis CSV: header `name,role,priority[,weekly_limit]`
pub fn import_staff_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Staff>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        let role: Role = rec
            .get(1)
            .context("missing role")?
            .parse()
            .map_err(anyhow::Error::msg)?;
        let priority: u8 = rec
            .get(2)
            .context("missing priority")?
            .trim()
            .parse()
            .with_context(|| format!("invalid priority for {name}"))?;
        let mut staff = Staff::new(name, role, priority);
        if let Some(limit) = rec.get(3) {
            let limit = limit.trim();
            if !limit.is_empty() {
                let limit: u32 = limit
                    .parse()
                    .with_context(|| format!("invalid weekly_limit for {name}"))?;
                staff.weekly_limit = Some(limit).filter(|&n| n > 0);
            }
        }
        staff
            .validate()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("invalid staff row for {name}"))?;
        out.push(staff);
    }
    Ok(out)
}

/// Import de disponibilités: header `staff,date,available[,slots]`.
/// `staff` est le nom d'un membre connu ; `slots` liste des ids séparés par `;`.
pub fn import_requests_csv<P: AsRef<Path>>(
    path: P,
    staff: &[Staff],
) -> anyhow::Result<Vec<StaffRequest>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing staff")?.trim();
        let person = staff
            .iter()
            .find(|s| s.name == name)
            .with_context(|| format!("unknown staff: {name}"))?;
        let raw_date = rec.get(1).context("missing date")?.trim();
        let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
            .with_context(|| format!("invalid date: {raw_date}"))?;
        let available = parse_bool(rec.get(2).context("missing available")?.trim())
            .with_context(|| format!("invalid available value for {name}"))?;
        let slots: Vec<SlotId> = rec
            .get(3)
            .map(|raw| {
                raw.split(';')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(SlotId::new)
                    .collect()
            })
            .unwrap_or_default();
        out.push(StaffRequest::new(&person.id, date, available, slots));
    }
    Ok(out)
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "o" | "oui" => Ok(true),
        "false" | "0" | "no" | "n" | "non" | "x" => Ok(false),
        _ => bail!("expected boolean"),
    }
}

/// Export JSON d'une génération (affectations + avertissements)
pub fn export_schedule_json<P: AsRef<Path>>(path: P, schedule: &Schedule) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(schedule)?;
    fs::write(path, s)?;
    Ok(())
}
