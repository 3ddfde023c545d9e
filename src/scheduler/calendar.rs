use super::SchedError;
use crate::model::DayType;
use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Lundi de la semaine contenant `date` (le dimanche clôt la semaine).
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let back = u64::from(date.weekday().num_days_from_monday());
    date - Days::new(back)
}

pub fn week_end(date: NaiveDate) -> NaiveDate {
    week_start(date) + Days::new(6)
}

pub fn day_type(date: NaiveDate) -> DayType {
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => DayType::Weekend,
        _ => DayType::Weekday,
    }
}

pub fn first_day(year: i32, month: u32) -> Result<NaiveDate, SchedError> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(SchedError::InvalidMonth { year, month })
}

pub fn last_day(year: i32, month: u32) -> Result<NaiveDate, SchedError> {
    let first = first_day(year, month)?;
    let next = first
        .checked_add_months(chrono::Months::new(1))
        .ok_or(SchedError::InvalidMonth { year, month })?;
    next.pred_opt().ok_or(SchedError::InvalidMonth { year, month })
}

/// Tous les jours du mois, dans l'ordre.
pub fn month_days(year: i32, month: u32) -> Result<Vec<NaiveDate>, SchedError> {
    let first = first_day(year, month)?;
    let last = last_day(year, month)?;
    Ok(first.iter_days().take_while(|d| *d <= last).collect())
}

/// Semaine lundi-dimanche touchant un mois.
///
/// `start`/`end` sont les bornes naturelles ; `label_start`/`label_end` sont
/// bornées au mois pour l'affichage. Le comptage se fait sur l'intersection
/// de la semaine naturelle avec le mois.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub label_start: NaiveDate,
    pub label_end: NaiveDate,
}

impl WeekWindow {
    /// `date` compte-t-elle pour cette fenêtre ?
    pub fn counts(&self, date: NaiveDate) -> bool {
        // label_* = [start, end] ∩ mois
        date >= self.label_start && date <= self.label_end
    }
}

pub fn month_weeks(year: i32, month: u32) -> Result<Vec<WeekWindow>, SchedError> {
    let first = first_day(year, month)?;
    let last = last_day(year, month)?;

    let mut out = Vec::new();
    let mut start = week_start(first);
    while start <= last {
        let end = start + Days::new(6);
        out.push(WeekWindow {
            start,
            end,
            label_start: start.max(first),
            label_end: end.min(last),
        });
        start = start + Days::new(7);
    }
    Ok(out)
}
