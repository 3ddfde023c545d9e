use super::{calendar, SchedError, ScheduleOptions, ScheduleWarning, WarningKind};
use crate::model::{Assignment, Staff};
use chrono::NaiveDate;

/// Audit d'un mois complet : dépassements hebdomadaires puis séries de jours consécutifs.
pub fn audit_month(
    year: i32,
    month: u32,
    staff: &[Staff],
    assignments: &[Assignment],
    opts: ScheduleOptions,
) -> Result<Vec<ScheduleWarning>, SchedError> {
    let mut out = weekly_limit_overruns(year, month, staff, assignments)?;
    out.extend(consecutive_runs(staff, assignments, opts));
    Ok(out)
}

pub fn weekly_limit_overruns(
    year: i32,
    month: u32,
    staff: &[Staff],
    assignments: &[Assignment],
) -> Result<Vec<ScheduleWarning>, SchedError> {
    let weeks = calendar::month_weeks(year, month)?;
    let mut out = Vec::new();

    for person in staff {
        let Some(limit) = person.weekly_limit() else {
            continue;
        };
        for week in &weeks {
            let count = assignments
                .iter()
                .filter(|a| a.staff_id == person.id && week.counts(a.date))
                .count();
            let count = u32::try_from(count).unwrap_or(u32::MAX);
            if count > limit {
                out.push(ScheduleWarning {
                    message: format!(
                        "{name}: week {start}..{end} exceeds the limit of {limit} \
                         ({count} assignments)",
                        name = person.name,
                        start = week.label_start,
                        end = week.label_end,
                    ),
                    kind: WarningKind::WeeklyLimit {
                        staff_id: person.id.clone(),
                        date: week.label_start,
                        week_end: week.label_end,
                        limit,
                        count,
                    },
                });
            }
        }
    }

    Ok(out)
}

/// Un avertissement par jour dès que la série atteint le seuil (jour 3, 4, 5, ...).
pub fn consecutive_runs(
    staff: &[Staff],
    assignments: &[Assignment],
    opts: ScheduleOptions,
) -> Vec<ScheduleWarning> {
    let mut out = Vec::new();

    for person in staff {
        let mut dates: Vec<NaiveDate> = assignments
            .iter()
            .filter(|a| a.staff_id == person.id)
            .map(|a| a.date)
            .collect();
        dates.sort();
        dates.dedup();

        let mut streak = 1u32;
        for pair in dates.windows(2) {
            let [prev, curr] = pair else { continue };
            if (*curr - *prev).num_days() == 1 {
                streak += 1;
                if streak >= opts.consecutive_warn_days {
                    out.push(ScheduleWarning {
                        message: format!(
                            "{name}: {streak} consecutive working days up to {curr}",
                            name = person.name,
                        ),
                        kind: WarningKind::Consecutive {
                            staff_id: person.id.clone(),
                            date: *curr,
                            streak,
                        },
                    });
                }
            } else {
                streak = 1;
            }
        }
    }

    out
}
