use super::{
    audit, calendar, eligibility, SchedError, Schedule, ScheduleOptions, ScheduleWarning,
    WarningKind,
};
use crate::model::{Assignment, Role, Staff, StaffRequest};
use crate::settings::MonthSettings;

/// Remplissage glouton du mois : jours croissants, créneaux par `order`,
/// rôles leader → hall → kitchen. Aucun retour arrière.
pub(super) fn generate(
    year: i32,
    month: u32,
    staff: &[Staff],
    settings: &MonthSettings,
    requests: &[StaffRequest],
    opts: ScheduleOptions,
) -> Result<Schedule, SchedError> {
    let days = calendar::month_days(year, month)?;
    let slots = settings.ordered_slots();

    let mut assignments: Vec<Assignment> = Vec::new();
    let mut warnings: Vec<ScheduleWarning> = Vec::new();

    for date in days {
        let day_type = calendar::day_type(date);

        for slot in &slots {
            for role in Role::FILL_ORDER {
                let required = settings.required_count(day_type, &slot.id, role);
                if required == 0 {
                    continue;
                }

                let mut queue = eligibility::eligible_candidates(
                    staff,
                    role,
                    date,
                    &slot.id,
                    &assignments,
                    requests,
                )
                .into_iter();

                let mut filled = 0u32;
                while filled < required {
                    let Some(chosen) = queue.next() else { break };
                    assignments.push(Assignment::generated(date, &slot.id, &chosen.id));
                    filled += 1;
                }

                if filled < required {
                    #[cfg(feature = "logging")]
                    tracing::trace!(
                        %date,
                        slot = %slot.id,
                        role = role.label(),
                        required,
                        filled,
                        "role shortage"
                    );
                    warnings.push(ScheduleWarning {
                        message: format!(
                            "{date} [{label}]: {role} needs {required} staff \
                             but only {filled} could be assigned",
                            label = slot.label,
                            role = role.label(),
                        ),
                        kind: WarningKind::RoleShortage {
                            date,
                            slot_id: slot.id.clone(),
                            role,
                            required,
                            filled,
                        },
                    });
                }
            }
        }
    }

    warnings.extend(audit::audit_month(year, month, staff, &assignments, opts)?);

    #[cfg(feature = "logging")]
    tracing::debug!(
        year,
        month,
        assignments = assignments.len(),
        warnings = warnings.len(),
        "schedule generated"
    );

    Ok(Schedule {
        assignments,
        warnings,
    })
}
