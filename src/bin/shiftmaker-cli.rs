#![forbid(unsafe_code)]
use anyhow::{anyhow, bail, Result};
use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};
use shiftmaker::{
    io,
    model::{AssignmentId, DayType, RequestEntry, Role, Roster, SlotId, Staff, StaffId, StaffUpdate},
    scheduler::{ManualEdit, ScheduleOptions, ScheduleWarning, Scheduler},
    settings::{load_settings_from_file, MonthSettings},
    storage::{JsonStorage, Storage},
};
use std::collections::BTreeMap;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de planification mensuelle du personnel (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du roster
    #[arg(long, global = true, env = "SHIFTMAKER_DATA", default_value = "roster.json")]
    data: String,

    /// Seuil d'avertissement pour les jours consécutifs
    #[arg(long, global = true, default_value_t = 3)]
    consecutive_warn_days: u32,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ajouter un membre du personnel
    AddStaff {
        #[arg(long)]
        name: String,
        /// leader | hall | kitchen
        #[arg(long)]
        role: Role,
        /// 1..=5 (5 = prioritaire)
        #[arg(long, default_value_t = 3)]
        priority: u8,
        #[arg(long)]
        weekly_limit: Option<u32>,
    },

    /// Importer du personnel depuis un CSV
    ImportStaff {
        #[arg(long)]
        csv: String,
    },

    /// Modifier un membre (désigné par son nom)
    UpdateStaff {
        #[arg(long)]
        name: String,
        #[arg(long)]
        rename: Option<String>,
        #[arg(long)]
        role: Option<Role>,
        #[arg(long)]
        priority: Option<u8>,
        #[arg(long, conflicts_with = "clear_limit")]
        weekly_limit: Option<u32>,
        #[arg(long)]
        clear_limit: bool,
    },

    /// Supprimer un membre
    RemoveStaff {
        #[arg(long)]
        name: String,
    },

    /// Lister le personnel
    ListStaff,

    /// Initialiser la configuration du mois (créneaux standards ou fichier JSON)
    InitSettings {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        #[arg(long)]
        from: Option<String>,
    },

    /// Fixer l'effectif requis pour (type de jour, créneau, rôle)
    Require {
        /// weekday | weekend
        #[arg(long)]
        day_type: DayType,
        #[arg(long)]
        slot: String,
        #[arg(long)]
        role: Role,
        #[arg(long)]
        count: u32,
    },

    /// Déclarer la disponibilité d'un membre pour une date
    Request {
        #[arg(long)]
        staff: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
        /// Indisponible toute la journée
        #[arg(long, conflicts_with = "slots")]
        off: bool,
        /// Créneaux acceptés "slot-1,slot-3" (vide = tous)
        #[arg(long)]
        slots: Option<String>,
    },

    /// Importer des disponibilités depuis un CSV (remplace le mois de chaque membre concerné)
    ImportRequests {
        #[arg(long)]
        csv: String,
    },

    /// Générer le planning d'un mois
    Generate {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        /// Ajoute aux affectations existantes au lieu de remplacer le mois
        #[arg(long)]
        append: bool,
        #[arg(long)]
        out_json: Option<String>,
    },

    /// Affecter manuellement un membre à une cellule (date, créneau)
    Assign {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        slot: String,
        #[arg(long)]
        staff: String,
        /// Réaffecter une affectation existante
        #[arg(long)]
        id: Option<String>,
    },

    /// Supprimer une affectation
    Unassign {
        #[arg(long)]
        id: String,
    },

    /// Lister les affectations d'un mois
    List {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
    },

    /// Ré-auditer les affectations enregistrées d'un mois
    Check {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.data)?;
    let opts = ScheduleOptions {
        consecutive_warn_days: cli.consecutive_warn_days,
    };
    let mut scheduler = Scheduler::with_roster(storage.load_or_default()?, opts);

    let code = match cli.cmd {
        Commands::AddStaff {
            name,
            role,
            priority,
            weekly_limit,
        } => {
            let mut staff = Staff::new(name.trim(), role, priority);
            staff.weekly_limit = weekly_limit.filter(|&n| n > 0);
            let id = scheduler.add_staff(staff)?;
            storage.save(scheduler.roster())?;
            println!("{id}");
            0
        }
        Commands::ImportStaff { csv } => {
            let staff = io::import_staff_csv(csv)?;
            let n = staff.len();
            scheduler.roster_mut().staff.extend(staff);
            storage.save(scheduler.roster())?;
            println!("imported {n} staff");
            0
        }
        Commands::UpdateStaff {
            name,
            rename,
            role,
            priority,
            weekly_limit,
            clear_limit,
        } => {
            let id = staff_id_by_name(scheduler.roster(), &name)?;
            let update = StaffUpdate {
                name: rename,
                role,
                priority,
                weekly_limit: if clear_limit {
                    Some(None)
                } else {
                    weekly_limit.map(Some)
                },
            };
            scheduler.update_staff(&id, update)?;
            storage.save(scheduler.roster())?;
            0
        }
        Commands::RemoveStaff { name } => {
            let id = staff_id_by_name(scheduler.roster(), &name)?;
            scheduler.roster_mut().remove_staff(&id);
            storage.save(scheduler.roster())?;
            0
        }
        Commands::ListStaff => {
            for s in &scheduler.roster().staff {
                let limit = s
                    .weekly_limit()
                    .map_or_else(|| "-".to_string(), |n| n.to_string());
                println!(
                    "{} | {} | {} | p{} | limit {}",
                    s.id,
                    s.name,
                    s.role.label(),
                    s.priority,
                    limit
                );
            }
            0
        }
        Commands::InitSettings { year, month, from } => {
            let settings = match from {
                Some(path) => load_settings_from_file(path)?,
                None => {
                    let settings = MonthSettings::default_for(year, month);
                    settings.validate()?;
                    settings
                }
            };
            scheduler.roster_mut().settings = Some(settings);
            storage.save(scheduler.roster())?;
            0
        }
        Commands::Require {
            day_type,
            slot,
            role,
            count,
        } => {
            let settings = scheduler
                .roster_mut()
                .settings
                .as_mut()
                .ok_or_else(|| anyhow!("no settings: run init-settings first"))?;
            let slot = SlotId::new(slot);
            if settings.find_slot(&slot).is_none() {
                bail!("unknown slot: {slot}");
            }
            settings.set_requirement(day_type, &slot, role, count);
            storage.save(scheduler.roster())?;
            0
        }
        Commands::Request {
            staff,
            date,
            off,
            slots,
        } => {
            let id = staff_id_by_name(scheduler.roster(), &staff)?;
            let entry = RequestEntry {
                date,
                available: !off,
                available_slots: slots.as_deref().map(split_list).unwrap_or_default(),
            };
            scheduler.roster_mut().set_request(&id, entry);
            storage.save(scheduler.roster())?;
            0
        }
        Commands::ImportRequests { csv } => {
            let imported = io::import_requests_csv(csv, &scheduler.roster().staff)?;
            let mut grouped: BTreeMap<(StaffId, i32, u32), Vec<RequestEntry>> = BTreeMap::new();
            for r in imported {
                grouped
                    .entry((r.staff_id, r.date.year(), r.date.month()))
                    .or_default()
                    .push(RequestEntry {
                        date: r.date,
                        available: r.available,
                        available_slots: r.available_slots,
                    });
            }
            let mut total = 0;
            for ((staff_id, year, month), entries) in grouped {
                total += scheduler
                    .roster_mut()
                    .replace_month_requests(&staff_id, year, month, entries);
            }
            storage.save(scheduler.roster())?;
            println!("imported {total} request(s)");
            0
        }
        Commands::Generate {
            year,
            month,
            append,
            out_json,
        } => {
            let schedule = scheduler.generate(year, month, !append)?;
            storage.save(scheduler.roster())?;
            if let Some(path) = out_json {
                io::export_schedule_json(path, &schedule)?;
            }
            println!("generated {} assignment(s)", schedule.assignments.len());
            print_warnings(&schedule.warnings)
        }
        Commands::Assign {
            date,
            slot,
            staff,
            id,
        } => {
            let staff_id = staff_id_by_name(scheduler.roster(), &staff)?;
            let edit = ManualEdit {
                id: id.map(AssignmentId::new),
                date,
                slot_id: SlotId::new(slot),
                staff_id,
            };
            let (assignment, warnings) = scheduler.assign_manual(edit)?;
            storage.save(scheduler.roster())?;
            println!("{}", assignment.id);
            print_warnings(&warnings)
        }
        Commands::Unassign { id } => {
            let id = AssignmentId::new(id);
            if scheduler.roster_mut().remove_assignment(&id).is_none() {
                bail!("unknown assignment: {id}");
            }
            storage.save(scheduler.roster())?;
            0
        }
        Commands::List { year, month } => {
            let roster = scheduler.roster();
            let mut rows: Vec<_> = roster.assignments_for_month(year, month).collect();
            let order = |slot: &SlotId| {
                roster
                    .settings
                    .as_ref()
                    .and_then(|s| s.find_slot(slot))
                    .map_or(i32::MAX, |s| s.order)
            };
            rows.sort_by_key(|a| (a.date, order(&a.slot_id)));
            for a in rows {
                let who = roster
                    .find_staff_by_id(&a.staff_id)
                    .map_or(a.staff_id.as_str(), |s| s.name.as_str());
                let label = roster
                    .settings
                    .as_ref()
                    .and_then(|s| s.find_slot(&a.slot_id))
                    .map_or(a.slot_id.as_str(), |s| s.label.as_str());
                println!(
                    "{} | {} | {}{} | {}",
                    a.date,
                    label,
                    who,
                    if a.is_manual { " (manual)" } else { "" },
                    a.id
                );
            }
            0
        }
        Commands::Check { year, month } => {
            let warnings = scheduler.check_month(year, month)?;
            if warnings.is_empty() {
                println!("OK: no warnings");
            }
            print_warnings(&warnings)
        }
    };

    std::process::exit(code);
}

fn staff_id_by_name(roster: &Roster, name: &str) -> Result<StaffId> {
    roster
        .find_staff_by_name(name)
        .map(|s| s.id.clone())
        .ok_or_else(|| anyhow!("unknown staff: {name}"))
}

fn split_list(raw: &str) -> Vec<SlotId> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(SlotId::new)
        .collect()
}

/// Code 2 = WARNING
fn print_warnings(warnings: &[ScheduleWarning]) -> i32 {
    if warnings.is_empty() {
        return 0;
    }
    eprintln!("Found {} warning(s)", warnings.len());
    for w in warnings {
        eprintln!("[{}] {}", w.kind.tag(), w.message);
    }
    2
}
