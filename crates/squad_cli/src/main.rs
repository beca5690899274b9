//! Squad CLI
//!
//! Club roster bookkeeping from the terminal: standings, coach rotation,
//! attendance, season stats, call-ups and league calendar import.

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use squad_core::{
    top_scorers, CalendarEntry, CoachPair, Convocation, Squad, SquadConfig, SquadError,
    SquadStore, StandingStat, TeamStats,
};

#[derive(Parser)]
#[command(name = "squad")]
#[command(about = "Youth football club roster manager", long_about = None)]
struct Cli {
    /// Save directory (overrides config and SQUAD_SAVE_DIR)
    #[arg(long, global = true)]
    save_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty roster save
    Init {
        /// Overwrite an existing save
        #[arg(long, default_value = "false")]
        force: bool,
    },

    /// Show the ranked league table
    Standings,

    /// Overwrite one standings column for a team
    SetStat {
        /// Team name as listed in the table
        #[arg(long)]
        team: String,

        /// played, wins, draws, losses, goals_for, goals_against or points
        #[arg(long)]
        stat: String,

        #[arg(long)]
        value: u32,
    },

    /// List the next upcoming fixtures with their coaches
    Upcoming {
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Assign the coach rotation over every upcoming fixture
    Rotate {
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Set the coach pair of one fixture
    AssignCoaches {
        #[arg(long)]
        fixture: String,

        #[arg(long)]
        first: String,

        #[arg(long)]
        second: String,
    },

    /// Training attendance rates per player
    Attendance,

    /// Season results and top scorers
    Stats {
        /// Number of scorers to list
        #[arg(long, default_value = "5")]
        top: usize,

        /// Print as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Print the call-up message for a fixture
    Convocation {
        /// Fixture id
        fixture: String,
    },

    /// Import league fixtures from a CSV calendar
    ImportCalendar {
        /// CSV with date,time,home,away,match_number[,team] columns
        #[arg(long)]
        csv: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut config = SquadConfig::load_from_env()?;
    if let Some(dir) = cli.save_dir {
        config.save_dir = dir;
    }
    let store = SquadStore::new(config.save_dir.clone());

    match cli.command {
        Commands::Init { force } => {
            if store.exists() && !force {
                bail!("a save already exists at {} (use --force to replace it)", store.path().display());
            }
            let squad = Squad::with_roster(config.coach_roster()?);
            store.save(&squad)?;
            println!("✅ Empty roster saved to {}", store.path().display());
        }

        Commands::Standings => {
            let squad = load(&store, &config)?;
            print_standings(&squad);
        }

        Commands::SetStat { team, stat, value } => {
            let mut squad = load(&store, &config)?;
            let Some(stat) = StandingStat::parse(&stat) else {
                bail!("unknown column '{stat}'");
            };
            let Some(index) = squad.standings.find_index(&team) else {
                bail!("no team named '{team}' in the standings");
            };
            squad.standings.update_stat(index, stat, value)?;
            store.save(&squad)?;
            print_standings(&squad);
        }

        Commands::Upcoming { today } => {
            let squad = load(&store, &config)?;
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            let upcoming = squad.upcoming_fixtures(today);
            if upcoming.is_empty() {
                println!("No upcoming fixtures.");
            }
            for fixture in upcoming.into_iter().take(config.upcoming_limit) {
                let side = fixture.team.map_or("-", |s| config.side_labels.label(s));
                let coaches =
                    squad.coaches_for(&fixture.id).map_or_else(|| "-".to_string(), |p| p.to_string());
                println!(
                    "{}  {} {}  {:<10} vs {:<24} coaches: {}  [{}]",
                    fixture.date.format("%d.%m.%Y"),
                    fixture.time.format("%H:%M"),
                    fixture.venue.label(),
                    side,
                    fixture.opponent,
                    coaches,
                    fixture.id
                );
            }
        }

        Commands::Rotate { today } => {
            let mut squad = load(&store, &config)?;
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            match squad.auto_assign_coaches(today) {
                Ok(count) => {
                    store.save(&squad)?;
                    println!("✅ Coaches assigned to {count} fixtures");
                    for fixture in squad.upcoming_fixtures(today) {
                        if let Some(pair) = squad.coaches_for(&fixture.id) {
                            println!("   {}  {:<24} {}", fixture.date.format("%d.%m.%Y"), fixture.opponent, pair);
                        }
                    }
                }
                Err(e) if e.is_notice() => println!("{e}"),
                Err(e) => return Err(e.into()),
            }
        }

        Commands::AssignCoaches { fixture, first, second } => {
            let mut squad = load(&store, &config)?;
            let pair = CoachPair::new(first, second);
            squad.assign_coaches_manually(&fixture, pair.clone())?;
            store.save(&squad)?;
            println!("✅ {pair} assigned to {fixture}");
        }

        Commands::Attendance => {
            let squad = load(&store, &config)?;
            let summary = squad.attendance_summary();
            for (player_id, ratio) in summary.ranked_players() {
                let name = squad.player(player_id).map_or(player_id, |p| p.name.as_str());
                println!("   {:<24} {:>4}", name, ratio.to_string());
            }
            println!("\nAverage attendance: {}", summary.average);
        }

        Commands::Stats { top, json } => {
            let squad = load(&store, &config)?;
            let stats = TeamStats::compute(&squad);
            let scorers = top_scorers(&squad, top);
            if json {
                let value = serde_json::json!({ "team": stats, "top_scorers": scorers });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("{}", config.club_name);
                println!("   Played:     {}", stats.played);
                println!("   W / D / L:  {} / {} / {}", stats.wins, stats.draws, stats.losses);
                println!("   Goals:      {}:{} ({:+})", stats.goals_for, stats.goals_against, stats.goal_difference());
                println!("   Attendance: {}%", stats.attendance_percent());
                if !scorers.is_empty() {
                    println!("\nTop scorers:");
                    for (i, scorer) in scorers.iter().enumerate() {
                        println!("   {}. {:<24} {}", i + 1, scorer.name, scorer.goals);
                    }
                }
            }
        }

        Commands::Convocation { fixture } => {
            let squad = load(&store, &config)?;
            let convocation = Convocation::build(&squad, &config.side_labels, &fixture)?;
            println!("{}", convocation.message);
        }

        Commands::ImportCalendar { csv } => {
            let mut squad = load(&store, &config)?;
            let entries = read_calendar_file(&csv)?;
            let imported = squad.import_calendar(&entries, &config.club_teams);
            store.save(&squad)?;
            println!("✅ Imported {imported} of {} fixtures", entries.len());
        }
    }

    Ok(())
}

/// Stored roster, or a fresh one, with the configured coaching staff applied.
fn load(store: &SquadStore, config: &SquadConfig) -> Result<Squad> {
    let mut squad =
        store.load_or_default().with_context(|| format!("failed to load {}", store.path().display()))?;
    squad.set_coach_roster(config.coach_roster()?);
    Ok(squad)
}

fn print_standings(squad: &Squad) {
    println!("{:>3}  {:<24} {:>3} {:>3} {:>3} {:>3} {:>7} {:>4} {:>4}", "#", "Team", "P", "W", "D", "L", "Goals", "+/-", "Pts");
    for record in squad.standings.ranked() {
        let marker = if record.is_home_club { "*" } else { " " };
        println!(
            "{:>3}{} {:<24} {:>3} {:>3} {:>3} {:>3} {:>3}:{:<3} {:>+4} {:>4}",
            record.position,
            marker,
            record.team_name,
            record.played,
            record.wins,
            record.draws,
            record.losses,
            record.goals_for,
            record.goals_against,
            record.goal_difference(),
            record.points
        );
    }
}

fn read_calendar_file(path: &Path) -> Result<Vec<CalendarEntry>> {
    let file = std::fs::File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    read_calendar(file)
}

fn read_calendar<R: Read>(reader: R) -> Result<Vec<CalendarEntry>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut entries = Vec::new();
    for (line, record) in rdr.deserialize::<CalendarEntry>().enumerate() {
        let entry = record.with_context(|| format!("calendar row {}", line + 1))?;
        entries.push(entry);
    }
    if entries.is_empty() {
        return Err(SquadError::InvalidParameter("calendar has no fixtures".to_string()).into());
    }
    Ok(entries)
}
