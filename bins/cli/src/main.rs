//! Attendo command-line front end.
//!
//! Daily attendance entry, leave requests with two-stage approval, balance
//! administration, exports, and spreadsheet sync over a local data directory.

mod commands;

use std::path::PathBuf;

use attendo_shared::{AppConfig, AppError};
use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use attendo_core::attendance::{AttendanceStatus, TimeField};

#[derive(Parser)]
#[command(name = "attendo")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Attendance and leave-approval ledger", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Data directory (overrides `storage.data_dir`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roster management
    #[command(subcommand)]
    Members(MembersCommand),

    /// Record a status for one or more members
    Mark {
        /// Status to record
        #[arg(value_enum)]
        status: StatusArg,

        /// Member ids
        #[arg(required = true)]
        members: Vec<String>,

        /// Date (defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Check-in time, HH:MM
        #[arg(long, value_parser = parse_clock)]
        check_in: Option<NaiveTime>,

        /// Check-out time, HH:MM
        #[arg(long, value_parser = parse_clock)]
        check_out: Option<NaiveTime>,

        /// Note (late reason etc.)
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Replace the note on an existing record
    Note {
        /// Member id
        member: String,

        /// Note text; empty clears it
        text: String,

        /// Date (defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Set a clock time for one or more members
    Time {
        /// Which time to set
        #[arg(value_enum)]
        field: TimeArg,

        /// Time, HH:MM; omit with --clear
        #[arg(value_parser = parse_clock, required_unless_present = "clear")]
        at: Option<NaiveTime>,

        /// Member ids
        #[arg(short, long, num_args = 1.., required = true)]
        members: Vec<String>,

        /// Clear the time on existing records instead
        #[arg(long)]
        clear: bool,

        /// Date (defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Daily counts; with --status, list matching members
    Stats {
        /// Date (defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Drill down into one status
        #[arg(long, value_enum)]
        status: Option<DrillArg>,
    },

    /// Attendance history for one member
    #[command(name = "member-stats")]
    MemberStats {
        /// Member id
        member: String,
    },

    /// Vacation requests
    #[command(subcommand)]
    Leave(LeaveCommand),

    /// Leave balances
    #[command(subcommand)]
    Balance(BalanceCommand),

    /// CSV exports
    #[command(subcommand)]
    Export(ExportCommand),

    /// Push a day's attendance to the spreadsheet webhook
    Sync {
        /// Date (defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Show, save, or clear the spreadsheet webhook URL
    #[command(name = "sheet-url")]
    SheetUrl {
        /// URL to save
        url: Option<String>,

        /// Remove the saved URL
        #[arg(long, conflicts_with = "url")]
        clear: bool,
    },

    /// Delete every collection
    Wipe {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum MembersCommand {
    /// List the roster
    List,
    /// Restore the built-in roster
    Reset,
    /// Replace the roster from a CSV file
    Import {
        /// CSV file (header: 이름,부서,직급,이용구분,상세장소)
        file: PathBuf,
    },
    /// Write the roster CSV template
    Template {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum LeaveCommand {
    /// Submit a vacation request
    Submit {
        /// Member id
        member: String,
        /// First day
        start: NaiveDate,
        /// Last day (inclusive)
        end: NaiveDate,
        /// Leave type, e.g. 연차, 반차(오전), 공가
        #[arg(short = 't', long = "type")]
        leave_type: String,
        /// Reason
        #[arg(short, long, default_value = "")]
        reason: String,
        /// Submit even when the balance is insufficient
        #[arg(long)]
        force: bool,
    },
    /// Secretary approval
    Approve {
        /// Request id
        id: String,
    },
    /// Director (final) approval
    Final {
        /// Request id
        id: String,
    },
    /// Reject at either stage
    Reject {
        /// Request id
        id: String,
    },
    /// List requests, newest first
    List {
        /// Only requests awaiting approval
        #[arg(long)]
        pending: bool,
    },
}

#[derive(Subcommand)]
enum BalanceCommand {
    /// List every member's balance
    List,
    /// Set a member's total allotment
    #[command(name = "set-total")]
    SetTotal {
        /// Member id
        member: String,
        /// Total days
        days: Decimal,
    },
}

#[derive(Subcommand)]
enum ExportCommand {
    /// All attendance records
    Attendance {
        /// Tab-separated output for pasting into a spreadsheet
        #[arg(long)]
        tsv: bool,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Leave balances
    Balances {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Present,
    Late,
    Absent,
    Excused,
}

impl From<StatusArg> for AttendanceStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Present => Self::Present,
            StatusArg::Late => Self::Late,
            StatusArg::Absent => Self::Absent,
            StatusArg::Excused => Self::Excused,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DrillArg {
    Present,
    Late,
    Absent,
    Excused,
    Pending,
}

impl DrillArg {
    fn status(self) -> Option<AttendanceStatus> {
        match self {
            Self::Present => Some(AttendanceStatus::Present),
            Self::Late => Some(AttendanceStatus::Late),
            Self::Absent => Some(AttendanceStatus::Absent),
            Self::Excused => Some(AttendanceStatus::Excused),
            Self::Pending => None,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum TimeArg {
    CheckIn,
    CheckOut,
}

impl From<TimeArg> for TimeField {
    fn from(arg: TimeArg) -> Self {
        match arg {
            TimeArg::CheckIn => Self::CheckIn,
            TimeArg::CheckOut => Self::CheckOut,
        }
    }
}

fn parse_clock(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").map_err(|e| format!("expected HH:MM: {e}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "attendo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load().map_err(AppError::from)?;
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = dir;
    }

    let result = match commands::App::open(config) {
        Ok(mut app) => app.run(cli.command).await,
        Err(err) => Err(err),
    };
    if let Err(err) = result {
        let code = match err.downcast_ref::<AppError>() {
            Some(app_err) => {
                eprintln!("error [{}]: {app_err}", app_err.error_code());
                if app_err.is_user_error() { 2 } else { 1 }
            }
            None => {
                eprintln!("error: {err:#}");
                1
            }
        };
        std::process::exit(code);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_leave_submit() {
        let cli = Cli::try_parse_from([
            "attendo", "leave", "submit", "mem-1", "2024-03-04", "2024-03-08", "-t", "연차",
        ])
        .unwrap();
        match cli.command {
            Commands::Leave(LeaveCommand::Submit {
                member,
                start,
                leave_type,
                reason,
                force,
                ..
            }) => {
                assert_eq!(member, "mem-1");
                assert_eq!(start, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
                assert_eq!(leave_type, "연차");
                assert!(reason.is_empty());
                assert!(!force);
            }
            _ => panic!("expected leave submit"),
        }
    }

    #[test]
    fn test_parse_time_requires_value_or_clear() {
        assert!(Cli::try_parse_from(["attendo", "time", "check-out", "-m", "mem-1"]).is_err());
        assert!(
            Cli::try_parse_from(["attendo", "time", "check-out", "--clear", "-m", "mem-1"]).is_ok()
        );
        assert!(
            Cli::try_parse_from(["attendo", "time", "check-in", "9:xx", "-m", "mem-1"]).is_err()
        );
    }

    #[test]
    fn test_drill_pending_has_no_status() {
        assert_eq!(DrillArg::Pending.status(), None);
        assert_eq!(DrillArg::Late.status(), Some(AttendanceStatus::Late));
    }

    #[test]
    fn test_parse_clock() {
        assert_eq!(
            parse_clock(" 09:30 ").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
        assert!(parse_clock("25:00").is_err());
    }
}
