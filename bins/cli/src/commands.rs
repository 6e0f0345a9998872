//! Subcommand handlers.

use std::fs;
use std::path::Path;

use anyhow::{Context, bail};
use attendo_core::attendance::{AttendanceEntry, AttendanceService, status_label};
use attendo_core::leave::{LeaveApplication, LeaveLedger, LeavePolicy, VacationRequest};
use attendo_core::report::{ReportService, attendance_csv, balance_csv, sheet_payload, to_tsv};
use attendo_core::roster::{RosterImport, default_roster, template_csv};
use attendo_core::store::{
    AttendanceStore, DateFilter, MemberDirectory, RequestStore, SettingsStore,
};
use attendo_shared::{AppConfig, AppError};
use attendo_shared::types::{MemberId, RequestId};
use attendo_store::FileStore;
use attendo_sync::SheetClient;
use chrono::{Local, NaiveDate, Utc};
use tracing::info;

use crate::{BalanceCommand, Commands, ExportCommand, LeaveCommand, MembersCommand};

/// Loaded configuration plus the opened data directory.
pub struct App {
    config: AppConfig,
    store: FileStore,
    ledger: LeaveLedger,
}

/// Lifts a domain error into `AppError` so `main` can report its code.
trait AppResultExt<T> {
    fn app(self) -> Result<T, AppError>;
}

impl<T, E> AppResultExt<T> for Result<T, E>
where
    E: Into<AppError>,
{
    fn app(self) -> Result<T, AppError> {
        self.map_err(Into::into)
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Note and clock times belong to one record; batch marking sets only the status.
fn ensure_single_member(count: usize, has_details: bool) -> anyhow::Result<()> {
    if count > 1 && has_details {
        bail!("--note, --check-in and --check-out need a single member; mark them one by one");
    }
    Ok(())
}

fn write_output(out: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn request_line(store: &FileStore, request: &VacationRequest) -> anyhow::Result<String> {
    let who = store
        .member(&request.member_id)
        .app()?
        .map_or_else(|| request.member_id.to_string(), |m| m.label());
    Ok(format!(
        "{}  {}  {} ~ {}  {}  {}  [{}]",
        request.id,
        who,
        request.start_date,
        request.end_date,
        request.leave_type,
        request.reason,
        request.status.label()
    ))
}

impl App {
    /// Opens the data directory named by the configuration.
    pub fn open(config: AppConfig) -> anyhow::Result<Self> {
        let store = FileStore::open(&config.storage.data_dir)
            .app()
            .with_context(|| format!("opening {}", config.storage.data_dir.display()))?;
        let ledger = LeaveLedger::new(LeavePolicy::from_config(&config.leave));
        Ok(Self {
            config,
            store,
            ledger,
        })
    }

    /// Dispatches one subcommand.
    pub async fn run(&mut self, command: Commands) -> anyhow::Result<()> {
        match command {
            Commands::Members(cmd) => self.members(cmd),
            Commands::Mark {
                status,
                members,
                date,
                check_in,
                check_out,
                note,
            } => {
                ensure_single_member(
                    members.len(),
                    note.is_some() || check_in.is_some() || check_out.is_some(),
                )?;
                let date = date.unwrap_or_else(today);
                let now = Local::now().time();
                if let [member] = members.as_slice() {
                    let record = AttendanceService::mark(
                        &mut self.store,
                        AttendanceEntry {
                            member_id: MemberId::new(member.as_str()),
                            date,
                            status: status.into(),
                            note,
                            check_in_time: check_in,
                            check_out_time: check_out,
                        },
                        now,
                    )
                    .app()?;
                    println!("{} {} {}", record.date, record.member_id, record.status.label());
                } else {
                    let ids: Vec<MemberId> = members.iter().map(MemberId::new).collect();
                    let outcome = AttendanceService::mark_batch(
                        &mut self.store,
                        &ids,
                        date,
                        status.into(),
                        now,
                    )
                    .app()?;
                    println!("{} marked", outcome.marked.len());
                    if !outcome.skipped.is_empty() {
                        println!("{} on leave, unchanged", outcome.skipped.len());
                    }
                }
                Ok(())
            }
            Commands::Note { member, text, date } => {
                let date = date.unwrap_or_else(today);
                AttendanceService::update_note(&mut self.store, &MemberId::new(member), date, &text)
                    .app()?;
                Ok(())
            }
            Commands::Time {
                field,
                at,
                members,
                clear,
                date,
            } => {
                let date = date.unwrap_or_else(today);
                let ids: Vec<MemberId> = members.iter().map(MemberId::new).collect();
                if clear {
                    for id in &ids {
                        AttendanceService::update_time(
                            &mut self.store,
                            id,
                            date,
                            field.into(),
                            None,
                        )
                        .app()?;
                    }
                    return Ok(());
                }
                let Some(at) = at else {
                    bail!("a time is required unless --clear is given");
                };
                let outcome =
                    AttendanceService::set_time_batch(&mut self.store, &ids, date, field.into(), at)
                        .app()?;
                println!("{} updated", outcome.marked.len());
                if !outcome.skipped.is_empty() {
                    println!("{} on leave, unchanged", outcome.skipped.len());
                }
                Ok(())
            }
            Commands::Stats { date, status } => self.stats(date.unwrap_or_else(today), status),
            Commands::MemberStats { member } => self.member_stats(&MemberId::new(member)),
            Commands::Leave(cmd) => self.leave(cmd),
            Commands::Balance(cmd) => self.balance(cmd),
            Commands::Export(cmd) => self.export(cmd),
            Commands::Sync { date } => self.sync(date.unwrap_or_else(today)).await,
            Commands::SheetUrl { url, clear } => {
                if clear {
                    self.store.set_sheet_url("").app()?;
                    println!("Spreadsheet URL cleared");
                } else if let Some(url) = url {
                    self.store.set_sheet_url(&url).app()?;
                    println!("Spreadsheet URL saved");
                } else {
                    match self.store.sheet_url().app()?.or_else(|| self.config.sheet.url.clone()) {
                        Some(url) => println!("{url}"),
                        None => println!("(not configured)"),
                    }
                }
                Ok(())
            }
            Commands::Wipe { yes } => {
                if !yes {
                    bail!("refusing to wipe without --yes");
                }
                self.store.clear_all().app()?;
                println!("All data deleted");
                Ok(())
            }
        }
    }

    fn members(&mut self, cmd: MembersCommand) -> anyhow::Result<()> {
        match cmd {
            MembersCommand::List => {
                for m in self.store.members().app()? {
                    println!(
                        "{}\t{}\t{}\t{}\t{}\t{}",
                        m.id,
                        m.name,
                        m.team,
                        m.position,
                        m.work_location.unwrap_or_default(),
                        m.work_place.unwrap_or_default()
                    );
                }
            }
            MembersCommand::Reset => {
                let roster = default_roster();
                let count = roster.len();
                self.store.replace_members(roster).app()?;
                println!("Roster reset ({count} members)");
            }
            MembersCommand::Import { file } => {
                let text = fs::read_to_string(&file)
                    .with_context(|| format!("reading {}", file.display()))?;
                let import = RosterImport::parse(&text, Utc::now().timestamp_millis()).app()?;
                println!("Importing {}", import.preview());
                let count = import.members.len();
                self.store.replace_members(import.members).app()?;
                info!(file = %file.display(), members = count, "Roster imported");
                println!("Roster replaced ({count} members)");
            }
            MembersCommand::Template { out } => write_output(out.as_deref(), &template_csv())?,
        }
        Ok(())
    }

    fn stats(&self, date: NaiveDate, drill: Option<crate::DrillArg>) -> anyhow::Result<()> {
        let members = self.store.members().app()?;
        let records = self.store.attendance(DateFilter::On(date)).app()?;

        if let Some(drill) = drill {
            let status = drill.status();
            for m in ReportService::members_with_status(&members, &records, date, status) {
                println!("{}\t{}", m.id, m.label());
            }
            return Ok(());
        }

        let stats = ReportService::daily_stats(&members, &records, date);
        let requests = self.store.requests().app()?;
        println!("{}", stats.date);
        println!("  출석   {}", stats.present);
        println!("  지각   {}", stats.late);
        println!("  결석   {}", stats.absent);
        println!("  휴가   {}", stats.excused);
        println!("  미체크 {}", stats.pending());
        println!("  {} / {} checked", stats.checked(), stats.total);
        println!(
            "  {} vacation request(s) awaiting approval",
            ReportService::pending_approval_count(&requests)
        );
        Ok(())
    }

    fn member_stats(&self, member_id: &MemberId) -> anyhow::Result<()> {
        let Some(member) = self.store.member(member_id).app()? else {
            bail!("member {member_id} not found");
        };
        let records = self.store.attendance(DateFilter::All).app()?;
        let summary = ReportService::member_summary(member_id, &records);

        println!("{}", member.label());
        for (status, count) in summary.counts {
            println!("  {}\t{count}", status.label());
        }
        for record in summary.records {
            println!(
                "{}\t{}\t{}",
                record.date,
                status_label(Some(record.status)),
                record.note.unwrap_or_default()
            );
        }
        Ok(())
    }

    fn leave(&mut self, cmd: LeaveCommand) -> anyhow::Result<()> {
        match cmd {
            LeaveCommand::Submit {
                member,
                start,
                end,
                leave_type,
                reason,
                force,
            } => {
                let application = LeaveApplication {
                    member_id: MemberId::new(member),
                    start_date: start,
                    end_date: end,
                    leave_type,
                    reason,
                };
                if let Some(warning) = self.ledger.check_balance(&self.store, &application).app()? {
                    if !force {
                        bail!("{warning}; re-run with --force to submit anyway");
                    }
                    println!("warning: {warning}");
                }
                let submission = self.ledger.submit(&mut self.store, application).app()?;
                println!("{}", request_line(&self.store, &submission.request)?);
            }
            LeaveCommand::Approve { id } => {
                let outcome = self
                    .ledger
                    .approve_by_secretary(&mut self.store, parse_id(&id)?)
                    .app()?;
                println!("{}", request_line(&self.store, &outcome.request)?);
            }
            LeaveCommand::Final { id } => {
                let outcome = self.ledger.approve_final(&mut self.store, parse_id(&id)?).app()?;
                println!("{}", request_line(&self.store, &outcome.request)?);
                if let Some(applied) = outcome.applied {
                    println!("  {} day(s) marked on leave", applied.dates.len());
                    if let (Some(days), Some(balance)) = (applied.deducted, applied.balance) {
                        println!(
                            "  deducted {} (remaining {})",
                            days.normalize(),
                            balance.remaining().normalize()
                        );
                    }
                }
            }
            LeaveCommand::Reject { id } => {
                let outcome = self.ledger.reject(&mut self.store, parse_id(&id)?).app()?;
                println!("{}", request_line(&self.store, &outcome.request)?);
            }
            LeaveCommand::List { pending } => {
                let requests = if pending {
                    LeaveLedger::awaiting_approval(&self.store).app()?
                } else {
                    LeaveLedger::requests_newest_first(&self.store).app()?
                };
                for request in &requests {
                    println!("{}", request_line(&self.store, request)?);
                }
            }
        }
        Ok(())
    }

    fn balance(&mut self, cmd: BalanceCommand) -> anyhow::Result<()> {
        match cmd {
            BalanceCommand::List => {
                let members = self.store.members().app()?;
                for balance in self.ledger.balances(&mut self.store).app()? {
                    let Some(member) = members.iter().find(|m| m.id == balance.member_id) else {
                        continue;
                    };
                    println!(
                        "{}\t{}\ttotal {}\tused {}\tremaining {}",
                        member.id,
                        member.label(),
                        balance.total_days.normalize(),
                        balance.used_days.normalize(),
                        balance.remaining().normalize()
                    );
                }
            }
            BalanceCommand::SetTotal { member, days } => {
                let balance =
                    self.ledger
                        .set_total_days(&mut self.store, &MemberId::new(member), days)
                        .app()?;
                println!(
                    "{} total {} remaining {}",
                    balance.member_id,
                    balance.total_days.normalize(),
                    balance.remaining().normalize()
                );
            }
        }
        Ok(())
    }

    fn export(&mut self, cmd: ExportCommand) -> anyhow::Result<()> {
        let members = self.store.members().app()?;
        match cmd {
            ExportCommand::Attendance { tsv, out } => {
                let records = self.store.attendance(DateFilter::All).app()?;
                let csv = attendance_csv(&members, &records);
                let text = if tsv { to_tsv(&csv) } else { csv };
                write_output(out.as_deref(), &text)
            }
            ExportCommand::Balances { out } => {
                let balances = self.ledger.balances(&mut self.store).app()?;
                write_output(out.as_deref(), &balance_csv(&members, &balances))
            }
        }
    }

    async fn sync(&self, date: NaiveDate) -> anyhow::Result<()> {
        let saved = self.store.sheet_url().app()?;
        let client = SheetClient::from_config(saved, &self.config.sheet).app()?;
        let members = self.store.members().app()?;
        let records = self.store.attendance(DateFilter::On(date)).app()?;
        let payload = sheet_payload(&members, &records, date);

        let receipt = client.push(&payload).await.app()?;
        println!("Sent {} row(s) for {date}", receipt.rows);
        Ok(())
    }
}

fn parse_id(raw: &str) -> anyhow::Result<RequestId> {
    raw.trim()
        .parse()
        .with_context(|| format!("invalid request id: {raw}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_details_need_single_member() {
        assert!(ensure_single_member(1, true).is_ok());
        assert!(ensure_single_member(3, false).is_ok());
        let err = ensure_single_member(2, true).unwrap_err();
        assert!(err.to_string().contains("--note"));
    }
}
