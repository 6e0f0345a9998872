//! Collection keys. Each key maps to `<data_dir>/<key>.json`.

/// Roster.
pub const MEMBERS: &str = "attendance_app_members";
/// Attendance records.
pub const RECORDS: &str = "attendance_app_records";
/// Vacation requests.
pub const VACATIONS: &str = "attendance_app_vacations";
/// Leave balances.
pub const BALANCES: &str = "attendance_app_vacation_balances";
/// Spreadsheet webhook URL.
pub const SHEET_URL: &str = "attendance_app_sheet_url";

/// Every key, in wipe order.
pub const ALL: [&str; 5] = [MEMBERS, RECORDS, VACATIONS, BALANCES, SHEET_URL];
