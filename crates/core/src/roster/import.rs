//! Roster CSV import.
//!
//! Expected layout: a header line `이름,부서,직급,이용구분,상세장소`, then one
//! member per line. Quotes are stripped, cells are trimmed, and blank lines are
//! ignored. Rows with fewer than two cells or an empty name are skipped.

use attendo_shared::types::MemberId;

use super::error::RosterError;
use super::types::Member;

const UNASSIGNED_TEAM: &str = "미배정";
const DEFAULT_IMPORT_POSITION: &str = "사원";
const PREVIEW_LEN: usize = 3;

/// Header row shared by the import parser and the template.
pub const ROSTER_HEADER: &str = "이름,부서,직급,이용구분,상세장소";

/// A parsed roster file, ready to replace the current roster.
#[derive(Debug, Clone)]
pub struct RosterImport {
    /// Members parsed from the file, in file order.
    pub members: Vec<Member>,
}

impl RosterImport {
    /// Parses roster CSV text.
    ///
    /// `stamp` (milliseconds) seeds the generated ids: `mem-imp-<stamp>-<row>`.
    pub fn parse(text: &str, stamp: i64) -> Result<Self, RosterError> {
        let rows: Vec<&str> = text
            .split(['\r', '\n'])
            .filter(|row| !row.trim().is_empty())
            .collect();

        if rows.len() < 2 {
            return Err(RosterError::MissingRows);
        }

        let members: Vec<Member> = rows
            .iter()
            .enumerate()
            .skip(1)
            .filter_map(|(index, row)| parse_row(row, stamp, index))
            .collect();

        if members.is_empty() {
            return Err(RosterError::Empty);
        }

        Ok(Self { members })
    }

    /// Short confirmation text: the first few names plus a remainder count.
    #[must_use]
    pub fn preview(&self) -> String {
        let names: Vec<&str> = self
            .members
            .iter()
            .take(PREVIEW_LEN)
            .map(|m| m.name.as_str())
            .collect();
        let mut preview = names.join(", ");
        if self.members.len() > PREVIEW_LEN {
            preview.push_str(&format!(" 외 {}명", self.members.len() - PREVIEW_LEN));
        }
        preview
    }
}

fn parse_row(row: &str, stamp: i64, index: usize) -> Option<Member> {
    let clean = row.replace('"', "");
    let cols: Vec<&str> = clean.split(',').map(str::trim).collect();

    if cols.len() < 2 || cols[0].is_empty() {
        return None;
    }

    let cell = |i: usize| cols.get(i).copied().filter(|c| !c.is_empty());

    Some(Member {
        id: MemberId::new(format!("mem-imp-{stamp}-{index}")),
        name: cols[0].to_string(),
        team: cell(1).unwrap_or(UNASSIGNED_TEAM).to_string(),
        position: cell(2).unwrap_or(DEFAULT_IMPORT_POSITION).to_string(),
        work_location: cell(3).map(str::to_string),
        work_place: cell(4).map(str::to_string),
    })
}

/// Downloadable roster template with a few sample rows.
#[must_use]
pub fn template_csv() -> String {
    let mut csv = String::from("\u{FEFF}");
    csv.push_str(ROSTER_HEADER);
    csv.push('\n');
    csv.push_str("홍길동,영업팀,사원,시설,1층\n");
    csv.push_str("김철수,개발팀,팀장,시설,2층\n");
    csv.push_str("이영희,관리팀,대리,재가,1층\n");
    csv
}
