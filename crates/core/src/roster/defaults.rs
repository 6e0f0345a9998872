//! Built-in roster.
//!
//! Used when the member collection is empty and when the operator resets the
//! roster. Every entry gets the `이용인` position and a sequential `mem-N` id.

use attendo_shared::types::MemberId;

use super::types::Member;

/// Position assigned to every built-in roster entry.
pub const DEFAULT_POSITION: &str = "이용인";

/// (name, team, work location, work place)
const ROSTER: &[(&str, &str, &str, &str)] = &[
    ("강구은", "근로팀", "재가", "1층"),
    ("김인숙", "근로팀", "재가", "1층"),
    ("김반석", "근로팀", "재가", "1층"),
    ("김지은", "근로팀", "재가", "1층"),
    ("김혜경", "근로팀", "재가", "1층"),
    ("김혜영", "근로팀", "재가", "1층"),
    ("박훈연", "근로팀", "재가", "2층"),
    ("변현진", "근로팀", "시설", "1층"),
    ("서정덕", "근로팀", "재가", "1층"),
    ("심경석", "근로팀", "재가", "1층"),
    ("원종미", "근로팀", "재가", "1층"),
    ("유현종", "근로팀", "재가", "1층"),
    ("이관종", "근로팀", "시설", "2층"),
    ("이대형", "근로팀", "재가", "1층"),
    ("이연옥", "근로팀", "재가", "1층"),
    ("전상일", "근로팀", "시설", "2층"),
    ("정성진", "근로팀", "재가", "1층"),
    ("최종욱", "근로팀", "시설", "1층"),
    ("최희숙", "근로팀", "재가", "2층"),
    ("강병수", "훈련팀", "시설", "2층"),
    ("공순옥", "훈련팀", "시설", "2층"),
    ("김재영", "훈련팀", "시설", "2층"),
    ("박윤미", "훈련팀", "시설", "2층"),
    ("박은해", "훈련팀", "재가", "1층"),
    ("박제철", "훈련팀", "시설", "2층"),
    ("서기동", "훈련팀", "시설", "2층"),
    ("서명신", "훈련팀", "시설", "2층"),
    ("심운보", "훈련팀", "시설", "2층"),
    ("유정현", "훈련팀", "시설", "2층"),
    ("윤인숙", "훈련팀", "재가", "1층"),
    ("이기월", "훈련팀", "재가", "1층"),
    ("임수환", "훈련팀", "시설", "2층"),
    ("정순옥", "훈련팀", "재가", "2층"),
    ("조선일", "훈련팀", "시설", "2층"),
    ("채유미", "훈련팀", "시설", "2층"),
    ("홍종수", "훈련팀", "시설", "2층"),
    ("홍지만", "훈련팀", "시설", "2층"),
    ("황인선", "훈련팀", "재가", "1층"),
    ("문지원", "일자리팀", "시설", "1층"),
    ("최혜미", "일자리팀", "재가", "1층"),
];

/// Builds the built-in roster.
#[must_use]
pub fn default_roster() -> Vec<Member> {
    ROSTER
        .iter()
        .enumerate()
        .map(|(index, (name, team, location, place))| Member {
            id: MemberId::new(format!("mem-{}", index + 1)),
            name: (*name).to_string(),
            team: (*team).to_string(),
            position: DEFAULT_POSITION.to_string(),
            work_location: Some((*location).to_string()),
            work_place: Some((*place).to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_roster_ids_are_sequential_and_unique() {
        let roster = default_roster();
        assert_eq!(roster.len(), 40);
        assert_eq!(roster[0].id.as_str(), "mem-1");
        assert_eq!(roster[39].id.as_str(), "mem-40");
        let ids: HashSet<_> = roster.iter().map(|m| m.id.clone()).collect();
        assert_eq!(ids.len(), roster.len());
    }

    #[test]
    fn test_default_roster_positions() {
        assert!(default_roster().iter().all(|m| m.position == DEFAULT_POSITION));
    }
}
