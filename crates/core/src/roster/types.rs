//! Roster member record.

use attendo_shared::types::MemberId;
use serde::{Deserialize, Serialize};

/// A person on the attendance roster.
///
/// Members are immutable reference data: they are created by roster reset or
/// import and are never changed by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Roster identifier.
    pub id: MemberId,
    /// Display name.
    pub name: String,
    /// Team, e.g. `근로팀`.
    pub team: String,
    /// Position, e.g. `이용인`.
    pub position: String,
    /// Service type, e.g. `시설` or `재가`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_location: Option<String>,
    /// Floor or site, e.g. `1층`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_place: Option<String>,
}

impl Member {
    /// Human-readable label: `name (team)`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.team)
    }
}

/// Finds a member by id.
#[must_use]
pub fn find_member<'a>(members: &'a [Member], id: &MemberId) -> Option<&'a Member> {
    members.iter().find(|m| &m.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member() -> Member {
        Member {
            id: MemberId::from("mem-1"),
            name: "강구은".to_string(),
            team: "근로팀".to_string(),
            position: "이용인".to_string(),
            work_location: Some("재가".to_string()),
            work_place: None,
        }
    }

    #[test]
    fn test_label() {
        assert_eq!(member().label(), "강구은 (근로팀)");
    }

    #[test]
    fn test_serialized_shape_is_camel_case() {
        let json = serde_json::to_value(member()).unwrap();
        assert_eq!(json["id"], "mem-1");
        assert_eq!(json["workLocation"], "재가");
        assert!(json.get("workPlace").is_none());
    }

    #[test]
    fn test_find_member() {
        let members = vec![member()];
        assert!(find_member(&members, &MemberId::from("mem-1")).is_some());
        assert!(find_member(&members, &MemberId::from("mem-2")).is_none());
    }
}
