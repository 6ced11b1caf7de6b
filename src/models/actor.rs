//! Actors and roles for the scope policy gate.

use serde::{Deserialize, Serialize};

/// Closed set of actor roles.
///
/// The legacy data carries two-letter role codes; `from_code` is the only
/// place those strings are interpreted, so call sites match on the enum
/// rather than comparing strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Global administrator ("AD"): unrestricted scope.
    Admin,
    /// Organization-level representative ("CR"): scoped to one organization.
    OrgRep,
    /// Department-level representative ("DR"): scoped to one department.
    DeptRep,
    /// Staff ("ST"): scoped to one department.
    Staff,
}

impl Role {
    /// Parse a legacy role code, case-insensitively.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "AD" => Some(Self::Admin),
            "CR" => Some(Self::OrgRep),
            "DR" => Some(Self::DeptRep),
            "ST" => Some(Self::Staff),
            _ => None,
        }
    }

    /// The legacy two-letter code for this role.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Admin => "AD",
            Self::OrgRep => "CR",
            Self::DeptRep => "DR",
            Self::Staff => "ST",
        }
    }
}

/// An authenticated actor as known to the directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub username: String,
    pub role: Role,
    pub department_id: Option<i64>,
    pub organization_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::Role;

    #[test]
    fn test_role_from_code_case_insensitive() {
        assert_eq!(Role::from_code("ad"), Some(Role::Admin));
        assert_eq!(Role::from_code("Cr"), Some(Role::OrgRep));
        assert_eq!(Role::from_code("DR"), Some(Role::DeptRep));
        assert_eq!(Role::from_code("st"), Some(Role::Staff));
        assert_eq!(Role::from_code("XX"), None);
    }

    #[test]
    fn test_role_code_round_trip() {
        for role in [Role::Admin, Role::OrgRep, Role::DeptRep, Role::Staff] {
            assert_eq!(Role::from_code(role.code()), Some(role));
        }
    }
}
