//! Ownership-based authorization shared by every mutation path.

use std::fmt;

use uuid::Uuid;

use crate::domain::Principal;
use crate::error::DomainError;

/// What the principal is attempting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
    Delete,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        self == Decision::Allow
    }

    pub fn into_result(self) -> Result<(), DomainError> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny => Err(DomainError::Forbidden),
        }
    }
}

/// Administrators may do anything; everyone else only touches what they own.
///
/// `owner` is `None` for entities nobody owns, which makes them admin-only.
pub fn authorize(principal: &Principal, owner: Option<Uuid>, action: Action) -> Decision {
    if principal.is_admin() || owner == Some(principal.id) {
        return Decision::Allow;
    }

    tracing::warn!(
        principal = %principal.id,
        role = %principal.role,
        owner = ?owner,
        %action,
        "Authorization denied"
    );
    Decision::Deny
}

/// Shorthand for actions reserved to administrators.
pub fn require_admin(principal: &Principal, action: Action) -> Result<(), DomainError> {
    authorize(principal, None, action).into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    fn user() -> Principal {
        Principal::new(Uuid::new_v4(), Role::User)
    }

    fn admin() -> Principal {
        Principal::new(Uuid::new_v4(), Role::Admin)
    }

    #[test]
    fn owner_is_allowed() {
        let caller = user();
        for action in [Action::Update, Action::Delete] {
            assert_eq!(authorize(&caller, Some(caller.id), action), Decision::Allow);
        }
    }

    #[test]
    fn other_users_are_denied() {
        let caller = user();
        let decision = authorize(&caller, Some(Uuid::new_v4()), Action::Update);
        assert_eq!(decision, Decision::Deny);
        assert!(matches!(decision.into_result(), Err(DomainError::Forbidden)));
    }

    #[test]
    fn admin_is_allowed_regardless_of_owner() {
        let caller = admin();
        assert!(authorize(&caller, Some(Uuid::new_v4()), Action::Delete).is_allowed());
        assert!(authorize(&caller, None, Action::Update).is_allowed());
    }

    #[test]
    fn unowned_entities_are_admin_only() {
        assert!(!authorize(&user(), None, Action::Update).is_allowed());
        assert!(require_admin(&user(), Action::Create).is_err());
        assert!(require_admin(&admin(), Action::Create).is_ok());
    }
}
