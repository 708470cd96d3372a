//! Ownership checks shared by the order and review services.

use crate::model::{Principal, UserId};

/// Decides whether a principal may act on a resource owned by `owner`.
pub trait Authorizer: Send + Sync {
    fn allows(&self, principal: &Principal, owner: &UserId) -> bool;
}

/// The owner of a resource, or any admin.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnerOrAdmin;

impl Authorizer for OwnerOrAdmin {
    fn allows(&self, principal: &Principal, owner: &UserId) -> bool {
        principal.is_admin() || principal.id == *owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_or_admin() {
        let auth = OwnerOrAdmin;
        assert!(auth.allows(&Principal::user(1), &UserId(1)));
        assert!(!auth.allows(&Principal::user(2), &UserId(1)));
        assert!(auth.allows(&Principal::admin(9), &UserId(1)));
    }
}
