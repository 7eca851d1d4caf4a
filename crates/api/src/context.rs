use naycourse_auth::Role;
use naycourse_core::UserId;

/// Authenticated identity for a request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AuthContext {
    user_id: UserId,
    role: Role,
}

impl AuthContext {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Whether this identity may act on `owner`'s records.
    pub fn can_act_for(&self, owner: UserId) -> bool {
        self.role.is_elevated() || self.user_id == owner
    }
}

/// Identity for routes that accept both guests and authenticated callers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MaybeAuth(pub Option<AuthContext>);
