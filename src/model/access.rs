/// Role an actor acts in, as carried by the session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserRole {
    Admin,
    Instructor,
    Learner,
}

impl From<&str> for UserRole {
    fn from(value: &str) -> Self {
        match value {
            "admin" => Self::Admin,
            "instructor" => Self::Instructor,
            _ => Self::Learner,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Learner => write!(f, "learner"),
            Self::Instructor => write!(f, "instructor"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// Roles allowed to author modules.
pub const EDITOR_ROLES: &[UserRole] = &[UserRole::Admin, UserRole::Instructor];

/// Capability check for the current actor.
pub trait Authorizer {
    /// True when the actor holds any of `roles`.
    fn has_any_role(&self, roles: &[UserRole]) -> bool;

    fn can_edit(&self) -> bool {
        self.has_any_role(EDITOR_ROLES)
    }
}

/// Fixed set of roles, useful outside of a request.
#[derive(Debug, Clone, Default)]
pub struct StaticRoles(Vec<UserRole>);

impl StaticRoles {
    pub fn new(roles: Vec<UserRole>) -> Self {
        Self(roles)
    }
}

impl Authorizer for StaticRoles {
    fn has_any_role(&self, roles: &[UserRole]) -> bool {
        self.0.iter().any(|role| roles.contains(role))
    }
}
