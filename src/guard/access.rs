use super::{ADMIN_HOME, LOGIN_PATH, OWNER_HOME, USER_HOME};
use crate::models::{Claims, Role};
use crate::session::SessionState;

/// Who may view a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone, logged in or not.
    Public,
    /// Only sessions whose role is in the set.
    Roles(&'static [Role]),
}

impl Access {
    fn permits(&self, role: Option<Role>) -> bool {
        match self {
            Access::Public => true,
            Access::Roles(allowed) => role.map_or(false, |r| allowed.contains(&r)),
        }
    }
}

/// What the navigation layer should do with a requested screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The session is still being restored; render nothing but the guard.
    Pending,
    /// Send the user to another path.
    Redirect(&'static str),
    Render,
    /// No screen is registered at the requested path.
    NotFound,
}

/// Home screen for each role. Unknown roles have none.
pub fn home_for(role: Option<Role>) -> Option<&'static str> {
    match role? {
        Role::Admin => Some(ADMIN_HOME),
        Role::Owner => Some(OWNER_HOME),
        Role::User => Some(USER_HOME),
    }
}

/// Decides whether a protected screen may render for `state`.
///
/// Checked in order: still loading, then no session, then role membership.
/// A role mismatch sends the session to its own home, or to the login
/// screen when its role has no home.
pub fn evaluate(state: &SessionState, access: &Access) -> Verdict {
    let session = match state {
        SessionState::Loading => return Verdict::Pending,
        SessionState::Anonymous => {
            return match access {
                Access::Public => Verdict::Render,
                _ => Verdict::Redirect(LOGIN_PATH),
            }
        }
        SessionState::Authenticated(session) => session,
    };

    let role = session.role();
    if !access.permits(role) {
        return Verdict::Redirect(home_for(role).unwrap_or(LOGIN_PATH));
    }
    Verdict::Render
}

/// Where the login screen sends a freshly logged-in user.
///
/// Anything that is not an admin or an owner lands on the user dashboard,
/// whose guard then deals with unknown roles.
pub fn landing_path(claims: &Claims) -> &'static str {
    match claims.role() {
        Some(Role::Admin) => ADMIN_HOME,
        Some(Role::Owner) => OWNER_HOME,
        _ => USER_HOME,
    }
}
