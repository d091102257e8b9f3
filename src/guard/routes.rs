use super::access::{evaluate, Access, Verdict};
use super::{ADMIN_HOME, LOGIN_PATH, OWNER_HOME, SIGNUP_PATH, USER_HOME};
use crate::models::Role;
use crate::session::SessionState;

/// A screen and the roles permitted to view it. Declared once, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub access: Access,
}

pub static ROUTES: &[Route] = &[
    Route {
        path: LOGIN_PATH,
        access: Access::Public,
    },
    Route {
        path: SIGNUP_PATH,
        access: Access::Public,
    },
    Route {
        path: ADMIN_HOME,
        access: Access::Roles(&[Role::Admin]),
    },
    Route {
        path: OWNER_HOME,
        access: Access::Roles(&[Role::Owner]),
    },
    Route {
        path: USER_HOME,
        access: Access::Roles(&[Role::User]),
    },
];

/// Looks up the screen registered at `path`. A trailing slash is ignored.
pub fn route_for(path: &str) -> Option<&'static Route> {
    let path = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };
    ROUTES.iter().find(|route| route.path == path)
}

/// Resolves a navigation to `path` against the route table.
///
/// The root path sends everyone to the login screen.
pub fn navigate(state: &SessionState, path: &str) -> Verdict {
    if state.is_loading() {
        return Verdict::Pending;
    }
    if path.trim_end_matches('/').is_empty() {
        return Verdict::Redirect(LOGIN_PATH);
    }
    match route_for(path) {
        Some(route) => evaluate(state, &route.access),
        None => Verdict::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Claims;
    use crate::session::Session;
    use std::collections::HashMap;

    fn owner() -> SessionState {
        SessionState::Authenticated(Session {
            token: "t".to_string(),
            claims: Claims {
                id: "3".to_string(),
                role: "owner".to_string(),
                iat: 0,
                exp: i64::MAX,
                name: Some("Olive Owner".to_string()),
                email: None,
                extra: HashMap::new(),
            },
        })
    }

    #[test]
    fn every_dashboard_is_role_scoped() {
        for path in [ADMIN_HOME, OWNER_HOME, USER_HOME] {
            let route = route_for(path).expect("dashboard is registered");
            assert!(matches!(route.access, Access::Roles(roles) if roles.len() == 1));
        }
    }

    #[test]
    fn root_redirects_to_login() {
        assert_eq!(navigate(&SessionState::Anonymous, "/"), Verdict::Redirect(LOGIN_PATH));
        assert_eq!(navigate(&owner(), ""), Verdict::Redirect(LOGIN_PATH));
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(navigate(&owner(), "/stores/42"), Verdict::NotFound);
    }

    #[test]
    fn everything_waits_for_restore() {
        for path in ["/", LOGIN_PATH, USER_HOME, "/nowhere"] {
            assert_eq!(navigate(&SessionState::Loading, path), Verdict::Pending);
        }
    }

    #[test]
    fn owner_walkthrough() {
        let state = owner();
        assert_eq!(navigate(&state, OWNER_HOME), Verdict::Render);
        assert_eq!(navigate(&state, "/owner/dashboard/"), Verdict::Render);
        assert_eq!(navigate(&state, ADMIN_HOME), Verdict::Redirect(OWNER_HOME));
        assert_eq!(navigate(&state, USER_HOME), Verdict::Redirect(OWNER_HOME));
        assert_eq!(navigate(&state, LOGIN_PATH), Verdict::Render);
    }

    #[test]
    fn anonymous_walkthrough() {
        let state = SessionState::Anonymous;
        assert_eq!(navigate(&state, SIGNUP_PATH), Verdict::Render);
        assert_eq!(navigate(&state, ADMIN_HOME), Verdict::Redirect(LOGIN_PATH));
    }
}
