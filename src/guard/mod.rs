//! Routing decisions for role-scoped screens.
//!
//! The guard is a pure function of the current [`SessionState`](crate::session::SessionState)
//! and a screen's [`Access`] policy. It is evaluated on every navigation and
//! never cached.

mod access;
mod routes;

pub use access::{evaluate, home_for, landing_path, Access, Verdict};
pub use routes::{navigate, route_for, Route, ROUTES};

pub const LOGIN_PATH: &str = "/login";
pub const SIGNUP_PATH: &str = "/signup";
pub const ADMIN_HOME: &str = "/admin/dashboard";
pub const OWNER_HOME: &str = "/owner/dashboard";
pub const USER_HOME: &str = "/user/dashboard";
