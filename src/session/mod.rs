//! The process-wide authentication state and its only writer.
//!
//! [`SessionStore`] mutates; everything else reads through a [`SessionHandle`].

mod state;
mod store;

pub use state::{Session, SessionHandle, SessionState};
pub use store::SessionStore;
