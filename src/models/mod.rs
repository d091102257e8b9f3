pub mod claims;
pub mod role;

pub use claims::Claims;
pub use role::Role;
