pub mod base;
pub mod http_api;

pub use base::{AuthApi, LoginError};
pub use http_api::HttpAuthApi;
