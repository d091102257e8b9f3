//! Reading and validating session tokens.
//!
//! This crate never mints tokens; it only decodes what the remote API issued.

mod decoder;

pub use decoder::{Clock, SystemClock, TokenDecoder, TokenError};
