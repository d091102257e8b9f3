//! Library exports for shopgate, shared between the binary and tests.

pub mod api;
pub mod cli;
pub mod config;
pub mod guard;
pub mod models;
pub mod session;
pub mod startup;
pub mod storage;
pub mod token;
pub mod utils;
