//! Test helpers module
//!
//! Mock content API plus an in-process application context for driving
//! routes without binding a socket.

#![allow(dead_code)]

pub mod mock_api;
pub mod test_context;

pub use mock_api::*;
pub use test_context::*;
