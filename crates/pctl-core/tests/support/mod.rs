//! Helpers shared by the integration tests.

#![allow(dead_code)]

pub mod git;
pub mod http;
