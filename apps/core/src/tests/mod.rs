//! Test Module
//!
//! Cross-module test suite for the Atende backend brain.
//!
//! ## Test Categories
//! - `brain_tests`: full-pipeline analysis scenarios
//! - `database_tests`: tenant vocabulary and pending-word persistence
//! - `integration_tests`: request handling through the service layer
