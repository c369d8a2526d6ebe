//! services/perfect_day/src/lib.rs
//!
//! Shared library for the `perfectday-api` server and the `perfect-day`
//! terminal client.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod error;
pub mod web;
