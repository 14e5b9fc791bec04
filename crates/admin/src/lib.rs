//! Driftwood Admin library.
//!
//! This crate provides the admin dashboard API as a library, allowing it to
//! be tested and reused.
//!
//! # Security
//!
//! Every route except login re-reads the caller's role and active flag from
//! the `users` collection before acting. A stale session cannot outlive a
//! role change or an account deactivation.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
