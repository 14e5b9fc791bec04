//! Driftwood Core - Shared types library.
//!
//! This crate provides common types used across all Driftwood components:
//! - `storefront` - Public-facing e-commerce API
//! - `admin` - Internal administration API
//! - `cli` - Command-line tools for seeding and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no session handling. This keeps it lightweight and allows it to
//! be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and statuses
//! - [`pricing`] - Discount and final-price resolution
//! - [`catalog`] - Product, variant, and image records
//! - [`filter`] - In-memory product filtering and sorting
//! - [`orders`] - Order and line-item records
//! - [`users`] - Customer/staff user records
//! - [`blog`] - Blog post records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod blog;
pub mod catalog;
pub mod filter;
pub mod orders;
pub mod pricing;
pub mod types;
pub mod users;

pub use types::*;
