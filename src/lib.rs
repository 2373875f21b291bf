//! Construction site dashboard service
//!
//! This crate tracks construction sites, material stock, expenses and
//! vehicles for any number of isolated tenants, and serves them over a
//! JSON HTTP API behind a demo sign-in.

#![warn(missing_docs)]

pub mod analytics;
pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod validation;
