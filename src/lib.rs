//! # Wedding Planner Library
//!
//! Multi-tenant backend for wedding websites: couples manage events,
//! households and RSVP questions, and guests answer through a public
//! RSVP wizard.

pub mod application;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod server;
pub mod services;
pub mod telemetry;
pub use migration;
