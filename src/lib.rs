//! Vacation accounting and leave request service.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod docs;
pub mod engine;
pub mod error;
pub mod holidays;
pub mod model;
pub mod models;
pub mod routes;
pub mod store;
