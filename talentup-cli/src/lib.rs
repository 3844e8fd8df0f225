// Library exports for the TalentUp CLI
// This allows testing of internal modules

pub mod api;
pub mod auth;
pub mod commands;
pub mod config;
pub mod locale;
pub mod models;
pub mod routes;
pub mod services;
pub mod storage;
pub mod ui;
