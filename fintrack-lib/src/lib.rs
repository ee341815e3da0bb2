#[macro_use]
extern crate actix_web;

pub mod auth;
pub mod config;
mod error;
pub mod tracing;
pub mod transaction;
pub mod user;
