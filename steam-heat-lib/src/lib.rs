#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for steam-heat
//!
//! This library builds a ranked catalog of popular Steam games. It pages through
//! a bulk listing, enriches each game with its average achievement completion,
//! derives per-game metrics, and ranks the catalog by a weighted heat score.
//!
//! # Module Organization
//!
//! - [`catalog`]: Listing and achievement providers, raw coercion, and per-game metrics
//! - [`ranking`]: Normalization, heat scoring, and ranks
//! - [`reports`]: Report generation in multiple formats
//! - [`config`]: Run configuration
//! - [`commands`]: Command-line interface and orchestration

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod catalog;
pub mod config;
pub mod ranking;
pub mod reports;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

pub use crate::commands::{Host, run};
