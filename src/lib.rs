//! Fieldrunner: a player marker moved around a rugby pitch by keyboard or gamepad.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

#[cfg_attr(coverage_nightly, coverage(off))]
pub mod app;
#[cfg_attr(coverage_nightly, coverage(off))]
pub mod formatter;
#[cfg_attr(coverage_nightly, coverage(off))]
pub mod platform;

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod field;
pub mod game;
pub mod scheduler;
pub mod systems;
