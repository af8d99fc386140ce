//! Headcount analytics and projection engine.
//!
//! Turns roster and batch-schedule data into present-day headcount
//! breakdowns per process and a 90-day forward staffing curve, then
//! rolls processes up to line-of-business and organization scope.

pub mod analytics;
pub mod clock;
pub mod config;
pub mod demo;
pub mod domain;
pub mod error;
pub mod event;
pub mod gateway;
pub mod projection;
pub mod rng;
pub mod rollup;
pub mod snapshot;
pub mod store;
pub mod types;
