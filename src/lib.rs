//! Analytics core for an ETF dashboard: holdings overlap, momentum scoring,
//! return correlation, expense-ratio projection and price-series rebasing.
//!
//! Everything under [`analytics`] is pure and total. [`dispatch`] validates
//! JSON requests and routes them to the analytics functions; [`batch`] runs
//! many requests concurrently.

pub mod analytics;
pub mod batch;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod state;
