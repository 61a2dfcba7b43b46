//! Strategic planning documents: SWOT analysis, strategic options, balanced
//! scorecard objectives with KPIs, and action plans, persisted as one JSON
//! blob per data directory.

pub mod config;
pub mod connectivity;
pub mod db;
pub mod entities;
pub mod error;
pub mod id;
pub mod logging;
pub mod model;
pub mod repository;
pub mod sample;
pub mod store;
pub mod util;
