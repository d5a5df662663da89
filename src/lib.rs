//! ASGRC Catalog - organization catalog and risk-governance backend.
//!
//! This crate exposes the hierarchical organizational model
//! (macroprocesses, processes, subprocesses) over HTTP, with derived
//! hierarchy, statistics, and dashboard views backed by PostgreSQL.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
