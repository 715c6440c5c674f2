//! Shift Scheduling Engine for Colombian Workforce Planning
//!
//! This crate validates proposed weekly schedules against labor-law and
//! business rules, computes schedule metrics, gates every action through a
//! role-based permission model, and routes team requests through a
//! supervisor and business-admin approval workflow with escalation.

#![warn(missing_docs)]

pub mod api;
pub mod approval;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod permissions;
pub mod query;
pub mod validation;
