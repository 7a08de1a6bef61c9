//! Café Payroll Engine
//!
//! This crate computes shift-based payroll for a coffee shop: a revenue-tiered
//! bonus on top of a flat or hourly base, folded into half-month and month
//! totals per employee. It also carries the surrounding back-office read
//! models (sales analytics, technical cards) and the invoice intake pipeline.

#![warn(missing_docs)]

pub mod analytics;
pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod invoice;
pub mod models;
pub mod schedule;
pub mod techcard;
