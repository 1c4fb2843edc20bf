//! Candidate assignment submission portal.
//!
//! The [`submission`] module holds the form workflow (validation schema,
//! level loading, remote submission) independent of any transport, and
//! [`pages`] renders it as HTML for the web service.

pub mod config;
pub mod error;
pub mod pages;
pub mod submission;
pub mod telemetry;
