//! `benchview` - presentation tooling for data-structure benchmark results.
//!
//! The harness writes three kinds of results (single-size benchmark rows,
//! multi-size series, crossover points) as JSON and CSV. This crate reads
//! them, recognizes which kind it is looking at, and renders tables,
//! summaries, SVG charts and schema-validation verdicts.
//!
//! Pipeline: [`reader`] -> [`classify`] -> [`render`] / [`aggregate`] ->
//! [`scale`] -> [`chart`]. [`validate`] runs off the classifier alone.

#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregate;
pub mod chart;
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod guard;
pub mod logging;
pub mod model;
pub mod output;
pub mod reader;
pub mod render;
pub mod scale;
pub mod validate;

pub use error::{ErrorCode, ReportError, Result, StructuredError};
