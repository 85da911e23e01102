//! # Atlas Audit CLI Library
//!
//! Core library modules for the atlas-audit command-line tool: the audit
//! pipelines, their report sinks, and the command definitions.

pub mod audit;
pub mod cli;
pub mod clients;
pub mod consts;
pub mod report;
