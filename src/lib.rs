//! LazyHub - a terminal issue browser for GitHub repositories.
//!
//! The browser pages through a repository's issues, filters them by text and
//! a pull-request toggle, lets the user mark issues as fixed and hands the
//! fixed ones back when it closes.

pub mod api;
pub mod app;
pub mod cli;
pub mod collection;
pub mod config;
pub mod dialog;
pub mod error;
pub mod events;
pub mod fetch;
pub mod filter;
pub mod logging;
pub mod tasks;
pub mod tui;
pub mod ui;
pub mod update;
