//! Alphin: gamified financial-literacy pages for three age cohorts.
//!
//! The logic lives in plain state structs: mission gating and points in
//! [`learning`], the simulated trading ledger in [`execution`], and one
//! session per page in [`pages`]. AI features sit behind [`ai::AiService`].

pub mod advisory;
pub mod ai;
pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod execution;
pub mod learning;
pub mod pages;

pub use app::{App, Page, Route};
pub use error::{AlphinError, AlphinResult};
