//! # Herald demo
//!
//! An order desk that embeds [`herald_events::EventHub`] and drives a small
//! workflow through namespaced, compound and one-shot events. The `herald`
//! binary loads [`config::DemoConfig`], initializes logging and runs
//! [`workflow::run`].

pub mod config;
pub mod workflow;

pub use crate::config::{ConfigError, DemoConfig, WorkflowConfig, load_config};
pub use crate::workflow::{Order, OrderDesk, WorkflowReport, run};
