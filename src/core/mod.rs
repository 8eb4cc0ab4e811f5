//! Core domain models
//!
//! This module defines the crew definition, the ordered stage list built
//! from it, execution state, and runtime settings.

pub mod config;
pub mod pipeline;
pub mod settings;
pub mod stage;
pub mod state;

pub use config::{AgentDescriptor, CrewConfig, TaskDescriptor};
pub use pipeline::*;
pub use settings::{Settings, SettingsError};
pub use stage::*;
pub use state::*;
