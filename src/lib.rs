pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{MqttPublisher, TerminalKeys};
pub use config::CliConfig;
pub use crate::core::{controller::Controller, dispatch::dispatch};
pub use domain::model::{Action, Command, Session, Settings, StopReason, COMMAND_TOPIC};
pub use domain::ports::{KeySource, Publisher};
pub use utils::error::{ControllerError, Result};
