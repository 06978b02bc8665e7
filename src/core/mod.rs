pub mod controller;
pub mod dispatch;

pub use crate::domain::model::{Action, Command, Session, StopReason};
pub use crate::domain::ports::{KeySource, Publisher};
pub use crate::utils::error::Result;
