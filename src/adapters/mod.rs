// Adapters layer: concrete implementations of the domain ports for external systems.

pub mod mqtt;
pub mod terminal;

pub use mqtt::MqttPublisher;
pub use terminal::TerminalKeys;
