use std::fmt;
use std::time::Duration;

/// The only topic commands are published to.
pub const COMMAND_TOPIC: &str = "input";

/// A steering command understood by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    StartStop,
    Up,
    Down,
    Left,
    Right,
}

impl Command {
    pub const ALL: [Command; 5] = [
        Command::StartStop,
        Command::Up,
        Command::Down,
        Command::Left,
        Command::Right,
    ];

    /// Wire payload, compared by plain text equality on the device side.
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::StartStop => "startstop",
            Command::Up => "up",
            Command::Down => "down",
            Command::Left => "left",
            Command::Right => "right",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the controller does with a single key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Publish(Command),
    Terminate,
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The user pressed a terminate key.
    TerminateKey,
    /// The key source closed (e.g. stdin hit EOF).
    InputClosed,
}

/// Summary of one controller run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub published: usize,
    pub ignored: usize,
    pub stop_reason: StopReason,
}

/// Resolved connection settings, after defaults, file and flags are layered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub broker_url: String,
    pub keep_alive_secs: u64,
    pub username: String,
    pub password: String,
    pub client_id: String,
    pub disconnect_grace_ms: u64,
}

impl Settings {
    pub fn keep_alive(&self) -> Duration {
        Duration::from_secs(self.keep_alive_secs)
    }

    pub fn disconnect_grace(&self) -> Duration {
        Duration::from_millis(self.disconnect_grace_ms)
    }
}

/// Host, port and transport parsed from a broker URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerAddress {
    pub host: String,
    pub port: u16,
    pub tls: bool,
}
