use crate::core::dispatch::dispatch;
use crate::core::{Action, KeySource, Publisher, Result, Session, StopReason};
use crate::domain::model::COMMAND_TOPIC;

/// Drives the key → publish loop. Owns both collaborators; nothing is global.
pub struct Controller<P: Publisher, K: KeySource> {
    publisher: P,
    keys: K,
}

impl<P: Publisher, K: KeySource> Controller<P, K> {
    pub fn new(publisher: P, keys: K) -> Self {
        Self { publisher, keys }
    }

    /// Runs until a terminate key or the end of input, then disconnects once.
    ///
    /// Publish failures are logged and otherwise ignored. A failure to read
    /// the next key still disconnects before the error is returned.
    /// Everything here logs at debug or below: the terminal is in raw mode.
    pub async fn run(&mut self) -> Result<Session> {
        let mut published = 0;
        let mut ignored = 0;

        let stop_reason = loop {
            let key = match self.keys.next_key().await {
                Ok(Some(key)) => key,
                Ok(None) => break StopReason::InputClosed,
                Err(e) => {
                    tracing::debug!("Reading keyboard input failed: {}", e);
                    self.disconnect().await;
                    return Err(e);
                }
            };

            match dispatch(&key) {
                Action::Publish(command) => {
                    tracing::debug!("📤 {} -> {}", command, COMMAND_TOPIC);
                    if let Err(e) = self.publisher.publish(COMMAND_TOPIC, command.as_str()).await {
                        tracing::debug!("Publish of '{}' not delivered: {}", command, e);
                    }
                    published += 1;
                }
                Action::Terminate => break StopReason::TerminateKey,
                Action::Ignore => {
                    tracing::trace!("Ignoring key {:?}", key.code);
                    ignored += 1;
                }
            }
        };

        tracing::debug!("Stopping ({:?}) after {} command(s)", stop_reason, published);
        self.disconnect().await;

        Ok(Session {
            published,
            ignored,
            stop_reason,
        })
    }

    async fn disconnect(&self) {
        if let Err(e) = self.publisher.disconnect().await {
            tracing::debug!("Disconnect did not complete cleanly: {}", e);
        }
    }
}
