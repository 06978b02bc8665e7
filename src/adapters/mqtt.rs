use crate::domain::model::{BrokerAddress, Settings};
use crate::domain::ports::Publisher;
use crate::utils::error::{ControllerError, Result};
use crate::utils::validation::parse_broker_url;
use async_trait::async_trait;
use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Outgoing, Packet, QoS, Transport};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

const REQUEST_CAPACITY: usize = 64;

pub fn broker_address(url_str: &str) -> Result<BrokerAddress> {
    parse_broker_url("broker.url", url_str)
}

pub fn mqtt_options(settings: &Settings) -> Result<MqttOptions> {
    let address = broker_address(&settings.broker_url)?;

    let mut options = MqttOptions::new(&settings.client_id, address.host, address.port);
    options
        .set_keep_alive(settings.keep_alive())
        .set_credentials(&settings.username, &settings.password)
        .set_clean_session(true);

    if address.tls {
        options.set_transport(Transport::tls_with_default_config());
    }

    Ok(options)
}

/// A connected MQTT client publishing at-most-once, non-retained messages.
///
/// The rumqttc event loop runs in one background task that only moves bytes;
/// it stops at its first error instead of reconnecting.
pub struct MqttPublisher {
    client: AsyncClient,
    network: Mutex<Option<JoinHandle<()>>>,
    disconnect_grace: Duration,
}

impl MqttPublisher {
    /// Connect and wait for the broker's CONNACK. Any failure is returned as is.
    pub async fn connect(settings: &Settings) -> Result<Self> {
        let options = mqtt_options(settings)?;
        tracing::info!(
            "🔌 Connecting to {} as '{}' (keep-alive {}s)",
            settings.broker_url,
            settings.client_id,
            settings.keep_alive_secs
        );

        let (client, mut eventloop) = AsyncClient::new(options, REQUEST_CAPACITY);

        loop {
            match eventloop.poll().await? {
                Event::Incoming(Packet::ConnAck(ack)) => {
                    tracing::info!("✅ Connected (session present: {})", ack.session_present);
                    break;
                }
                event => tracing::trace!("Connect: {:?}", event),
            }
        }

        let network = tokio::spawn(drive(eventloop));

        Ok(Self {
            client,
            network: Mutex::new(Some(network)),
            disconnect_grace: settings.disconnect_grace(),
        })
    }
}

async fn drive(mut eventloop: EventLoop) {
    loop {
        match eventloop.poll().await {
            Ok(Event::Outgoing(Outgoing::Disconnect)) => {
                tracing::debug!("DISCONNECT sent");
                break;
            }
            Ok(event) => tracing::trace!("MQTT: {:?}", event),
            // runs while raw mode is on
            Err(e) => {
                tracing::debug!("MQTT network task stopped: {}", e);
                break;
            }
        }
    }
}

#[async_trait]
impl Publisher for MqttPublisher {
    /// Never waits: a full request queue drops the message.
    async fn publish(&self, topic: &str, payload: &str) -> Result<()> {
        self.client
            .try_publish(topic, QoS::AtMostOnce, false, payload.as_bytes().to_vec())?;
        Ok(())
    }

    async fn disconnect(&self) -> Result<()> {
        let requested = self.client.try_disconnect();

        if let Some(mut network) = self.network.lock().await.take() {
            if tokio::time::timeout(self.disconnect_grace, &mut network)
                .await
                .is_err()
            {
                tracing::debug!(
                    "Network task still busy after {:?}, stopping it",
                    self.disconnect_grace
                );
                network.abort();
            }
        }

        tracing::debug!("Disconnected");
        requested.map_err(ControllerError::from)
    }
}
