//! Transport sender collaborator.

use async_trait::async_trait;

use crate::envelope::Envelope;
use crate::error::TransportError;
use crate::topic::Topic;

/// Delivers a built envelope to a bus topic.
///
/// Any error is treated as a transport failure by the publisher. If the
/// underlying client cannot be used concurrently, the implementation is
/// responsible for serializing access, not the publisher.
#[async_trait]
pub trait EventSender: Send + Sync {
    async fn send(&self, topic: Topic, envelope: &Envelope) -> Result<(), TransportError>;
}

#[cfg(feature = "kafka")]
pub use kafka::{BrokerHealth, KafkaEventSender};

#[cfg(feature = "kafka")]
mod kafka {
    use std::time::Duration;

    use async_trait::async_trait;
    use rdkafka::config::ClientConfig;
    use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
    use tracing::{debug, info};

    use crate::config::KafkaConfig;
    use crate::envelope::Envelope;
    use crate::error::TransportError;
    use crate::topic::Topic;

    use super::EventSender;

    /// Broker connectivity snapshot.
    #[derive(Debug, Clone)]
    pub struct BrokerHealth {
        pub connected: bool,
        pub brokers: usize,
        pub topics: usize,
    }

    /// Kafka-backed sender.
    pub struct KafkaEventSender {
        producer: FutureProducer,
    }

    impl KafkaEventSender {
        /// Create a sender from broker configuration. Connection is lazy;
        /// the first send establishes it.
        pub fn new(config: &KafkaConfig) -> Result<Self, TransportError> {
            let mut client_config = ClientConfig::new();

            client_config
                .set("bootstrap.servers", &config.bootstrap_servers)
                .set("client.id", &config.client_id)
                .set("security.protocol", config.security_protocol.as_str())
                .set("message.timeout.ms", "5000")
                .set("acks", "all");

            if let Some(sasl) = &config.sasl {
                client_config
                    .set("sasl.mechanism", sasl.mechanism.as_str())
                    .set("sasl.username", &sasl.username)
                    .set("sasl.password", &sasl.password);
            }

            let producer: FutureProducer = client_config
                .create()
                .map_err(|e| TransportError::new(e.to_string()))?;

            info!(
                bootstrap_servers = %config.bootstrap_servers,
                client_id = %config.client_id,
                "Kafka event sender created"
            );

            Ok(Self { producer })
        }

        /// Fetch broker metadata to confirm connectivity.
        pub async fn health_check(&self) -> Result<BrokerHealth, TransportError> {
            let metadata = self
                .producer
                .client()
                .fetch_metadata(None, Duration::from_secs(5))
                .map_err(|e| TransportError::new(e.to_string()))?;

            Ok(BrokerHealth {
                connected: true,
                brokers: metadata.brokers().len(),
                topics: metadata.topics().len(),
            })
        }
    }

    #[async_trait]
    impl EventSender for KafkaEventSender {
        async fn send(&self, topic: Topic, envelope: &Envelope) -> Result<(), TransportError> {
            let key = envelope.transaction_id().to_string();
            let payload = envelope
                .to_json()
                .map_err(|e| TransportError::new(e.to_string()))?;

            debug!(
                topic = %topic,
                key = %key,
                payload_size = payload.len(),
                "Publishing event"
            );

            let record = FutureRecord::to(topic.as_str()).key(&key).payload(&payload);

            let (partition, offset) = self
                .producer
                .send(record, Duration::from_secs(5))
                .await
                .map_err(|(err, _)| TransportError::new(err.to_string()))?;

            debug!(partition, offset, "Event delivered");
            Ok(())
        }
    }
}
