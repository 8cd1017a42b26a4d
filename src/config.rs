//! Broker connection configuration for the Kafka sender.

use std::env;
use std::str::FromStr;

use crate::error::ConfigError;

/// Security protocol for the broker connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityProtocol {
    Plaintext,
    Ssl,
    SaslPlaintext,
    SaslSsl,
}

impl FromStr for SecurityProtocol {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PLAINTEXT" => Ok(Self::Plaintext),
            "SSL" => Ok(Self::Ssl),
            "SASL_PLAINTEXT" => Ok(Self::SaslPlaintext),
            "SASL_SSL" => Ok(Self::SaslSsl),
            _ => Err(ConfigError::Invalid {
                var: "KAFKA_SECURITY_PROTOCOL".to_string(),
                reason: format!("unknown protocol: {s}"),
            }),
        }
    }
}

impl SecurityProtocol {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plaintext => "PLAINTEXT",
            Self::Ssl => "SSL",
            Self::SaslPlaintext => "SASL_PLAINTEXT",
            Self::SaslSsl => "SASL_SSL",
        }
    }
}

/// SASL mechanism for authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaslMechanism {
    Plain,
    ScramSha256,
    ScramSha512,
}

impl FromStr for SaslMechanism {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "PLAIN" => Ok(Self::Plain),
            "SCRAM_SHA_256" => Ok(Self::ScramSha256),
            "SCRAM_SHA_512" => Ok(Self::ScramSha512),
            _ => Err(ConfigError::Invalid {
                var: "KAFKA_SASL_MECHANISM".to_string(),
                reason: format!("unknown mechanism: {s}"),
            }),
        }
    }
}

impl SaslMechanism {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "PLAIN",
            Self::ScramSha256 => "SCRAM-SHA-256",
            Self::ScramSha512 => "SCRAM-SHA-512",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SaslCredentials {
    pub mechanism: SaslMechanism,
    pub username: String,
    pub password: String,
}

/// Kafka connection configuration.
#[derive(Debug, Clone)]
pub struct KafkaConfig {
    /// Comma-separated broker list.
    pub bootstrap_servers: String,
    pub security_protocol: SecurityProtocol,
    /// Required when the protocol uses SASL.
    pub sasl: Option<SaslCredentials>,
    pub client_id: String,
}

impl KafkaConfig {
    /// Load configuration from `KAFKA_*` environment variables.
    ///
    /// `KAFKA_BOOTSTRAP_SERVERS` is required; protocol defaults to
    /// plaintext, client id to `survey-events`. SASL protocols additionally
    /// require `KAFKA_SASL_MECHANISM`, `KAFKA_SASL_USERNAME` and
    /// `KAFKA_SASL_PASSWORD`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bootstrap_servers = require_env("KAFKA_BOOTSTRAP_SERVERS")?;

        let security_protocol = match env::var("KAFKA_SECURITY_PROTOCOL") {
            Ok(v) => SecurityProtocol::from_str(&v)?,
            Err(_) => SecurityProtocol::Plaintext,
        };

        let client_id =
            env::var("KAFKA_CLIENT_ID").unwrap_or_else(|_| "survey-events".to_string());

        let sasl = if matches!(
            security_protocol,
            SecurityProtocol::SaslPlaintext | SecurityProtocol::SaslSsl
        ) {
            Some(SaslCredentials {
                mechanism: SaslMechanism::from_str(&require_env("KAFKA_SASL_MECHANISM")?)?,
                username: require_env("KAFKA_SASL_USERNAME")?,
                password: require_env("KAFKA_SASL_PASSWORD")?,
            })
        } else {
            None
        };

        Ok(Self {
            bootstrap_servers,
            security_protocol,
            sasl,
            client_id,
        })
    }

    /// Build a configuration in code rather than from the environment.
    pub fn new(bootstrap_servers: impl Into<String>) -> Self {
        Self {
            bootstrap_servers: bootstrap_servers.into(),
            security_protocol: SecurityProtocol::Plaintext,
            sasl: None,
            client_id: "survey-events".to_string(),
        }
    }

    #[must_use]
    pub fn with_security_protocol(mut self, protocol: SecurityProtocol) -> Self {
        self.security_protocol = protocol;
        self
    }

    #[must_use]
    pub fn with_sasl(mut self, sasl: SaslCredentials) -> Self {
        self.sasl = Some(sasl);
        self
    }

    pub fn with_client_id(mut self, id: impl Into<String>) -> Self {
        self.client_id = id.into();
        self
    }
}

fn require_env(var: &str) -> Result<String, ConfigError> {
    env::var(var).map_err(|_| ConfigError::Missing {
        var: var.to_string(),
    })
}
