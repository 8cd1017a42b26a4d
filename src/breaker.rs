//! Circuit breaker collaborator.
//!
//! The publisher optionally routes every send through a breaker so a failing
//! broker stops being hammered. The trait deals in typed outcomes: a
//! rejection (the send never ran) is distinguishable from a send that ran
//! and failed.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::error::{BreakerError, TransportError};

/// The transport call a breaker protects.
pub type ProtectedSend<'a> =
    Pin<Box<dyn Future<Output = Result<(), TransportError>> + Send + 'a>>;

/// Tracks recent failures of the transport and may short-circuit further
/// attempts. Shared across all publish calls; implementations keep their
/// state updates atomic.
#[async_trait]
pub trait CircuitBreaker: Send + Sync {
    /// Run `action` under the breaker's protection.
    ///
    /// Returns [`BreakerError::Rejected`] when the breaker declines to run
    /// the action at all, and [`BreakerError::Action`] when the action ran
    /// and failed.
    async fn protect(&self, action: ProtectedSend<'_>) -> Result<(), BreakerError>;
}

/// Breaker states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// Normal operation, sends proceed.
    Closed,
    /// Tripped, sends rejected immediately.
    Open,
    /// Testing recovery, one probe send allowed.
    HalfOpen,
}

/// Configuration for [`ThresholdCircuitBreaker`].
#[derive(Debug, Clone)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures before the circuit opens.
    pub failure_threshold: u32,
    /// Time the circuit stays open before allowing a probe.
    pub recovery_timeout: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            recovery_timeout: Duration::from_secs(30),
        }
    }
}

impl CircuitBreakerConfig {
    #[must_use]
    pub fn with_failure_threshold(mut self, threshold: u32) -> Self {
        self.failure_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_recovery_timeout(mut self, timeout: Duration) -> Self {
        self.recovery_timeout = timeout;
        self
    }
}

struct BreakerState {
    state: CircuitState,
    failure_count: u32,
    opened_at: Option<DateTime<Utc>>,
}

impl BreakerState {
    fn can_execute(&mut self, config: &CircuitBreakerConfig) -> bool {
        match self.state {
            CircuitState::Closed | CircuitState::HalfOpen => true,
            CircuitState::Open => {
                if let Some(opened_at) = self.opened_at {
                    let elapsed = Utc::now().signed_duration_since(opened_at);
                    if elapsed.num_milliseconds() >= config.recovery_timeout.as_millis() as i64 {
                        self.state = CircuitState::HalfOpen;
                        info!(target: "circuit_breaker", "transitioning to half-open for probe");
                        return true;
                    }
                }
                false
            }
        }
    }

    fn record_success(&mut self) {
        if self.state == CircuitState::HalfOpen {
            info!(target: "circuit_breaker", "closed after successful probe");
        }
        self.state = CircuitState::Closed;
        self.failure_count = 0;
        self.opened_at = None;
    }

    fn record_failure(&mut self, config: &CircuitBreakerConfig) {
        self.failure_count += 1;

        match self.state {
            CircuitState::Closed => {
                if self.failure_count >= config.failure_threshold {
                    self.state = CircuitState::Open;
                    self.opened_at = Some(Utc::now());
                    warn!(
                        target: "circuit_breaker",
                        failure_count = self.failure_count,
                        threshold = config.failure_threshold,
                        "opened after consecutive failures"
                    );
                }
            }
            CircuitState::HalfOpen => {
                self.state = CircuitState::Open;
                self.opened_at = Some(Utc::now());
                warn!(target: "circuit_breaker", "reopened after failed probe");
            }
            CircuitState::Open => {}
        }
    }
}

/// Consecutive-failure breaker with a recovery probe.
///
/// Opens after `failure_threshold` consecutive failures, rejects sends while
/// open, and allows a single probe once `recovery_timeout` has elapsed; the
/// probe's outcome closes or reopens the circuit.
pub struct ThresholdCircuitBreaker {
    config: CircuitBreakerConfig,
    state: Mutex<BreakerState>,
}

impl ThresholdCircuitBreaker {
    #[must_use]
    pub fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            config,
            state: Mutex::new(BreakerState {
                state: CircuitState::Closed,
                failure_count: 0,
                opened_at: None,
            }),
        }
    }

    /// Current circuit state.
    pub async fn state(&self) -> CircuitState {
        let state = self.state.lock().await;
        state.state
    }

    pub async fn failure_count(&self) -> u32 {
        let state = self.state.lock().await;
        state.failure_count
    }
}

impl Default for ThresholdCircuitBreaker {
    fn default() -> Self {
        Self::new(CircuitBreakerConfig::default())
    }
}

#[async_trait]
impl CircuitBreaker for ThresholdCircuitBreaker {
    async fn protect(&self, action: ProtectedSend<'_>) -> Result<(), BreakerError> {
        {
            let mut state = self.state.lock().await;
            if !state.can_execute(&self.config) {
                return Err(BreakerError::Rejected {
                    reason: "circuit open".to_string(),
                });
            }
        }

        let outcome = action.await;

        let mut state = self.state.lock().await;
        match outcome {
            Ok(()) => {
                state.record_success();
                Ok(())
            }
            Err(cause) => {
                state.record_failure(&self.config);
                Err(BreakerError::Action(cause))
            }
        }
    }
}
