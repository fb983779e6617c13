use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::config::CircuitBreakerConfig;

/// Circuit breaker state machine for handling failures.
#[derive(Debug, Clone)]
pub enum CircuitState {
    /// Normal operation - all calls pass through
    Closed {
        /// Number of consecutive failures
        failure_count: u32,
    },
    /// Circuit is open - all calls fail fast
    Open {
        /// When the circuit was opened
        opened_at: Instant,
    },
    /// One trial call decides whether the circuit closes again
    HalfOpen,
}

/// Thresholds for a [`CircuitBreaker`].
#[derive(Debug, Clone)]
pub struct BreakerPolicy {
    /// Number of consecutive failures before opening circuit
    pub failure_threshold: u32,
    /// How long to wait before attempting recovery
    pub recovery_timeout: Duration,
}

impl From<&CircuitBreakerConfig> for BreakerPolicy {
    fn from(config: &CircuitBreakerConfig) -> Self {
        Self {
            failure_threshold: config.failure_threshold.max(1),
            recovery_timeout: Duration::from_secs(config.recovery_timeout_seconds),
        }
    }
}

/// Circuit breaker guarding the modem against repeated failing logins.
#[derive(Debug, Clone)]
pub struct CircuitBreaker {
    state: Arc<Mutex<CircuitState>>,
    policy: BreakerPolicy,
    name: String,
}

impl CircuitBreaker {
    pub fn new(name: impl Into<String>, policy: BreakerPolicy) -> Self {
        Self {
            state: Arc::new(Mutex::new(CircuitState::Closed { failure_count: 0 })),
            policy,
            name: name.into(),
        }
    }

    /// Checks if a call is allowed through the circuit breaker.
    pub async fn call_allowed(&self) -> bool {
        let mut state = self.state.lock().await;

        match &*state {
            CircuitState::Closed { .. } | CircuitState::HalfOpen => true,
            CircuitState::Open { opened_at } => {
                if opened_at.elapsed() >= self.policy.recovery_timeout {
                    tracing::info!(
                        circuit_breaker = %self.name,
                        "Circuit breaker transitioning from Open to HalfOpen"
                    );
                    *state = CircuitState::HalfOpen;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Records a successful call.
    pub async fn record_success(&self) {
        let mut state = self.state.lock().await;

        if matches!(*state, CircuitState::HalfOpen) {
            tracing::info!(
                circuit_breaker = %self.name,
                "Circuit breaker transitioning from HalfOpen to Closed"
            );
        }
        *state = CircuitState::Closed { failure_count: 0 };
    }

    /// Records a failed call.
    pub async fn record_failure(&self) {
        let mut state = self.state.lock().await;

        match &*state {
            CircuitState::Closed { failure_count } => {
                let failure_count = failure_count + 1;
                if failure_count >= self.policy.failure_threshold {
                    tracing::warn!(
                        circuit_breaker = %self.name,
                        failure_count,
                        "Circuit breaker opening due to excessive failures"
                    );
                    *state = CircuitState::Open {
                        opened_at: Instant::now(),
                    };
                } else {
                    *state = CircuitState::Closed { failure_count };
                }
            }
            CircuitState::HalfOpen => {
                tracing::warn!(
                    circuit_breaker = %self.name,
                    "Circuit breaker reopening after failed trial call"
                );
                *state = CircuitState::Open {
                    opened_at: Instant::now(),
                };
            }
            CircuitState::Open { .. } => {}
        }
    }

    /// Checks if the circuit is currently open.
    pub async fn is_open(&self) -> bool {
        matches!(*self.state.lock().await, CircuitState::Open { .. })
    }
}
