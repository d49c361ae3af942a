//! Per-source circuit breaker for fault tolerance.
//!
//! Count-based sliding window: the last `window_size` call outcomes are kept
//! per source, and the circuit opens once the window is full and the failure
//! rate reaches the threshold. The circuit has three states:
//!
//! - **Closed**: Normal operation, requests are allowed through.
//! - **Open**: Source is failing, requests are blocked.
//! - **HalfOpen**: A fixed number of trial requests decide whether to close.
//!
//! The circuit breaker is in-memory and resets on application restart.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use log::{debug, info, warn};

/// Default number of outcomes in the sliding window.
const DEFAULT_WINDOW_SIZE: usize = 10;

/// Default failure rate (percent) at which the circuit opens.
const DEFAULT_FAILURE_RATE_THRESHOLD: f64 = 50.0;

/// Default time to wait before transitioning from Open to HalfOpen.
const DEFAULT_OPEN_DURATION: Duration = Duration::from_secs(10);

/// Default number of trial calls permitted in HalfOpen.
const DEFAULT_HALF_OPEN_CALLS: usize = 5;

/// Circuit breaker state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CircuitState {
    /// Normal operation - requests are allowed.
    Closed,
    /// Source is failing - requests are blocked.
    Open,
    /// Testing recovery - limited requests allowed.
    HalfOpen,
}

impl std::fmt::Display for CircuitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Closed => write!(f, "Closed"),
            Self::Open => write!(f, "Open"),
            Self::HalfOpen => write!(f, "HalfOpen"),
        }
    }
}

/// Circuit breaker configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct CircuitBreakerConfig {
    /// Number of most recent outcomes considered.
    pub window_size: usize,
    /// Failure rate in percent that opens the circuit.
    pub failure_rate_threshold: f64,
    /// Time to stay open before allowing trial calls.
    pub open_duration: Duration,
    /// Trial calls evaluated in HalfOpen before deciding.
    pub half_open_calls: usize,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            failure_rate_threshold: DEFAULT_FAILURE_RATE_THRESHOLD,
            open_duration: DEFAULT_OPEN_DURATION,
            half_open_calls: DEFAULT_HALF_OPEN_CALLS,
        }
    }
}

/// Internal circuit state for a single source.
#[derive(Debug)]
struct Circuit {
    state: CircuitState,
    /// Recent outcomes, `true` for failure. Used in Closed and HalfOpen.
    outcomes: VecDeque<bool>,
    /// Trial calls handed out since entering HalfOpen.
    half_open_permits: usize,
    opened_at: Option<Instant>,
}

impl Circuit {
    fn new() -> Self {
        Self {
            state: CircuitState::Closed,
            outcomes: VecDeque::new(),
            half_open_permits: 0,
            opened_at: None,
        }
    }

    fn failure_rate(&self) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }
        let failures = self.outcomes.iter().filter(|failed| **failed).count();
        failures as f64 * 100.0 / self.outcomes.len() as f64
    }

    fn open(&mut self) {
        self.state = CircuitState::Open;
        self.opened_at = Some(Instant::now());
        self.outcomes.clear();
        self.half_open_permits = 0;
    }

    fn close(&mut self) {
        self.state = CircuitState::Closed;
        self.opened_at = None;
        self.outcomes.clear();
        self.half_open_permits = 0;
    }
}

/// Per-source circuit breaker.
///
/// Thread-safe circuit breaker that tracks outcomes per source
/// and blocks requests to failing sources.
pub struct CircuitBreaker {
    circuits: Mutex<HashMap<String, Circuit>>,
    config: CircuitBreakerConfig,
}

impl CircuitBreaker {
    /// Create a new circuit breaker with default settings.
    pub fn new() -> Self {
        Self::with_config(CircuitBreakerConfig::default())
    }

    /// Create a circuit breaker with custom configuration.
    pub fn with_config(config: CircuitBreakerConfig) -> Self {
        Self {
            circuits: Mutex::new(HashMap::new()),
            config,
        }
    }

    /// Lock the circuits mutex, recovering from poison if necessary.
    ///
    /// The worst case after a poisoned lock is slightly stale circuit
    /// state, which beats panicking.
    fn lock_circuits(&self) -> MutexGuard<'_, HashMap<String, Circuit>> {
        self.circuits.lock().unwrap_or_else(|poisoned| {
            warn!("Circuit breaker mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Check if a request may go to `source`.
    ///
    /// Handles the Open -> HalfOpen transition once the open duration has
    /// elapsed, and hands out at most `half_open_calls` trial permits.
    pub fn is_allowed(&self, source: &str) -> bool {
        let mut circuits = self.lock_circuits();
        let circuit = circuits
            .entry(source.to_string())
            .or_insert_with(Circuit::new);

        match circuit.state {
            CircuitState::Closed => true,
            CircuitState::HalfOpen => {
                if circuit.half_open_permits < self.config.half_open_calls {
                    circuit.half_open_permits += 1;
                    true
                } else {
                    false
                }
            }
            CircuitState::Open => {
                let elapsed = circuit
                    .opened_at
                    .map(|at| at.elapsed() >= self.config.open_duration)
                    .unwrap_or(true);
                if elapsed {
                    info!(
                        "Circuit breaker: transitioning '{}' from Open to HalfOpen",
                        source
                    );
                    circuit.state = CircuitState::HalfOpen;
                    circuit.outcomes.clear();
                    circuit.half_open_permits = 1;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Record a successful request for `source`.
    pub fn record_success(&self, source: &str) {
        self.record(source, false);
    }

    /// Record a failed request for `source`.
    pub fn record_failure(&self, source: &str) {
        self.record(source, true);
    }

    fn record(&self, source: &str, failed: bool) {
        let mut circuits = self.lock_circuits();
        let circuit = circuits
            .entry(source.to_string())
            .or_insert_with(Circuit::new);

        match circuit.state {
            CircuitState::Closed => {
                circuit.outcomes.push_back(failed);
                while circuit.outcomes.len() > self.config.window_size {
                    circuit.outcomes.pop_front();
                }

                if circuit.outcomes.len() == self.config.window_size
                    && circuit.failure_rate() >= self.config.failure_rate_threshold
                {
                    info!(
                        "Circuit breaker: opening circuit for '{}' at {:.0}% failure rate",
                        source,
                        circuit.failure_rate()
                    );
                    circuit.open();
                } else {
                    debug!(
                        "Circuit breaker: {} for '{}' ({}/{} recorded)",
                        if failed { "failure" } else { "success" },
                        source,
                        circuit.outcomes.len(),
                        self.config.window_size
                    );
                }
            }
            CircuitState::HalfOpen => {
                circuit.outcomes.push_back(failed);
                if circuit.outcomes.len() >= self.config.half_open_calls {
                    if circuit.failure_rate() >= self.config.failure_rate_threshold {
                        info!(
                            "Circuit breaker: reopening circuit for '{}' after trial calls",
                            source
                        );
                        circuit.open();
                    } else {
                        info!(
                            "Circuit breaker: closing circuit for '{}' after trial calls",
                            source
                        );
                        circuit.close();
                    }
                }
            }
            CircuitState::Open => {
                debug!(
                    "Circuit breaker: outcome for '{}' ignored while open",
                    source
                );
            }
        }
    }

    /// Get the current state for `source`.
    pub fn state(&self, source: &str) -> CircuitState {
        self.lock_circuits()
            .get(source)
            .map(|c| c.state)
            .unwrap_or(CircuitState::Closed)
    }

    /// Failure rate (percent) of the outcomes currently in the window.
    pub fn failure_rate(&self, source: &str) -> f64 {
        self.lock_circuits()
            .get(source)
            .map(Circuit::failure_rate)
            .unwrap_or(0.0)
    }

    /// Reset the circuit for `source` to Closed.
    pub fn reset(&self, source: &str) {
        if let Some(circuit) = self.lock_circuits().get_mut(source) {
            info!("Circuit breaker: manually resetting circuit for '{}'", source);
            circuit.close();
        }
    }
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new()
    }
}
