//! Feature toggle cache over the persisted parameter store.
//!
//! The store is polled, never pushed: [`ConfigCache::refresh`] re-reads the
//! toggle only when the refresh interval has elapsed since the last read. A
//! failed read keeps the previously cached value so the cycle never aborts.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use parking_lot::RwLock;
use tracing::{debug, warn};
use tvc_common::params::{ParamsError, parse_bool};

// ─── Store Seam ─────────────────────────────────────────────────────

/// Read access to the external key-value parameter store.
pub trait ParamStore {
    /// Read a boolean param. A missing key reads as `false`.
    fn get_bool(&self, key: &str) -> Result<bool, ParamsError>;
}

/// In-process store. Clones share the same values.
#[derive(Debug, Clone, Default)]
pub struct MemoryParamStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryParamStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_bool(&self, key: &str, value: bool) {
        self.set_raw(key, if value { "1" } else { "0" });
    }

    /// Store a raw value, bypassing encoding.
    pub fn set_raw(&self, key: &str, raw: &str) {
        self.values.write().insert(key.to_string(), raw.to_string());
    }
}

impl ParamStore for MemoryParamStore {
    fn get_bool(&self, key: &str) -> Result<bool, ParamsError> {
        match self.values.read().get(key) {
            Some(raw) => parse_bool(key, raw),
            None => Ok(false),
        }
    }
}

/// Read-only adapter for a key-per-file parameter directory.
#[derive(Debug, Clone)]
pub struct FileParamStore {
    dir: PathBuf,
}

impl FileParamStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ParamStore for FileParamStore {
    fn get_bool(&self, key: &str) -> Result<bool, ParamsError> {
        match std::fs::read_to_string(self.dir.join(key)) {
            Ok(raw) => parse_bool(key, &raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(ParamsError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

// ─── Time Source ────────────────────────────────────────────────────

/// Monotonic time source [s].
pub trait Clock {
    fn now(&self) -> f64;
}

/// Seconds elapsed since construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Externally driven clock for simulation and tests. Clones share the time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    bits: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(start.to_bits())),
        }
    }

    pub fn set(&self, secs: f64) {
        self.bits.store(secs.to_bits(), Ordering::Relaxed);
    }

    pub fn advance(&self, dt: f64) {
        self.set(self.now() + dt);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }
}

// ─── Cache ──────────────────────────────────────────────────────────

/// Cached boolean feature toggle with a minimum refresh interval.
#[derive(Debug)]
pub struct ConfigCache<S> {
    store: S,
    key: &'static str,
    interval: f64,
    enabled: bool,
    last_refresh: f64,
}

impl<S: ParamStore> ConfigCache<S> {
    /// Read the toggle once and start the refresh interval at `now`.
    ///
    /// A failed initial read leaves the feature disabled.
    pub fn new(store: S, key: &'static str, interval: f64, now: f64) -> Self {
        let enabled = match store.get_bool(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("param read failed, feature stays disabled: {e}");
                false
            }
        };
        Self {
            store,
            key,
            interval,
            enabled,
            last_refresh: now,
        }
    }

    /// Re-read the toggle if at least `interval` seconds passed since the
    /// last read. Returns `true` when a read was attempted.
    pub fn refresh(&mut self, now: f64) -> bool {
        if now - self.last_refresh < self.interval {
            return false;
        }
        match self.store.get_bool(self.key) {
            Ok(value) => {
                if value != self.enabled {
                    debug!("TVC: param {} changed to {}", self.key, value);
                }
                self.enabled = value;
            }
            Err(e) => warn!("param read failed, keeping {}: {e}", self.enabled),
        }
        self.last_refresh = now;
        true
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn last_refresh(&self) -> f64 {
        self.last_refresh
    }
}
