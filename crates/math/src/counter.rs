//! Serial number sources.
//!
//! Equation numbers are drawn from a counter owned by the build environment,
//! keyed by name so one service can number several kinds of objects. The
//! registry never holds a counter itself; callers pass one in, which lets
//! parallel workers run against isolated counters or a single shared one.

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Counter key used for equation numbers.
pub const EQUATION_COUNTER: &str = "eqno";

/// Source of monotonically increasing serials.
pub trait SerialCounter {
	/// Returns the next unused serial for `key`, starting at 0.
	fn next_serial(&mut self, key: &str) -> u64;
}

impl<C: SerialCounter + ?Sized> SerialCounter for &mut C {
	fn next_serial(&mut self, key: &str) -> u64 {
		(**self).next_serial(key)
	}
}

/// Plain per-key counter, owned by a single build pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerialNumbers {
	next: FxHashMap<String, u64>,
}

impl SerialNumbers {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the serial the next call for `key` would hand out.
	pub fn peek(&self, key: &str) -> u64 {
		self.next.get(key).copied().unwrap_or(0)
	}
}

impl SerialCounter for SerialNumbers {
	fn next_serial(&mut self, key: &str) -> u64 {
		if let Some(slot) = self.next.get_mut(key) {
			let serial = *slot;
			*slot += 1;
			return serial;
		}
		self.next.insert(key.to_owned(), 1);
		0
	}
}

/// Cloneable handle to one counter shared by several workers.
///
/// Every clone draws from the same sequence, so serials stay unique across
/// threads. The order in which workers draw is not deterministic.
#[derive(Debug, Clone, Default)]
pub struct SharedSerialNumbers {
	inner: Arc<Mutex<SerialNumbers>>,
}

impl SharedSerialNumbers {
	pub fn new() -> Self {
		Self::default()
	}

	/// Wraps an existing counter, e.g. one restored from a build cache.
	pub fn from_counter(counter: SerialNumbers) -> Self {
		Self {
			inner: Arc::new(Mutex::new(counter)),
		}
	}

	/// Copies out the current state.
	pub fn snapshot(&self) -> SerialNumbers {
		self.inner.lock().clone()
	}
}

impl SerialCounter for SharedSerialNumbers {
	fn next_serial(&mut self, key: &str) -> u64 {
		self.inner.lock().next_serial(key)
	}
}
