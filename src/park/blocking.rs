use super::Park;

use std::sync::{Condvar, Mutex};

/// A [`Park`] backend that uses a [`Condvar`] to achieve true blocking.
pub struct Blocking {
	lock: Mutex<()>,
	var: Condvar,
}

impl Park for Blocking {
	fn new() -> Self {
		Self {
			lock: Mutex::new(()),
			var: Condvar::new(),
		}
	}

	fn park_while<F>(&self, parked: F)
	where
		F: Fn() -> bool,
	{
		/* The predicate is checked while holding the mutex. Together with
		 * `unpark` taking the same mutex before notifying, this closes the
		 * window between a waiter deciding to sleep and actually sleeping,
		 * so a wakeup cannot be lost.
		 */
		let mut guard = self.lock.lock().unwrap();
		while parked() {
			guard = self.var.wait(guard).unwrap();
		}
	}

	fn unpark(&self) {
		let _guard = self.lock.lock().unwrap();
		self.var.notify_all();
	}
}

impl Default for Blocking {
	fn default() -> Self {
		Self::new()
	}
}
