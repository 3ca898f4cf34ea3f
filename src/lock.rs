use portable_atomic::{AtomicBool, Ordering};

use crate::Park;

/// The grace-period lock. It can be held by only one thread at a time.
///
/// Threads that lose the race to acquire it wait according to the `P`
/// strategy instead of hammering the atomic.
pub struct GpLock<P>
where
	P: Park,
{
	locked: AtomicBool,
	park: P,
}

impl<P> GpLock<P>
where
	P: Park,
{
	pub fn new() -> Self {
		Self { locked: AtomicBool::new(false), park: P::new() }
	}

	fn try_acquire(&self) -> bool {
		self.locked
			.compare_exchange(
				false,
				true,
				Ordering::Acquire,
				Ordering::Relaxed,
			)
			.is_ok()
	}

	/// Block until the lock is held by the calling thread.
	pub fn acquire(&self) {
		while !self.try_acquire() {
			self.park
				.park_while(|| self.locked.load(Ordering::Relaxed));
		}
	}

	/// Release the lock and wake any parked waiters.
	///
	/// Must only be called by the thread that currently holds the lock.
	pub fn release(&self) {
		self.locked.store(false, Ordering::Release);
		self.park.unpark();
	}

	#[cfg(all(test, feature = "std"))]
	pub fn with<O>(&self, f: impl FnOnce() -> O) -> O {
		self.acquire();
		let output = f();
		self.release();
		output
	}
}
