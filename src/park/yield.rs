use super::Park;

/// A [`Park`] backend that yields to the OS scheduler.
pub struct Yield {
	_priv: (),
}

impl Park for Yield {
	fn new() -> Self {
		Self { _priv: () }
	}

	fn park_while<F>(&self, parked: F)
	where
		F: Fn() -> bool,
	{
		while parked() {
			std::thread::yield_now();
		}
	}

	fn unpark(&self) {}
}
