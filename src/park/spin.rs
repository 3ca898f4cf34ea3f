use super::Park;

/// A [`Park`] backend that spins in place.
pub struct Spin {
	_priv: (),
}

impl Park for Spin {
	fn new() -> Self {
		Self { _priv: () }
	}

	fn park_while<F>(&self, parked: F)
	where
		F: Fn() -> bool,
	{
		while parked() {
			core::hint::spin_loop();
		}
	}

	fn unpark(&self) {}
}
