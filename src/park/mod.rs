use crate::cfg::cfg_std;

/// An interface for strategies of waiting on a contended lock.
pub trait Park: Sized {
	/// Create a new [`Park`] object.
	fn new() -> Self;

	/// Block the current thread while `parked` returns `true`.
	///
	/// This function may also return spuriously, before `parked` has ever
	/// returned `false`. Callers must re-check whatever condition they are
	/// waiting on and call [`park_while`] again if it still does not hold.
	///
	/// [`park_while`]: Self::park_while
	fn park_while<F>(&self, parked: F)
	where
		F: Fn() -> bool;

	/// Wake every thread currently blocked in [`park_while`].
	///
	/// This function does _not_ block.
	///
	/// [`park_while`]: Self::park_while
	fn unpark(&self);
}

mod spin;
cfg_std! {
	mod blocking;
	mod r#yield;
}

pub use self::spin::Spin;
cfg_std! {
	pub use self::r#yield::Yield;
	pub use self::blocking::Blocking;
}
