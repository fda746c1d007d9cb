// Copyright 2024 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

use alloc::alloc::handle_alloc_error;
use core::alloc::LayoutError;
use core::fmt::{self, Display, Formatter};
use allocator_api2::alloc::Layout;

pub type Result<T = (), E = AllocError> = core::result::Result<T, E>;

/// The memory source could not supply a block for the requested capacity.
///
/// Returned by the `try_` family of methods. A vector which returns this error is left exactly as
/// it was before the call: its capacity is unchanged, and all its elements remain live in their
/// original slots.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum AllocError {
	/// The requested capacity exceeds [`isize::MAX`] bytes, or the slot count overflowed while
	/// computing it.
	CapacityOverflow,
	/// The allocator returned an error for a valid layout.
	Alloc {
		layout: Layout
	}
}

impl AllocError {
	/// Diverges with the standard out-of-memory handling, for the infallible API.
	#[allow(clippy::panic)]
	#[cold]
	#[inline(never)]
	#[track_caller]
	pub fn handle(self) -> ! {
		match self {
			Self::CapacityOverflow => panic!("capacity overflow"),
			Self::Alloc { layout } => handle_alloc_error(layout)
		}
	}
}

impl From<LayoutError> for AllocError {
	fn from(_: LayoutError) -> Self {
		Self::CapacityOverflow
	}
}

impl From<AllocError> for allocator_api2::alloc::AllocError {
	fn from(_: AllocError) -> Self {
		Self
	}
}

impl Display for AllocError {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Self::CapacityOverflow => f.write_str("capacity overflow"),
			Self::Alloc { layout } => write!(
				f,
				"memory allocation of {} bytes (align {}) failed",
				layout.size(),
				layout.align()
			)
		}
	}
}

impl core::error::Error for AllocError { }

/// A checked accessor received an index at or beyond the vector length.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct OutOfRange {
	pub index: usize,
	pub len: usize,
}

impl Display for OutOfRange {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let Self { index, len } = self;
		write!(f, "index (is {index}) should be < len (is {len})")
	}
}

impl core::error::Error for OutOfRange { }

/// A run of slots was only partly constructed before its constructor failed.
///
/// `constructed` slots had been built when `error` was returned; by the time this is observed they
/// have already been dropped again, so the run holds no live elements.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Partial<E> {
	pub constructed: usize,
	pub error: E,
}

impl<E: Display> Display for Partial<E> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let Self { constructed, error } = self;
		write!(f, "construction failed after {constructed} elements: {error}")
	}
}

impl<E: core::error::Error> core::error::Error for Partial<E> { }

/// An insertion failed, either to make room or to construct the inserted elements. Either way the
/// vector is left as it was before the call.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum InsertError<E> {
	Alloc(AllocError),
	Construct(Partial<E>),
}

impl<E> From<AllocError> for InsertError<E> {
	fn from(value: AllocError) -> Self {
		Self::Alloc(value)
	}
}

impl<E> From<Partial<E>> for InsertError<E> {
	fn from(value: Partial<E>) -> Self {
		Self::Construct(value)
	}
}

impl<E: Display> Display for InsertError<E> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Self::Alloc(err) => Display::fmt(err, f),
			Self::Construct(err) => Display::fmt(err, f),
		}
	}
}

impl<E: core::error::Error + 'static> core::error::Error for InsertError<E> {
	fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
		match self {
			Self::Alloc(err) => Some(err),
			Self::Construct(err) => Some(&err.error),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::string::ToString;
	use super::*;

	#[test]
	fn display() {
		let layout = Layout::new::<[u64; 4]>();
		assert_eq!(AllocError::CapacityOverflow.to_string(), "capacity overflow");
		assert_eq!(
			AllocError::Alloc { layout }.to_string(),
			"memory allocation of 32 bytes (align 8) failed"
		);
		assert_eq!(
			OutOfRange { index: 5, len: 3 }.to_string(),
			"index (is 5) should be < len (is 3)"
		);
	}

	#[test]
	fn insert_error_display() {
		let err: InsertError<OutOfRange> = Partial {
			constructed: 2,
			error: OutOfRange { index: 1, len: 0 }
		}.into();
		assert_eq!(
			err.to_string(),
			"construction failed after 2 elements: index (is 1) should be < len (is 0)"
		);
		let err: InsertError<OutOfRange> = AllocError::CapacityOverflow.into();
		assert_eq!(err.to_string(), "capacity overflow");
	}

	#[test]
	fn layout_error_is_overflow() {
		let err = Layout::from_size_align(8, 3).map_err(AllocError::from);
		assert_eq!(err, Err(AllocError::CapacityOverflow));
	}
}
