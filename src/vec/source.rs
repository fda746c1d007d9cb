// Copyright 2025 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

//! Element sources for construction into a run of uninitialized slots. Each source forwards to one
//! of the [`uninit`] primitives, so it inherits their rollback rule: on failure, whatever it
//! constructed has already been dropped.

use core::convert::Infallible;
use core::ptr::NonNull;
use crate::error::Partial;
use crate::raw::uninit::{self, Exhausted};

pub(crate) trait Source<T> {
	type Error;

	/// Constructs `count` elements into `dst`.
	///
	/// # Safety
	///
	/// `dst` must be valid for writes of `count` slots, all of them uninitialized.
	unsafe fn construct(self, dst: NonNull<T>, count: usize) -> Result<(), Partial<Self::Error>>;
}

/// A single value, moved in.
pub(crate) struct One<T>(pub T);

impl<T> Source<T> for One<T> {
	type Error = Infallible;

	unsafe fn construct(self, dst: NonNull<T>, count: usize) -> Result<(), Partial<Infallible>> {
		debug_assert_eq!(count, 1, "a single value should fill a single slot");
		dst.write(self.0);
		Ok(())
	}
}

/// A single value built by a fallible constructor.
pub(crate) struct Emplace<F>(pub F);

impl<T, E, F: FnOnce() -> Result<T, E>> Source<T> for Emplace<F> {
	type Error = E;

	unsafe fn construct(self, dst: NonNull<T>, count: usize) -> Result<(), Partial<E>> {
		debug_assert_eq!(count, 1, "a single value should fill a single slot");
		match (self.0)() {
			Ok(value) => {
				dst.write(value);
				Ok(())
			}
			Err(error) => Err(Partial { constructed: 0, error })
		}
	}
}

/// Clones of a single value.
pub(crate) struct Fill<'a, T>(pub &'a T);

impl<T: Clone> Source<T> for Fill<'_, T> {
	type Error = Infallible;

	unsafe fn construct(self, dst: NonNull<T>, count: usize) -> Result<(), Partial<Infallible>> {
		uninit::fill(dst, count, self.0);
		Ok(())
	}
}

/// Default values.
pub(crate) struct Defaults;

impl<T: Default> Source<T> for Defaults {
	type Error = Infallible;

	unsafe fn construct(self, dst: NonNull<T>, count: usize) -> Result<(), Partial<Infallible>> {
		uninit::fill_default(dst, count);
		Ok(())
	}
}

/// Clones of each element of a slice.
pub(crate) struct Slice<'a, T>(pub &'a [T]);

impl<T: Clone> Source<T> for Slice<'_, T> {
	type Error = Infallible;

	unsafe fn construct(self, dst: NonNull<T>, count: usize) -> Result<(), Partial<Infallible>> {
		debug_assert_eq!(count, self.0.len(), "the slice should fill the run exactly");
		uninit::copy(dst, self.0);
		Ok(())
	}
}

/// Values built by a fallible constructor taking the index within the run.
pub(crate) struct With<F>(pub F);

impl<T, E, F: FnMut(usize) -> Result<T, E>> Source<T> for With<F> {
	type Error = E;

	unsafe fn construct(self, dst: NonNull<T>, count: usize) -> Result<(), Partial<E>> {
		uninit::fill_with(dst, count, self.0)
	}
}

/// Values taken from an iterator which must yield at least the run length.
pub(crate) struct Iter<I>(pub I);

impl<T, I: Iterator<Item = T>> Source<T> for Iter<I> {
	type Error = Exhausted;

	unsafe fn construct(mut self, dst: NonNull<T>, count: usize) -> Result<(), Partial<Exhausted>> {
		uninit::copy_iter(dst, count, &mut self.0)
	}
}
