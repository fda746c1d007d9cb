// Copyright 2025 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

//! Construction and destruction over runs of raw slots. These are the only functions which write
//! to or drop from possibly-uninitialized memory; everything above them is built by composing
//! them.
//!
//! Each constructing primitive is complete as a unit. If a constructor fails partway, whether by
//! returning an error or by panicking, the slots already constructed *by that call* are dropped
//! before the failure propagates. The caller never has to clean up after a primitive, only after
//! its own earlier steps.

use core::convert::Infallible;
use core::mem;
use core::ptr::{self, NonNull};
use crate::error::Partial;
use crate::macros::trace;

/// Drops the constructed prefix of a run if the constructor unwinds.
struct Constructed<T> {
	start: NonNull<T>,
	count: usize,
}

impl<T> Constructed<T> {
	/// Writes the next slot.
	///
	/// # Safety
	///
	/// The slot after the constructed prefix must be uninitialized and within the destination.
	unsafe fn push(&mut self, value: T) {
		self.start.add(self.count).write(value);
		self.count += 1;
	}

	#[allow(clippy::mem_forget)]
	fn finish(self) {
		mem::forget(self);
	}
}

impl<T> Drop for Constructed<T> {
	fn drop(&mut self) {
		trace!(constructed = self.count, "rolling back partial construction");
		// Safety: exactly `count` slots were written starting at `start`.
		unsafe {
			destroy(self.start, self.count);
		}
	}
}

/// Constructs `count` elements into `dst` from a fallible constructor, which receives the index of
/// the slot it is building, relative to `dst`.
///
/// # Errors
///
/// Returns the constructor's first error along with the number of slots it had constructed, all
/// of which have already been dropped again.
///
/// # Safety
///
/// `dst` must be valid for writes of `count` slots, all of them uninitialized.
pub unsafe fn fill_with<T, E, F>(dst: NonNull<T>, count: usize, mut construct: F) -> Result<(), Partial<E>>
where
	F: FnMut(usize) -> Result<T, E>
{
	let mut guard = Constructed { start: dst, count: 0 };
	while guard.count < count {
		match construct(guard.count) {
			Ok(value) => guard.push(value),
			Err(error) => {
				let constructed = guard.count;
				drop(guard);
				return Err(Partial { constructed, error })
			}
		}
	}
	guard.finish();
	Ok(())
}

fn infallible<T>(result: Result<T, Partial<Infallible>>) -> T {
	match result {
		Ok(value) => value,
		Err(Partial { error, .. }) => match error { }
	}
}

/// Constructs `count` clones of `value` into `dst`.
///
/// # Safety
///
/// `dst` must be valid for writes of `count` slots, all of them uninitialized.
pub unsafe fn fill<T: Clone>(dst: NonNull<T>, count: usize, value: &T) {
	infallible(fill_with(dst, count, |_| Ok(value.clone())));
}

/// Default-constructs `count` elements into `dst`.
///
/// # Safety
///
/// `dst` must be valid for writes of `count` slots, all of them uninitialized.
pub unsafe fn fill_default<T: Default>(dst: NonNull<T>, count: usize) {
	infallible(fill_with(dst, count, |_| Ok(T::default())));
}

/// Constructs clones of every element of `src` into `dst`.
///
/// # Safety
///
/// `dst` must be valid for writes of `src.len()` slots, all of them uninitialized, and must not
/// overlap `src`.
pub unsafe fn copy<T: Clone>(dst: NonNull<T>, src: &[T]) {
	infallible(fill_with(dst, src.len(), |i| Ok(src[i].clone())));
}

/// The iterator ran out before producing the length it reported.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Exhausted;

/// Constructs exactly `count` elements taken from `iter` into `dst`.
///
/// # Errors
///
/// Returns an error if the iterator yields fewer than `count` elements. The elements taken from it
/// have been dropped. Excess elements are left in the iterator.
///
/// # Safety
///
/// `dst` must be valid for writes of `count` slots, all of them uninitialized.
pub unsafe fn copy_iter<T>(
	dst: NonNull<T>,
	count: usize,
	iter: &mut impl Iterator<Item = T>,
) -> Result<(), Partial<Exhausted>> {
	fill_with(dst, count, |_| iter.next().ok_or(Exhausted))
}

/// Moves `count` elements from `src` into `dst`.
///
/// This cannot fail. Afterward the source slots are *vacated*: their bytes are still there, but
/// ownership of each value now lives in `dst`. The caller retires the source slots by treating them
/// as uninitialized from then on, and must never drop them.
///
/// # Safety
///
/// `src` must hold `count` live elements, `dst` must be valid for writes of `count` uninitialized
/// slots, and the two runs must not overlap.
pub unsafe fn relocate<T>(src: NonNull<T>, dst: NonNull<T>, count: usize) {
	ptr::copy_nonoverlapping(src.as_ptr(), dst.as_ptr(), count);
}

/// Moves `count` elements from `src` into `dst`, where the runs may overlap. Slots of `dst` which
/// were live before the move must have been vacated earlier by the caller; their old bytes are
/// overwritten without being dropped.
///
/// # Safety
///
/// `src` must hold `count` live elements, and `dst` must be valid for writes of `count` slots, none
/// of them holding an element that still needs dropping.
pub unsafe fn shift<T>(src: NonNull<T>, dst: NonNull<T>, count: usize) {
	ptr::copy(src.as_ptr(), dst.as_ptr(), count);
}

/// Drops `count` live elements starting at `first`.
///
/// # Safety
///
/// The `count` slots starting at `first` must hold live elements, which are never used again.
pub unsafe fn destroy<T>(first: NonNull<T>, count: usize) {
	if count == 0 || !mem::needs_drop::<T>() {
		return
	}
	ptr::drop_in_place(NonNull::slice_from_raw_parts(first, count).as_ptr());
}
