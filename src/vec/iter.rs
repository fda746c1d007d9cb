// Copyright 2025 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ptr::NonNull;
use core::slice;

/// A read-only iterator over the elements of a [`Vec`](super::Vec).
///
/// The iterator tracks its position as slot indices into the vector's block, so it also serves as
/// a position marker: [`offset`](Self::offset) is the index of the next element it would yield.
pub struct Iter<'a, T> {
	base: NonNull<T>,
	front: usize,
	back: usize,
	_t: PhantomData<&'a T>,
}

/// A mutable iterator over the elements of a [`Vec`](super::Vec).
///
/// A mutable iterator can always be widened into a read-only [`Iter`] over the same remaining
/// range, with [`into_const`](Self::into_const) or [`From`]. The reverse is never possible.
pub struct IterMut<'a, T> {
	base: NonNull<T>,
	front: usize,
	back: usize,
	_t: PhantomData<&'a mut T>,
}

// Safety: `Iter` behaves like `&[T]`.
unsafe impl<T: Sync> Send for Iter<'_, T> { }
// Safety: `Iter` behaves like `&[T]`.
unsafe impl<T: Sync> Sync for Iter<'_, T> { }
// Safety: `IterMut` behaves like `&mut [T]`.
unsafe impl<T: Send> Send for IterMut<'_, T> { }
// Safety: `IterMut` behaves like `&mut [T]`.
unsafe impl<T: Sync> Sync for IterMut<'_, T> { }

impl<'a, T> Iter<'a, T> {
	pub(super) fn new(slice: &'a [T]) -> Self {
		Self {
			base: NonNull::from(slice).cast(),
			front: 0,
			back: slice.len(),
			_t: PhantomData,
		}
	}

	/// Returns the slot index of the next element from the front.
	///
	/// # Examples
	///
	/// ```
	/// use allocvec::Vec;
	///
	/// let vec = Vec::from([1, 2, 3]);
	/// let mut iter = vec.iter();
	/// assert_eq!(iter.offset(), 0);
	/// iter.next();
	/// assert_eq!(iter.offset(), 1);
	/// ```
	pub fn offset(&self) -> usize {
		self.front
	}

	/// Returns the remaining elements as a slice.
	pub fn as_slice(&self) -> &'a [T] {
		// Safety: `front` is within the live range.
		let front = unsafe { self.base.add(self.front) };
		// Safety: the range `front..back` is live for `'a`.
		unsafe {
			slice::from_raw_parts(front.as_ptr(), self.back - self.front)
		}
	}
}

impl<'a, T> IterMut<'a, T> {
	pub(super) fn new(slice: &'a mut [T]) -> Self {
		Self {
			back: slice.len(),
			base: NonNull::from(slice).cast(),
			front: 0,
			_t: PhantomData,
		}
	}

	/// Returns the slot index of the next element from the front.
	pub fn offset(&self) -> usize {
		self.front
	}

	/// Returns the remaining elements as a slice.
	pub fn as_slice(&self) -> &[T] {
		// Safety: `front` is within the live range.
		let front = unsafe { self.base.add(self.front) };
		// Safety: the range `front..back` is live, and shared for the borrow of `self`.
		unsafe {
			slice::from_raw_parts(front.as_ptr(), self.back - self.front)
		}
	}

	/// Widens into a read-only iterator over the remaining elements, at the same position.
	///
	/// # Examples
	///
	/// ```
	/// use allocvec::Vec;
	///
	/// let mut vec = Vec::from([1, 2, 3]);
	/// let mut iter = vec.iter_mut();
	/// *iter.next().unwrap() = 10;
	///
	/// let iter = iter.into_const();
	/// assert_eq!(iter.offset(), 1);
	/// assert_eq!(iter.as_slice(), [2, 3]);
	/// ```
	pub fn into_const(self) -> Iter<'a, T> {
		let Self { base, front, back, .. } = self;
		Iter { base, front, back, _t: PhantomData }
	}
}

impl<'a, T> From<IterMut<'a, T>> for Iter<'a, T> {
	fn from(value: IterMut<'a, T>) -> Self {
		value.into_const()
	}
}

impl<T> Clone for Iter<'_, T> {
	fn clone(&self) -> Self {
		Self { ..*self }
	}
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Iter").field(&self.as_slice()).finish()
	}
}

impl<T: fmt::Debug> fmt::Debug for IterMut<'_, T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("IterMut").field(&self.as_slice()).finish()
	}
}

macro_rules! iterator {
	($name:ident, $item:ty $(, $mutability:tt)?) => {
		impl<'a, T> Iterator for $name<'a, T> {
			type Item = $item;

			fn next(&mut self) -> Option<$item> {
				if self.front == self.back {
					return None
				}
				let index = self.front;
				self.front += 1;
				// Safety: `index` is within the live range.
				let slot = unsafe { self.base.add(index) };
				// Safety: each index is yielded once.
				Some(unsafe { &$($mutability)? *slot.as_ptr() })
			}

			fn size_hint(&self) -> (usize, Option<usize>) {
				let len = self.back - self.front;
				(len, Some(len))
			}

			fn nth(&mut self, n: usize) -> Option<$item> {
				self.front = self.front.saturating_add(n).min(self.back);
				self.next()
			}

			fn count(self) -> usize {
				self.len()
			}

			fn last(mut self) -> Option<$item> {
				self.next_back()
			}
		}

		impl<'a, T> DoubleEndedIterator for $name<'a, T> {
			fn next_back(&mut self) -> Option<$item> {
				if self.front == self.back {
					return None
				}
				self.back -= 1;
				// Safety: `back` is within the live range.
				let slot = unsafe { self.base.add(self.back) };
				// Safety: each index is yielded once.
				Some(unsafe { &$($mutability)? *slot.as_ptr() })
			}

			fn nth_back(&mut self, n: usize) -> Option<$item> {
				self.back = self.back.saturating_sub(n).max(self.front);
				self.next_back()
			}
		}

		impl<T> ExactSizeIterator for $name<'_, T> { }
		impl<T> FusedIterator for $name<'_, T> { }
	};
}

iterator! { Iter, &'a T }
iterator! { IterMut, &'a mut T, mut }
