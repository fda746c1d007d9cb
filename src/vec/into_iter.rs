// Copyright 2025 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

use core::fmt;
use core::iter::FusedIterator;
use core::mem::ManuallyDrop;
use core::ptr;
use core::slice;
use allocator_api2::alloc::Allocator;
use crate::raw::{uninit, RawStorage};
use super::Vec;

/// An iterator moving elements out of a [`Vec`]. Elements not yet yielded are dropped with the
/// iterator, and the block is released afterward.
pub struct IntoIter<T, A: Allocator> {
	storage: RawStorage<T, A>,
	front: usize,
	back: usize,
}

impl<T, A: Allocator> IntoIter<T, A> {
	pub(super) fn new(vec: Vec<T, A>) -> Self {
		let vec = ManuallyDrop::new(vec);
		let back = vec.len;
		// Safety: the vector is never dropped, so the storage is moved out exactly once.
		let storage = unsafe { ptr::read(&vec.storage) };
		Self { storage, front: 0, back }
	}

	/// Returns the remaining elements as a slice.
	pub fn as_slice(&self) -> &[T] {
		// Safety: `front` is within the block.
		let front = unsafe { self.storage.ptr().add(self.front) };
		// Safety: the range `front..back` is live.
		unsafe {
			slice::from_raw_parts(front.as_ptr(), self.len())
		}
	}

	/// Returns the remaining elements as a mutable slice.
	pub fn as_mut_slice(&mut self) -> &mut [T] {
		// Safety: `front` is within the block.
		let front = unsafe { self.storage.ptr().add(self.front) };
		// Safety: the range `front..back` is live, and uniquely borrowed.
		unsafe {
			slice::from_raw_parts_mut(front.as_ptr(), self.len())
		}
	}

	/// Returns a reference to the underlying allocator.
	pub fn allocator(&self) -> &A {
		self.storage.allocator()
	}
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for IntoIter<T, A> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
	}
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
	type Item = T;

	fn next(&mut self) -> Option<T> {
		if self.front == self.back {
			return None
		}
		let index = self.front;
		self.front += 1;
		// Safety: `index` is within the block.
		let slot = unsafe { self.storage.ptr().add(index) };
		// Safety: the slot is live and leaves the live range, so it is read exactly once.
		Some(unsafe { slot.read() })
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let len = self.back - self.front;
		(len, Some(len))
	}

	fn count(self) -> usize {
		self.len()
	}
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
	fn next_back(&mut self) -> Option<T> {
		if self.front == self.back {
			return None
		}
		self.back -= 1;
		// Safety: `back` is within the block.
		let slot = unsafe { self.storage.ptr().add(self.back) };
		// Safety: the slot is live and leaves the live range, so it is read exactly once.
		Some(unsafe { slot.read() })
	}
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> { }
impl<T, A: Allocator> FusedIterator for IntoIter<T, A> { }

impl<T, A: Allocator> Drop for IntoIter<T, A> {
	fn drop(&mut self) {
		let remaining = self.back - self.front;
		self.back = self.front;
		// Safety: `front` is within the block.
		let front = unsafe { self.storage.ptr().add(self.front) };
		// Safety: the remaining range was live and is now out of the live range. The storage
		//  releases the block after this.
		unsafe {
			uninit::destroy(front, remaining);
		}
	}
}

#[cfg(test)]
mod tests {
	use std::rc::Rc;
	use crate::Vec;

	#[test]
	fn yields_in_order() {
		let vec = Vec::from([1, 2, 3, 4]);
		let mut iter = vec.into_iter();
		assert_eq!(iter.next(), Some(1));
		assert_eq!(iter.next_back(), Some(4));
		assert_eq!(iter.as_slice(), [2, 3]);
		assert_eq!(iter.collect::<std::vec::Vec<_>>(), [2, 3]);
	}

	#[test]
	fn drops_remaining() {
		let rc = Rc::new(());
		let vec: Vec<_> = (0..5).map(|_| Rc::clone(&rc)).collect();
		let mut iter = vec.into_iter();
		drop(iter.next());
		assert_eq!(Rc::strong_count(&rc), 5);
		drop(iter);
		assert_eq!(Rc::strong_count(&rc), 1);
	}
}
