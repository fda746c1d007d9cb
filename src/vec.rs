// Copyright 2025 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

//! A contiguous, growable array generic over its allocator.
//!
//! # Slots
//!
//! A vector owns a single block of *slots*. The first [`len`](Vec::len) slots hold live elements in
//! sequence order; the slots after them up to [`capacity`](Vec::capacity) are uninitialized. Every
//! mutation either constructs into uninitialized slots, drops live ones, or moves elements between
//! them, and the vector length only ever covers slots that are live.
//!
//! # Growth
//!
//! Operations that add elements reserve *amortized* capacity: when the block is too small, the new
//! capacity is the smallest power of two at least as large as the required length. A run of `k`
//! appends thus moves *O*(k) elements in total. [`reserve`](Vec::reserve) and the constructors
//! allocate exactly what they are asked for instead.
//!
//! When an insertion must reallocate, the inserted elements are constructed into the new block
//! *before* any existing element is moved. If construction fails, the new block is released and
//! the vector is untouched.
//!
//! # Positions
//!
//! Positions are slot indices. Operations which would return "an iterator to" an element return its
//! index instead, and the [`Iter`] and [`IterMut`] iterators report their position with `offset`.
//! Any operation which reallocates or shifts elements invalidates earlier positions past the point
//! of the change.
//!
//! # Failure
//!
//! Growing operations come in pairs: an infallible form which panics (or calls
//! [`handle_alloc_error`]) when the allocator fails, and a `try_` form returning an [`AllocError`].
//! A failed allocation never changes the vector. Panics from element constructors such as [`Clone`]
//! or [`Default`] unwind through guards which drop exactly the elements built by the failed call and
//! restore the vector. Assignments build every new element before dropping an old one, so they
//! also either complete or leave the vector as it was. Explicitly fallible constructors are accepted by [`try_emplace`],
//! [`try_emplace_back`], and [`try_insert_with`], which roll back the same way and return the
//! constructor's error.
//!
//! [`handle_alloc_error`]: alloc::alloc::handle_alloc_error
//! [`try_emplace`]: Vec::try_emplace
//! [`try_emplace_back`]: Vec::try_emplace_back
//! [`try_insert_with`]: Vec::try_insert_with

use core::borrow::{Borrow, BorrowMut};
use core::convert::Infallible;
use core::fmt;
use core::mem::{self, ManuallyDrop};
use core::ops::{Deref, DerefMut, Index, IndexMut, RangeBounds};
use core::ptr::NonNull;
use core::slice::{self, SliceIndex};
use allocator_api2::alloc::{Allocator, Global};
use crate::error::{AllocError, InsertError, OutOfRange, Partial};
use crate::internal::{slice_range, TypeSize};
use crate::macros::{bounds_failed, trace};
use crate::raw::{uninit, RawStorage};
use source::{Defaults, Emplace, Fill, One, Slice, Source, With};
use splice::{Gap, Hole};

mod eq;
mod into_iter;
mod iter;
mod source;
mod splice;

pub use into_iter::IntoIter;
pub use iter::{Iter, IterMut};

/// A contiguous, growable array whose block comes from an [`Allocator`].
///
/// See the [module documentation](self) for the growth and failure rules shared by all operations.
pub struct Vec<T, A: Allocator = Global> {
	storage: RawStorage<T, A>,
	len: usize,
}

impl<T> Vec<T> {
	/// Creates a new, empty vector. No memory is allocated until elements are added.
	///
	/// # Examples
	///
	/// ```
	/// use allocvec::Vec;
	///
	/// let vec: Vec<i32> = Vec::new();
	/// assert!(vec.is_empty());
	/// assert_eq!(vec.capacity(), 0);
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self::new_in(Global)
	}

	/// Creates a new, empty vector with space for exactly `capacity` elements. If the capacity is
	/// zero, nothing is allocated.
	///
	/// A vector of zero-sized elements never allocates, and its capacity is always [`usize::MAX`].
	///
	/// # Panics
	///
	/// Panics if the capacity exceeds [`isize::MAX`] bytes.
	///
	/// # Examples
	///
	/// ```
	/// use allocvec::Vec;
	///
	/// let mut vec: Vec<i32> = Vec::with_capacity(10);
	/// assert_eq!(vec.len(), 0);
	/// assert_eq!(vec.capacity(), 10);
	///
	/// // These can be pushed without reallocating
	/// for i in 0..10 {
	///     vec.push_back(i);
	/// }
	/// assert_eq!(vec.capacity(), 10);
	///
	/// // Pushing one more doubles the capacity
	/// vec.push_back(10);
	/// assert_eq!(vec.capacity(), 16);
	///
	/// let units: Vec<()> = Vec::with_capacity(10);
	/// assert_eq!(units.capacity(), usize::MAX);
	/// ```
	#[must_use]
	#[track_caller]
	pub fn with_capacity(capacity: usize) -> Self {
		Self::with_capacity_in(capacity, Global)
	}

	/// Creates a vector of `count` clones of `value`.
	///
	/// # Panics
	///
	/// Panics if allocation fails.
	///
	/// # Examples
	///
	/// ```
	/// use allocvec::Vec;
	///
	/// let vec = Vec::from_elem(3, &"a");
	/// assert_eq!(vec, ["a", "a", "a"]);
	/// ```
	#[must_use]
	#[track_caller]
	pub fn from_elem(count: usize, value: &T) -> Self where T: Clone {
		Self::from_elem_in(count, value, Global)
	}

	/// Creates a vector of `count` default values.
	///
	/// # Panics
	///
	/// Panics if allocation fails.
	#[must_use]
	#[track_caller]
	pub fn from_default(count: usize) -> Self where T: Default {
		Self::from_default_in(count, Global)
	}
}

impl<T, A: Allocator> Vec<T, A> {
	/// Creates a new, empty vector in the given allocator. No memory is allocated until elements
	/// are added.
	///
	/// # Examples
	///
	/// ```
	/// use allocvec::{Global, Vec};
	///
	/// let vec: Vec<i32, _> = Vec::new_in(Global);
	/// assert!(vec.is_empty());
	/// ```
	#[must_use]
	pub const fn new_in(alloc: A) -> Self {
		Self {
			storage: RawStorage::new_in(alloc),
			len: 0,
		}
	}

	/// Creates a new, empty vector with space for exactly `capacity` elements in the given
	/// allocator.
	///
	/// # Panics
	///
	/// Panics if the capacity exceeds [`isize::MAX`] bytes, or if allocation fails.
	#[must_use]
	#[track_caller]
	pub fn with_capacity_in(capacity: usize, alloc: A) -> Self {
		Self {
			storage: RawStorage::with_capacity_in(capacity, alloc),
			len: 0,
		}
	}

	/// Creates a new, empty vector with space for exactly `capacity` elements in the given
	/// allocator, returning an error if allocation fails.
	///
	/// # Errors
	///
	/// Returns [`AllocError::CapacityOverflow`] if the capacity exceeds [`isize::MAX`] bytes, or
	/// [`AllocError::Alloc`] if the allocator fails.
	///
	/// # Examples
	///
	/// ```
	/// use allocvec::{Global, Vec};
	/// use allocvec::error::AllocError;
	///
	/// let vec = Vec::<u64, _>::try_with_capacity_in(8, Global).unwrap();
	/// assert_eq!(vec.capacity(), 8);
	///
	/// let err = Vec::<u64, _>::try_with_capacity_in(usize::MAX, Global).unwrap_err();
	/// assert_eq!(err, AllocError::CapacityOverflow);
	/// ```
	pub fn try_with_capacity_in(capacity: usize, alloc: A) -> Result<Self, AllocError> {
		Ok(Self {
			storage: RawStorage::try_with_capacity_in(capacity, alloc)?,
			len: 0,
		})
	}

	/// Creates a vector of `count` clones of `value` in the given allocator.
	///
	/// # Panics
	///
	/// Panics if allocation fails.
	#[must_use]
	#[track_caller]
	pub fn from_elem_in(count: usize, value: &T, alloc: A) -> Self where T: Clone {
		infallible(Self::try_from_source_in(count, Fill(value), alloc))
	}

	/// Creates a vector of `count` default values in the given allocator.
	///
	/// # Panics
	///
	/// Panics if allocation fails.
	#[must_use]
	#[track_caller]
	pub fn from_default_in(count: usize, alloc: A) -> Self where T: Default {
		infallible(Self::try_from_source_in(count, Defaults, alloc))
	}

	/// Creates a vector of clones of each element of `values` in the given allocator, with a
	/// capacity of exactly `values.len()`.
	///
	/// # Panics
	///
	/// Panics if allocation fails.
	///
	/// # Examples
	///
	/// ```
	/// use allocvec::{Global, Vec};
	///
	/// let vec = Vec::from_slice_in(&[1, 2, 3], Global);
	/// assert_eq!(vec, [1, 2, 3]);
	/// assert_eq!(vec.capacity(), 3);
	/// ```
	#[must_use]
	#[track_caller]
	pub fn from_slice_in(values: &[T], alloc: A) -> Self where T: Clone {
		infallible(Self::try_from_source_in(values.len(), Slice(values), alloc))
	}

	/// Clones the vector into another allocator. The clone's capacity is exactly its length.
	///
	/// # Panics
	///
	/// Panics if allocation fails.
	///
	/// # Examples
	///
	/// ```
	/// use allocvec::{Global, Vec};
	///
	/// let vec = Vec::from([1, 2, 3]);
	/// let mut copy = vec.clone_in(Global);
	/// copy.push_back(4);
	/// assert_eq!(vec, [1, 2, 3]);
	/// assert_eq!(copy, [1, 2, 3, 4]);
	/// ```
	#[must_use]
	#[track_caller]
	pub fn clone_in<B: Allocator>(&self, alloc: B) -> Vec<T, B> where T: Clone {
		Vec::from_slice_in(self, alloc)
	}

	/// Moves the elements into a block from another allocator, releasing the current block. The
	/// new capacity is exactly the length.
	///
	/// Allocators cannot be compared, so the elements are always relocated, even when `alloc`
	/// would hand out the same memory.
	///
	/// # Panics
	///
	/// Panics if allocation fails. The elements are dropped with the vector in that case.
	///
	/// # Examples
	///
	/// ```
	/// use allocvec::{Global, Vec};
	///
	/// let mut vec = Vec::with_capacity(10);
	/// vec.push_back(1);
	/// let vec = vec.into_allocator(Global);
	/// assert_eq!(vec, [1]);
	/// assert_eq!(vec.capacity(), 1);
	/// ```
	#[must_use]
	#[track_caller]
	pub fn into_allocator<B: Allocator>(mut self, alloc: B) -> Vec<T, B> {
		let mut target = Vec::with_capacity_in(self.len, alloc);
		// Safety: the target has room for every live element, and the source slots are vacated by
		//  resetting the length before the source is dropped.
		unsafe {
			uninit::relocate(self.storage.ptr(), target.storage.ptr(), self.len);
		}
		target.len = mem::replace(&mut self.len, 0);
		trace!(moved = target.len, "relocated into another allocator");
		target
	}

	/// Returns a reference to the allocator.
	pub const fn allocator(&self) -> &A {
		self.storage.allocator()
	}

	/// Returns the number of elements in the vector.
	pub const fn len(&self) -> usize {
		self.len
	}

	/// Returns `true` if the vector contains no elements.
	pub const fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Returns the number of elements the vector can hold without reallocating. This is always
	/// [`usize::MAX`] for zero-sized elements.
	pub const fn capacity(&self) -> usize {
		self.storage.capacity()
	}

	/// Returns the largest length a vector of this element type could ever reach.
	///
	/// # Examples
	///
	/// ```
	/// use allocvec::Vec;
	///
	/// assert_eq!(Vec::<u16>::new().max_len(), isize::MAX as usize / 2);
	/// assert_eq!(Vec::<()>::new().max_len(), usize::MAX);
	/// ```
	pub const fn max_len(&self) -> usize {
		T::MAX_SLOTS
	}

	/// Returns a pointer to the first slot. If nothing is allocated, this is dangling but aligned,
	/// and must never be dereferenced.
	pub const fn data(&self) -> NonNull<T> {
		self.storage.ptr()
	}

	/// Returns a raw pointer to the first slot, valid for reads of [`len`](Self::len) elements until
	/// the vector is next mutated.
	pub const fn as_ptr(&self) -> *const T {
		self.storage.ptr().as_ptr()
	}

	/// Returns a raw pointer to the first slot, valid for reads and writes of
	/// [`len`](Self::len) elements until the vector is next reallocated.
	pub fn as_mut_ptr(&mut self) -> *mut T {
		self.storage.ptr().as_ptr()
	}

	/// Returns a slice over the vector contents. Equivalent to `&vec[..]`.
	pub fn as_slice(&self) -> &[T] {
		// Safety: the first `len` slots are live.
		unsafe {
			slice::from_raw_parts(self.as_ptr(), self.len)
		}
	}

	/// Returns a mutable slice over the vector contents. Equivalent to `&mut vec[..]`.
	pub fn as_mut_slice(&mut self) -> &mut [T] {
		let len = self.len;
		// Safety: the first `len` slots are live, and uniquely borrowed.
		unsafe {
			slice::from_raw_parts_mut(self.as_mut_ptr(), len)
		}
	}

	/// Returns a reference to the element at `index`, or an error if it is out of bounds.
	///
	/// # Errors
	///
	/// Returns [`OutOfRange`] if `index` is not less than the length.
	///
	/// # Examples
	///
	/// ```
	/// use allocvec::Vec;
	/// use allocvec::error::OutOfRange;
	///
	/// let vec = Vec::from([1, 2, 3]);
	/// assert_eq!(vec.at(1), Ok(&2));
	/// assert_eq!(vec.at(3), Err(OutOfRange { index: 3, len: 3 }));
	/// ```
	pub fn at(&self, index: usize) -> Result<&T, OutOfRange> {
		let len = self.len;
		self.as_slice().get(index).ok_or(OutOfRange { index, len })
	}

	/// Returns a mutable reference to the element at `index`, or an error if it is out of bounds.
	///
	/// # Errors
	///
	/// Returns [`OutOfRange`] if `index` is not less than the length.
	pub fn at_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange> {
		let len = self.len;
		self.as_mut_slice().get_mut(index).ok_or(OutOfRange { index, len })
	}

	/// Returns the first element, or `None` if the vector is empty.
	pub fn front(&self) -> Option<&T> {
		self.as_slice().first()
	}

	/// Returns the last element, or `None` if the vector is empty.
	pub fn back(&self) -> Option<&T> {
		self.as_slice().last()
	}

	pub fn front_mut(&mut self) -> Option<&mut T> {
		self.as_mut_slice().first_mut()
	}

	pub fn back_mut(&mut self) -> Option<&mut T> {
		self.as_mut_slice().last_mut()
	}

	/// Returns an iterator over the elements, which reports its slot position with
	/// [`Iter::offset`].
	///
	/// # Examples
	///
	/// ```
	/// use allocvec::Vec;
	///
	/// let vec = Vec::from([2, 4, 6, 8, 10]);
	/// let reversed: Vec<_> = vec.iter().rev().copied().collect();
	/// assert_eq!(reversed, [10, 8, 6, 4, 2]);
	/// ```
	pub fn iter(&self) -> Iter<'_, T> {
		Iter::new(self.as_slice())
	}

	/// Returns an iterator over mutable references to the elements. It can be widened into a
	/// read-only [`Iter`] at any point.
	pub fn iter_mut(&mut self) -> IterMut<'_, T> {
		IterMut::new(self.as_mut_slice())
	}

	/// Reserves capacity for exactly `capacity` elements in total. Does nothing if the capacity is
	/// already sufficient; the block and every element stay where they are in that case.
	///
	/// # Panics
	///
	/// Panics if the capacity exceeds [`isize::MAX`] bytes, or if allocation fails.
	///
	/// # Examples
	///
	/// ```
	/// use allocvec::Vec;
	///
	/// let mut vec = Vec::from([1]);
	/// vec.reserve(10);
	/// assert_eq!(vec.capacity(), 10);
	///
	/// let ptr = vec.as_ptr();
	/// vec.reserve(5);
	/// assert_eq!(vec.capacity(), 10);
	/// assert_eq!(vec.as_ptr(), ptr);
	/// ```
	#[track_caller]
	pub fn reserve(&mut self, capacity: usize) {
		if let Err(err) = self.try_reserve(capacity) {
			err.handle()
		}
	}

	/// Reserves capacity for exactly `capacity` elements in total, returning an error if
	/// allocation fails. The vector is unchanged on failure.
	///
	/// # Errors
	///
	/// Returns [`AllocError::CapacityOverflow`] if the capacity exceeds [`isize::MAX`] bytes, or
	/// [`AllocError::Alloc`] if the allocator fails.
	pub fn try_reserve(&mut self, capacity: usize) -> Result<(), AllocError> {
		if capacity <= self.capacity() {
			return Ok(())
		}
		self.try_reallocate(capacity)
	}

	/// Reserves capacity for at least `capacity` elements in total, rounding up to the next power
	/// of two. Does nothing if the capacity is already sufficient.
	///
	/// # Panics
	///
	/// Panics if the capacity exceeds [`isize::MAX`] bytes, or if allocation fails.
	///
	/// # Examples
	///
	/// ```
	/// use allocvec::Vec;
	///
	/// let mut vec: Vec<u8> = Vec::new();
	/// vec.reserve_amortized(5);
	/// assert_eq!(vec.capacity(), 8);
	/// ```
	#[track_caller]
	pub fn reserve_amortized(&mut self, capacity: usize) {
		if let Err(err) = self.try_reserve_amortized(capacity) {
			err.handle()
		}
	}

	/// Reserves capacity for at least `capacity` elements in total, rounding up to the next power
	/// of two, returning an error if allocation fails. The vector is unchanged on failure.
	///
	/// # Errors
	///
	/// Returns [`AllocError::CapacityOverflow`] if the capacity exceeds [`isize::MAX`] bytes, or
	/// [`AllocError::Alloc`] if the allocator fails.
	pub fn try_reserve_amortized(&mut self, capacity: usize) -> Result<(), AllocError> {
		if capacity <= self.capacity() {
			return Ok(())
		}
		self.try_reallocate(amortized_capacity::<T>(capacity)?)
	}

	/// Shrinks the capacity to exactly the length, releasing the block entirely if the vector is
	/// empty.
	///
	/// # Panics
	///
	/// Panics if allocation fails.
	///
	/// # Examples
	///
	/// ```
	/// use allocvec::Vec;
	///
	/// let mut vec = Vec::with_capacity(10);
	/// vec.extend([1, 2, 3]);
	/// vec.shrink_to_fit();
	/// assert_eq!(vec.capacity(), 3);
	/// ```
	#[track_caller]
	pub fn shrink_to_fit(&mut self) {
		if let Err(err) = self.try_shrink_to_fit() {
			err.handle()
		}
	}

	/// Shrinks the capacity to exactly the length, returning an error if allocation fails. The
	/// vector is unchanged on failure.
	///
	/// # Errors
	///
	/// Returns [`AllocError::Alloc`] if the allocator fails.
	pub fn try_shrink_to_fit(&mut self) -> Result<(), AllocError> {
		if T::IS_ZST || self.capacity() == self.len {
			return Ok(())
		}
		self.try_reallocate(self.len)
	}

	/// Drops all elements, keeping the capacity.
	pub fn clear(&mut self) {
		self.truncate(0);
	}

	/// Shortens the vector to `len` elements, dropping the rest. Does nothing if `len` is not less
	/// than the current length. The capacity is kept.
	///
	/// # Examples
	///
	/// ```
	/// use allocvec::Vec;
	///
	/// let mut vec = Vec::from([1, 2, 3, 4, 5]);
	/// vec.truncate(2);
	/// assert_eq!(vec, [1, 2]);
	/// vec.truncate(8);
	/// assert_eq!(vec, [1, 2]);
	/// ```
	pub fn truncate(&mut self, len: usize) {
		let Some(count) = self.len.checked_sub(len) else { return };
		self.len = len;
		// Safety: the new length is within the block.
		let tail = unsafe { self.storage.ptr().add(len) };
		// Safety: the slots past the new length were live, and are out of the live range now.
		unsafe {
			uninit::destroy(tail, count);
		}
	}

	/// Inserts `value` at `pos`, shifting the elements after it to the right. Returns the position
	/// of the inserted element.
	///
	/// # Panics
	///
	/// Panics if `pos` is greater than the length, or if allocation fails.
	///
	/// # Examples
	///
	/// ```
	/// use allocvec::Vec;
	///
	/// let mut vec = Vec::from([1, 2, 3, 4, 5]);
	/// assert_eq!(vec.insert(2, 99), 2);
	/// assert_eq!(vec, [1, 2, 99, 3, 4, 5]);
	///
	/// // Inserting at the end is the same as pushing
	/// vec.insert(6, 6);
	/// assert_eq!(vec.back(), Some(&6));
	/// ```
	#[track_caller]
	pub fn insert(&mut self, pos: usize, value: T) -> usize {
		self.check_insert(pos);
		infallible(self.try_splice_in(pos, 1, One(value)));
		pos
	}

	/// Inserts `value` at `pos`, returning an error if allocation fails. The vector is unchanged
	/// on failure, and `value` is dropped.
	///
	/// # Errors
	///
	/// Returns an [`AllocError`] if the vector must grow and allocation fails.
	///
	/// # Panics
	///
	/// Panics if `pos` is greater than the length.
	#[track_caller]
	pub fn try_insert(&mut self, pos: usize, value: T) -> Result<usize, AllocError> {
		self.check_insert(pos);
		self.try_splice_in(pos, 1, One(value)).map_err(alloc_error)?;
		Ok(pos)
	}

	/// Inserts `count` clones of `value` at `pos`, returning the position of the first.
	///
	/// If a clone panics, the clones already made are dropped and the vector is restored.
	///
	/// # Panics
	///
	/// Panics if `pos` is greater than the length, or if allocation fails.
	///
	/// # Examples
	///
	/// ```
	/// use allocvec::Vec;
	///
	/// let mut vec = Vec::from([1, 2]);
	/// vec.insert_fill(1, 3, &0);
	/// assert_eq!(vec, [1, 0, 0, 0, 2]);
	/// ```
	#[track_caller]
	pub fn insert_fill(&mut self, pos: usize, count: usize, value: &T) -> usize where T: Clone {
		self.check_insert(pos);
		infallible(self.try_splice_in(pos, count, Fill(value)));
		pos
	}

	/// Inserts clones of each element of `values` at `pos`, returning the position of the first.
	///
	/// # Panics
	///
	/// Panics if `pos` is greater than the length, or if allocation fails.
	///
	/// # Examples
	///
	/// ```
	/// use allocvec::Vec;
	///
	/// let mut vec = Vec::from([1, 5]);
	/// vec.insert_slice(1, &[2, 3, 4]);
	/// assert_eq!(vec, [1, 2, 3, 4, 5]);
	/// ```
	#[track_caller]
	pub fn insert_slice(&mut self, pos: usize, values: &[T]) -> usize where T: Clone {
		self.check_insert(pos);
		infallible(self.try_splice_in(pos, values.len(), Slice(values)));
		pos
	}

	/// Inserts the elements of an iterator at `pos`, returning the position of the first.
	///
	/// If the iterator's size hint is exact, that many elements are constructed straight into a gap
	/// at `pos`, and any excess is left in the iterator. Otherwise the elements are appended at the
	/// back, then rotated into place. Either way, a panicking iterator leaves the vector unchanged.
	///
	/// # Panics
	///
	/// Panics if `pos` is greater than the length, or if allocation fails. Also panics if the
	/// iterator yields fewer elements than its exact size hint, after restoring the vector.
	///
	/// # Examples
	///
	/// ```
	/// use allocvec::Vec;
	///
	/// let mut vec = Vec::from([0, 4]);
	/// vec.insert_iter(1, 1..4);
	/// assert_eq!(vec, [0, 1, 2, 3, 4]);
	///
	/// vec.insert_iter(0, (5..10).filter(|v| v % 2 == 1));
	/// assert_eq!(vec, [5, 7, 9, 0, 1, 2, 3, 4]);
	/// ```
	#[track_caller]
	pub fn insert_iter<I: IntoIterator<Item = T>>(&mut self, pos: usize, iter: I) -> usize {
		self.check_insert(pos);
		let iter = iter.into_iter();
		let (lower, upper) = iter.size_hint();
		if upper != Some(lower) {
			let count = self.stage(iter);
			self.as_mut_slice()[pos..].rotate_right(count);
			return pos
		}

		match self.try_splice_in(pos, lower, source::Iter(iter)) {
			Ok(()) => pos,
			Err(InsertError::Alloc(err)) => err.handle(),
			Err(InsertError::Construct(Partial { constructed, .. })) =>
				iter_exhausted(constructed, lower)
		}
	}

	/// Inserts `count` elements built by a fallible constructor at `pos`, returning the position of
	/// the first. The constructor receives the index of each element within the inserted run.
	///
	/// # Errors
	///
	/// Returns [`InsertError::Alloc`] if allocation fails, or [`InsertError::Construct`] with the
	/// constructor's first error. The vector is unchanged on either error, and any elements built
	/// before the error have been dropped.
	///
	/// # Panics
	///
	/// Panics if `pos` is greater than the length.
	///
	/// # Examples
	///
	/// ```
	/// use allocvec::Vec;
	///
	/// let mut vec = Vec::from([0, 9]);
	/// vec.try_insert_with(1, 3, |i| Ok::<_, ()>(i + 1)).unwrap();
	/// assert_eq!(vec, [0, 1, 2, 3, 9]);
	///
	/// let err = vec.try_insert_with(1, 3, |i| if i < 2 { Ok(0) } else { Err("nope") });
	/// assert!(err.is_err());
	/// assert_eq!(vec, [0, 1, 2, 3, 9]);
	/// ```
	#[track_caller]
	pub fn try_insert_with<E, F>(&mut self, pos: usize, count: usize, construct: F) -> Result<usize, InsertError<E>>
	where
		F: FnMut(usize) -> Result<T, E>
	{
		self.check_insert(pos);
		self.try_splice_in(pos, count, With(construct))?;
		Ok(pos)
	}

	/// Inserts the value returned by `construct` at `pos`, returning a reference to it.
	///
	/// # Panics
	///
	/// Panics if `pos` is greater than the length, or if allocation fails.
	#[track_caller]
	pub fn emplace<F: FnOnce() -> T>(&mut self, pos: usize, construct: F) -> &mut T {
		self.check_insert(pos);
		infallible(self.try_splice_in(pos, 1, Emplace(|| Ok::<_, Infallible>(construct()))));
		&mut self.as_mut_slice()[pos]
	}

	/// Inserts the value returned by a fallible constructor at `pos`, returning a reference to it.
	///
	/// # Errors
	///
	/// Returns [`InsertError::Alloc`] if allocation fails, or [`InsertError::Construct`] with the
	/// constructor's error. The vector is unchanged on either error.
	///
	/// # Panics
	///
	/// Panics if `pos` is greater than the length.
	#[track_caller]
	pub fn try_emplace<E, F>(&mut self, pos: usize, construct: F) -> Result<&mut T, InsertError<E>>
	where
		F: FnOnce() -> Result<T, E>
	{
		self.check_insert(pos);
		self.try_splice_in(pos, 1, Emplace(construct))?;
		Ok(&mut self.as_mut_slice()[pos])
	}

	/// Removes the element at `pos`, shifting the elements after it to the left. Returns the
	/// position following the removed element, which is now `pos` itself.
	///
	/// # Panics
	///
	/// Panics if `pos` is not less than the length.
	///
	/// # Examples
	///
	/// ```
	/// use allocvec::Vec;
	///
	/// let mut vec = Vec::from([1, 2, 99, 3, 4, 5]);
	/// assert_eq!(vec.erase(2), 2);
	/// assert_eq!(vec, [1, 2, 3, 4, 5]);
	/// ```
	#[track_caller]
	pub fn erase(&mut self, pos: usize) -> usize {
		if pos >= self.len {
			bounds_failed!("removal", pos, "<", self.len);
		}
		self.erase_range(pos..=pos)
	}

	/// Removes the elements in `range`, shifting the elements after it to the left. Returns the
	/// position following the removed range, which is now its start. An empty range is a no-op.
	///
	/// # Panics
	///
	/// Panics if the range is decreasing or extends past the length.
	///
	/// # Examples
	///
	/// ```
	/// use allocvec::Vec;
	///
	/// let mut vec = Vec::from([1, 2, 3, 4, 5, 6]);
	/// assert_eq!(vec.erase_range(1..4), 1);
	/// assert_eq!(vec, [1, 5, 6]);
	///
	/// assert_eq!(vec.erase_range(0..0), 0);
	/// assert_eq!(vec, [1, 5, 6]);
	/// ```
	#[track_caller]
	pub fn erase_range<R: RangeBounds<usize>>(&mut self, range: R) -> usize {
		let range = slice_range(range, self.len);
		let (pos, count) = (range.start, range.len());
		if count == 0 {
			return pos
		}
		if range.end == self.len {
			self.truncate(pos);
			return pos
		}

		let base = self.storage.ptr();
		// Safety: the range is within the live length. The hole closes over it when dropped, even
		//  if a destructor panics.
		let hole = unsafe { Hole::punch(base, &mut self.len, pos, count) };
		// Safety: the erased elements are out of the live range, and dropped only here.
		unsafe {
			uninit::destroy(hole.start(), count);
		}
		pos
	}

	/// Removes and returns the element at `pos`, shifting the elements after it to the left.
	///
	/// # Panics
	///
	/// Panics if `pos` is not less than the length.
	///
	/// # Examples
	///
	/// ```
	/// use allocvec::Vec;
	///
	/// let mut vec = Vec::from(['a', 'b', 'c']);
	/// assert_eq!(vec.remove(1), 'b');
	/// assert_eq!(vec, ['a', 'c']);
	/// ```
	#[track_caller]
	pub fn remove(&mut self, pos: usize) -> T {
		if pos >= self.len {
			bounds_failed!("removal", pos, "<", self.len);
		}

		let base = self.storage.ptr();
		// Safety: `pos` is live. The hole closes over it when dropped.
		let hole = unsafe { Hole::punch(base, &mut self.len, pos, 1) };
		// Safety: the value is moved out before the hole closes over its slot.
		unsafe {
			hole.start().read()
		}
	}

	/// Appends `value` to the back of the vector.
	///
	/// # Panics
	///
	/// Panics if allocation fails.
	///
	/// # Examples
	///
	/// ```
	/// use allocvec::Vec;
	///
	/// let mut vec = Vec::new();
	/// vec.push_back(1);
	/// vec.push_back(2);
	/// assert_eq!(vec, [1, 2]);
	/// ```
	#[track_caller]
	pub fn push_back(&mut self, value: T) {
		let len = self.len;
		infallible(self.try_splice_in(len, 1, One(value)));
	}

	/// Appends `value` to the back of the vector, returning an error if allocation fails. The vector
	/// is unchanged on failure, and `value` is dropped.
	///
	/// # Errors
	///
	/// Returns an [`AllocError`] if the vector must grow and allocation fails.
	pub fn try_push_back(&mut self, value: T) -> Result<(), AllocError> {
		let len = self.len;
		self.try_splice_in(len, 1, One(value)).map_err(alloc_error)
	}

	/// Appends the value returned by `construct`, returning a reference to it.
	///
	/// # Panics
	///
	/// Panics if allocation fails.
	///
	/// # Examples
	///
	/// ```
	/// use allocvec::Vec;
	///
	/// let mut vec = Vec::from([1]);
	/// *vec.emplace_back(|| 2) += 10;
	/// assert_eq!(vec, [1, 12]);
	/// ```
	#[track_caller]
	pub fn emplace_back<F: FnOnce() -> T>(&mut self, construct: F) -> &mut T {
		let len = self.len;
		self.emplace(len, construct)
	}

	/// Appends the value returned by a fallible constructor, returning a reference to it.
	///
	/// # Errors
	///
	/// Returns [`InsertError::Alloc`] if allocation fails, or [`InsertError::Construct`] with the
	/// constructor's error. The vector is unchanged on either error.
	pub fn try_emplace_back<E, F>(&mut self, construct: F) -> Result<&mut T, InsertError<E>>
	where
		F: FnOnce() -> Result<T, E>
	{
		let len = self.len;
		self.try_emplace(len, construct)
	}

	/// Removes and returns the last element, or `None` if the vector is empty.
	pub fn pop_back(&mut self) -> Option<T> {
		self.len = self.len.checked_sub(1)?;
		// Safety: the slot is within the block.
		let last = unsafe { self.storage.ptr().add(self.len) };
		// Safety: the slot was live and just left the live range.
		Some(unsafe { last.read() })
	}

	/// Resizes the vector to `len` elements, appending clones of `value` or dropping elements from
	/// the back as needed.
	///
	/// # Panics
	///
	/// Panics if allocation fails.
	///
	/// # Examples
	///
	/// ```
	/// use allocvec::Vec;
	///
	/// let mut vec = Vec::from([1, 2, 3, 4, 5]);
	/// vec.resize(3, 0);
	/// assert_eq!(vec, [1, 2, 3]);
	/// vec.resize(5, 7);
	/// assert_eq!(vec, [1, 2, 3, 7, 7]);
	/// ```
	#[track_caller]
	pub fn resize(&mut self, len: usize, value: T) where T: Clone {
		if let Err(err) = self.try_resize(len, value) {
			err.handle()
		}
	}

	/// Resizes the vector to `len` elements, returning an error if allocation fails. The vector is
	/// unchanged on failure.
	///
	/// # Errors
	///
	/// Returns an [`AllocError`] if the vector must grow and allocation fails.
	pub fn try_resize(&mut self, len: usize, value: T) -> Result<(), AllocError> where T: Clone {
		let current = self.len;
		if len <= current {
			self.truncate(len);
			return Ok(())
		}
		self.try_splice_in(current, len - current, Fill(&value)).map_err(alloc_error)
	}

	/// Resizes the vector to `len` elements, appending default values or dropping elements from
	/// the back as needed.
	///
	/// # Panics
	///
	/// Panics if allocation fails.
	#[track_caller]
	pub fn resize_default(&mut self, len: usize) where T: Default {
		let current = self.len;
		if len <= current {
			self.truncate(len);
		} else {
			infallible(self.try_splice_in(current, len - current, Defaults));
		}
	}

	/// Resizes the vector to `len` elements, appending values returned by `fill` or dropping
	/// elements from the back as needed.
	///
	/// # Panics
	///
	/// Panics if allocation fails.
	///
	/// # Examples
	///
	/// ```
	/// use allocvec::Vec;
	///
	/// let mut next = 0;
	/// let mut vec = Vec::new();
	/// vec.resize_with(4, || { next += 1; next });
	/// assert_eq!(vec, [1, 2, 3, 4]);
	/// ```
	#[track_caller]
	pub fn resize_with<F: FnMut() -> T>(&mut self, len: usize, mut fill: F) {
		let current = self.len;
		if len <= current {
			self.truncate(len);
		} else {
			infallible(self.try_splice_in(current, len - current, With(|_| Ok::<_, Infallible>(fill()))));
		}
	}

	/// Exchanges the contents, blocks, and allocators of two vectors. No element is moved.
	///
	/// To swap two elements instead, go through [`as_mut_slice`](Self::as_mut_slice), as in
	/// `vec.as_mut_slice().swap(a, b)`.
	///
	/// # Examples
	///
	/// ```
	/// use allocvec::Vec;
	///
	/// let mut a = Vec::from([1, 2]);
	/// let mut b = Vec::from([3]);
	/// a.swap(&mut b);
	/// assert_eq!(a, [3]);
	/// assert_eq!(b, [1, 2]);
	/// ```
	pub fn swap(&mut self, other: &mut Self) {
		self.storage.exchange(&mut other.storage);
		mem::swap(&mut self.len, &mut other.len);
	}

	/// Replaces the contents with `count` clones of `value`.
	///
	/// The new elements are built completely before any old element is dropped, so a panicking
	/// clone leaves the vector unchanged. If the spare slots past the live range can hold `count`
	/// elements, they are built there and the old elements are erased from the front. Otherwise a
	/// new block is built, at least as large as the current one.
	///
	/// # Panics
	///
	/// Panics if allocation fails.
	///
	/// # Examples
	///
	/// ```
	/// use allocvec::Vec;
	///
	/// let mut vec = Vec::from([1, 2, 3]);
	/// vec.assign_fill(2, &9);
	/// assert_eq!(vec, [9, 9]);
	/// vec.assign_fill(5, &4);
	/// assert_eq!(vec, [4, 4, 4, 4, 4]);
	/// ```
	#[track_caller]
	pub fn assign_fill(&mut self, count: usize, value: &T) where T: Clone {
		infallible(self.try_assign(count, Fill(value)));
	}

	/// Replaces the contents with clones of each element of `values`, following the same rules as
	/// [`assign_fill`](Self::assign_fill).
	///
	/// # Panics
	///
	/// Panics if allocation fails.
	///
	/// # Examples
	///
	/// ```
	/// use allocvec::Vec;
	///
	/// let mut vec = Vec::from([1, 2, 3]);
	/// vec.assign_slice(&[4, 5]);
	/// assert_eq!(vec, [4, 5]);
	/// ```
	#[track_caller]
	pub fn assign_slice(&mut self, values: &[T]) where T: Clone {
		infallible(self.try_assign(values.len(), Slice(values)));
	}

	/// Replaces the contents with the elements of an iterator.
	///
	/// The elements are appended after the old ones first, growing the vector as needed, then the
	/// old elements are erased from the front. If the iterator panics, or allocation fails, the
	/// appended elements are dropped and the contents are unchanged.
	///
	/// # Panics
	///
	/// Panics if allocation fails.
	///
	/// # Examples
	///
	/// ```
	/// use allocvec::Vec;
	///
	/// let mut vec = Vec::from([1, 2, 3]);
	/// vec.assign_iter((4..10).filter(|v| v % 2 == 0));
	/// assert_eq!(vec, [4, 6, 8]);
	/// ```
	#[track_caller]
	pub fn assign_iter<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		let len = self.len;
		self.stage(iter);
		self.erase_range(..len);
	}

	#[track_caller]
	fn check_insert(&self, pos: usize) {
		if pos > self.len {
			bounds_failed!("insertion", pos, "<=", self.len);
		}
	}

	/// Replaces the contents with `count` elements from `source`, building all of them before any
	/// old element is dropped. On failure, nothing changes.
	fn try_assign<S: Source<T>>(&mut self, count: usize, source: S) -> Result<(), InsertError<S::Error>> {
		let len = self.len;
		let fits = len.checked_add(count).is_some_and(|required| required <= self.capacity());
		if !fits {
			return self.try_rebuild(count, source)
		}

		self.try_splice_in(len, count, source)?;
		self.erase_range(..len);
		Ok(())
	}

	/// Appends the elements of `iter`, returning how many were appended. If the iterator panics, or
	/// allocation fails, the appended elements are dropped before unwinding.
	#[track_caller]
	fn stage<I: IntoIterator<Item = T>>(&mut self, iter: I) -> usize {
		let keep = self.len;
		let mut staged = Staged { vec: self, keep };
		staged.vec.extend(iter);
		staged.finish()
	}

	/// Moves every element into a new block of exactly `capacity` slots, then releases the old one.
	fn try_reallocate(&mut self, capacity: usize) -> Result<(), AllocError> {
		debug_assert!(capacity >= self.len, "reallocation should keep every element");
		let len = self.len;
		let from = self.capacity();
		let pending = self.storage.pending(capacity)?;
		// Safety: the new block has room for every live element. The old slots are vacated, and
		//  only released afterward.
		unsafe {
			uninit::relocate(self.storage.ptr(), pending.ptr(), len);
		}
		let block = pending.commit();
		// Safety: the block was allocated by this storage. The old one no longer holds anything.
		unsafe {
			self.storage.install(block);
		}
		trace!(from, to = capacity, moved = len, "reallocated");
		Ok(())
	}

	/// Constructs `count` elements from `source` into a run opened at `pos`.
	///
	/// If the block is too small, the run is constructed into a new, amortized block first, then
	/// the elements before and after `pos` are relocated around it. Otherwise, a gap is opened in
	/// place and constructed into. Either way, a construction failure or panic leaves the vector as
	/// it was before the call.
	fn try_splice_in<S: Source<T>>(&mut self, pos: usize, count: usize, source: S) -> Result<(), InsertError<S::Error>> {
		debug_assert!(pos <= self.len, "splice position should be within the live range");
		if count == 0 {
			return Ok(())
		}

		let len = self.len;
		let required = len.checked_add(count).ok_or(AllocError::CapacityOverflow)?;
		if required <= self.capacity() {
			let base = self.storage.ptr();
			// Safety: the block has room for `required` slots. An unfilled gap closes on drop,
			//  including when the source panics.
			let gap = unsafe { Gap::open(base, &mut self.len, pos, count) };
			// Safety: the gap is `count` uninitialized slots.
			unsafe { source.construct(gap.start(), count) }?;
			gap.fill();
			return Ok(())
		}

		let from = self.capacity();
		let capacity = amortized_capacity::<T>(required)?;
		let pending = self.storage.pending(capacity)?;
		let (src, dst) = (self.storage.ptr(), pending.ptr());
		// Safety: the new block has room for `required` slots.
		let run = unsafe { dst.add(pos) };
		// Safety: the run `[pos, pos + count)` in the new block is uninitialized. A failed or
		//  panicking source drops what it built, and the pending block is released on drop.
		unsafe { source.construct(run, count) }?;
		// Safety: the new block has room for the elements before the run, and the old slots are
		//  vacated by the move.
		unsafe {
			uninit::relocate(src, dst, pos);
		}
		// Safety: `pos` is within the live range.
		let src_tail = unsafe { src.add(pos) };
		// Safety: the run ends within the new block.
		let dst_tail = unsafe { run.add(count) };
		// Safety: likewise for the elements after the run.
		unsafe {
			uninit::relocate(src_tail, dst_tail, len - pos);
		}
		let block = pending.commit();
		// Safety: the block was allocated by this storage. The old one no longer holds anything.
		unsafe {
			self.storage.install(block);
		}
		self.len = required;
		trace!(from, to = capacity, moved = len, "reallocated");
		Ok(())
	}

	/// Builds `count` elements from `source` into a new block, amortized and no smaller than the
	/// current one, then drops the current elements and releases the old block. On failure, nothing
	/// changes.
	fn try_rebuild<S: Source<T>>(&mut self, count: usize, source: S) -> Result<(), InsertError<S::Error>> {
		let capacity = amortized_capacity::<T>(count)?.max(self.capacity());
		let pending = self.storage.pending(capacity)?;
		// Safety: the new block has room for `count` uninitialized slots.
		unsafe { source.construct(pending.ptr(), count) }?;
		let block = pending.commit();
		let len = mem::replace(&mut self.len, count);
		// Safety: the block was allocated by this storage.
		let old = unsafe { self.storage.replace(block) };
		// Safety: the old elements are out of the live range, and dropped only here.
		unsafe {
			uninit::destroy(old.ptr(), len);
		}
		// Safety: the old block no longer holds anything, and is not installed.
		unsafe {
			self.storage.release_block(old);
		}
		trace!(dropped = len, built = count, to = capacity, "rebuilt");
		Ok(())
	}

	fn try_from_source_in<S: Source<T>>(count: usize, source: S, alloc: A) -> Result<Self, InsertError<S::Error>> {
		let mut vec = Self::try_with_capacity_in(count, alloc)?;
		vec.try_splice_in(0, count, source)?;
		Ok(vec)
	}
}

/// Truncates a vector back to `keep` elements when dropped, unless [`finish`](Self::finish)ed.
struct Staged<'a, T, A: Allocator> {
	vec: &'a mut Vec<T, A>,
	keep: usize,
}

impl<T, A: Allocator> Staged<'_, T, A> {
	/// Keeps the staged elements, returning how many there are.
	#[allow(clippy::mem_forget)]
	fn finish(self) -> usize {
		let count = self.vec.len - self.keep;
		mem::forget(self);
		count
	}
}

impl<T, A: Allocator> Drop for Staged<'_, T, A> {
	fn drop(&mut self) {
		self.vec.truncate(self.keep);
	}
}

/// Returns the capacity to grow to for `required` slots: the next power of two, clamped to the
/// largest slot count the element type allows.
fn amortized_capacity<T>(required: usize) -> Result<usize, AllocError> {
	if required > T::MAX_SLOTS {
		return Err(AllocError::CapacityOverflow)
	}
	let capacity = required.checked_next_power_of_two().unwrap_or(usize::MAX);
	Ok(capacity.min(T::MAX_SLOTS))
}

#[track_caller]
fn infallible<R>(result: Result<R, InsertError<Infallible>>) -> R {
	match result {
		Ok(value) => value,
		Err(err) => alloc_error(err).handle()
	}
}

fn alloc_error(error: InsertError<Infallible>) -> AllocError {
	match error {
		InsertError::Alloc(err) => err,
		InsertError::Construct(Partial { error, .. }) => match error { }
	}
}

#[allow(clippy::panic)]
#[cold]
#[inline(never)]
#[track_caller]
fn iter_exhausted(yielded: usize, reported: usize) -> ! {
	panic!("iterator yielded {yielded} elements, fewer than its reported length of {reported}");
}

impl<T, A: Allocator> Drop for Vec<T, A> {
	fn drop(&mut self) {
		self.truncate(0);
	}
}

impl<T, A: Allocator> Deref for Vec<T, A> {
	type Target = [T];

	fn deref(&self) -> &[T] {
		self.as_slice()
	}
}

impl<T, A: Allocator> DerefMut for Vec<T, A> {
	fn deref_mut(&mut self) -> &mut [T] {
		self.as_mut_slice()
	}
}

impl<T, I: SliceIndex<[T]>, A: Allocator> Index<I> for Vec<T, A> {
	type Output = I::Output;

	fn index(&self, index: I) -> &I::Output {
		Index::index(self.as_slice(), index)
	}
}

impl<T, I: SliceIndex<[T]>, A: Allocator> IndexMut<I> for Vec<T, A> {
	fn index_mut(&mut self, index: I) -> &mut I::Output {
		IndexMut::index_mut(self.as_mut_slice(), index)
	}
}

impl<T: Clone, A: Allocator + Clone> Clone for Vec<T, A> {
	fn clone(&self) -> Self {
		self.clone_in(self.allocator().clone())
	}

	/// Assigns clones of the elements of `source`, keeping this vector's own allocator. See
	/// [`assign_slice`](Vec::assign_slice).
	fn clone_from(&mut self, source: &Self) {
		self.assign_slice(source);
	}
}

impl<T, A: Allocator + Default> Default for Vec<T, A> {
	fn default() -> Self {
		Self::new_in(A::default())
	}
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for Vec<T, A> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.as_slice()).finish()
	}
}

impl<T, A: Allocator> AsRef<[T]> for Vec<T, A> {
	fn as_ref(&self) -> &[T] {
		self
	}
}

impl<T, A: Allocator> AsMut<[T]> for Vec<T, A> {
	fn as_mut(&mut self) -> &mut [T] {
		self
	}
}

impl<T, A: Allocator> Borrow<[T]> for Vec<T, A> {
	fn borrow(&self) -> &[T] {
		self
	}
}

impl<T, A: Allocator> BorrowMut<[T]> for Vec<T, A> {
	fn borrow_mut(&mut self) -> &mut [T] {
		self
	}
}

impl<T, A: Allocator> Extend<T> for Vec<T, A> {
	fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		let iter = iter.into_iter();
		let (lower, _) = iter.size_hint();
		self.reserve_amortized(self.len.saturating_add(lower));
		for value in iter {
			self.push_back(value);
		}
	}
}

impl<'a, T: Clone + 'a, A: Allocator> Extend<&'a T> for Vec<T, A> {
	fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
		self.extend(iter.into_iter().cloned());
	}
}

impl<T> FromIterator<T> for Vec<T> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		let mut vec = Self::new();
		vec.extend(iter);
		vec
	}
}

impl<T, A: Allocator> IntoIterator for Vec<T, A> {
	type Item = T;
	type IntoIter = IntoIter<T, A>;

	fn into_iter(self) -> IntoIter<T, A> {
		IntoIter::new(self)
	}
}

impl<'a, T, A: Allocator> IntoIterator for &'a Vec<T, A> {
	type Item = &'a T;
	type IntoIter = Iter<'a, T>;

	fn into_iter(self) -> Iter<'a, T> {
		self.iter()
	}
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut Vec<T, A> {
	type Item = &'a mut T;
	type IntoIter = IterMut<'a, T>;

	fn into_iter(self) -> IterMut<'a, T> {
		self.iter_mut()
	}
}

impl<T, const N: usize> From<[T; N]> for Vec<T> {
	#[track_caller]
	fn from(value: [T; N]) -> Self {
		let mut vec = Self::with_capacity(N);
		let value = ManuallyDrop::new(value);
		// Safety: the array is never dropped, so each element moves into the vector exactly once.
		unsafe {
			uninit::relocate(NonNull::from(&*value).cast(), vec.storage.ptr(), N);
		}
		vec.len = N;
		vec
	}
}

impl<T: Clone> From<&[T]> for Vec<T> {
	#[track_caller]
	fn from(value: &[T]) -> Self {
		Self::from_slice_in(value, Global)
	}
}

impl<T: Clone> From<&mut [T]> for Vec<T> {
	#[track_caller]
	fn from(value: &mut [T]) -> Self {
		Self::from_slice_in(value, Global)
	}
}

impl<T: Clone, const N: usize> From<&[T; N]> for Vec<T> {
	#[track_caller]
	fn from(value: &[T; N]) -> Self {
		Self::from_slice_in(value, Global)
	}
}
