// Copyright 2025 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

//! The storage layer: a single contiguous block of slots obtained from an allocator, and nothing
//! else. Storage never knows how many of its slots hold live elements, so it never constructs or
//! drops them; releasing a block only returns its memory.

use core::marker::PhantomData;
use core::mem;
use core::ptr::NonNull;
use allocator_api2::alloc::{Allocator, Layout};
use crate::error::AllocError;
use crate::internal::TypeSize;
use crate::macros::trace;

pub mod uninit;

/// An owned allocation record: a base pointer and the number of slots behind it.
///
/// A block does not release itself when dropped, as it doesn't hold its allocator. It must be
/// either installed into a [`RawStorage`] or given back with [`RawStorage::release_block`].
/// Ownership moves by value; [`take`](Self::take) leaves an empty record behind.
#[must_use = "blocks must be installed or released, or their memory leaks"]
pub struct Block<T> {
	ptr: Option<NonNull<T>>,
	cap: usize,
	_t: PhantomData<T>,
}

impl<T> Block<T> {
	/// An unallocated block. Zero-sized types have every slot available without allocating.
	pub const fn empty() -> Self {
		Self {
			ptr: None,
			cap: if T::IS_ZST { usize::MAX } else { 0 },
			_t: PhantomData,
		}
	}

	pub const fn capacity(&self) -> usize {
		self.cap
	}

	/// Returns the base slot pointer, or a dangling aligned pointer if the block is unallocated.
	pub const fn ptr(&self) -> NonNull<T> {
		match self.ptr {
			Some(ptr) => ptr,
			None => NonNull::dangling()
		}
	}

	/// Transfers the record out, leaving this block empty.
	pub fn take(&mut self) -> Self {
		mem::replace(self, Self::empty())
	}

	fn layout(&self) -> Option<(NonNull<u8>, Layout)> {
		let ptr = self.ptr?;
		// Safety: the block was allocated with this exact layout, so it can't overflow.
		let layout = unsafe {
			Layout::from_size_align_unchecked(size_of::<T>() * self.cap, align_of::<T>())
		};
		Some((ptr.cast(), layout))
	}
}

impl<T> core::fmt::Debug for Block<T> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Block")
		 .field("ptr", &self.ptr)
		 .field("cap", &self.cap)
		 .finish()
	}
}

/// Returns the layout of a block of `cap` slots. [`Layout::array`] rejects sizes past
/// `isize::MAX` bytes.
pub fn block_layout<T>(cap: usize) -> Result<Layout, AllocError> {
	if cap > T::MAX_SLOTS {
		return Err(AllocError::CapacityOverflow)
	}
	Ok(Layout::array::<T>(cap)?)
}

/// The raw memory owner of a vector: the current [`Block`] and the allocator it came from.
pub struct RawStorage<T, A: Allocator> {
	block: Block<T>,
	alloc: A,
}

impl<T, A: Allocator> RawStorage<T, A> {
	pub const fn new_in(alloc: A) -> Self {
		Self {
			block: Block::empty(),
			alloc,
		}
	}

	pub fn try_with_capacity_in(cap: usize, alloc: A) -> Result<Self, AllocError> {
		let mut storage = Self::new_in(alloc);
		storage.acquire(cap)?;
		Ok(storage)
	}

	#[track_caller]
	pub fn with_capacity_in(cap: usize, alloc: A) -> Self {
		match Self::try_with_capacity_in(cap, alloc) {
			Ok(storage) => storage,
			Err(err) => err.handle()
		}
	}

	pub const fn capacity(&self) -> usize {
		self.block.capacity()
	}

	pub const fn ptr(&self) -> NonNull<T> {
		self.block.ptr()
	}

	pub const fn allocator(&self) -> &A {
		&self.alloc
	}

	/// Replaces the current block with a freshly allocated one of exactly `cap` slots. The current
	/// block is released first; on failure the storage is left empty.
	///
	/// Any elements in the current block are forgotten, not dropped.
	pub fn acquire(&mut self, cap: usize) -> Result<(), AllocError> {
		self.release();
		self.block = self.allocate_block(cap)?;
		Ok(())
	}

	/// Deallocates the held block, leaving the storage empty. No-op if nothing is allocated.
	pub fn release(&mut self) {
		let block = self.block.take();
		// Safety: the block was allocated by this storage's allocator.
		unsafe {
			self.release_block(block);
		}
	}

	/// Swaps the blocks and allocators of two storages without touching their contents.
	pub fn exchange(&mut self, other: &mut Self) {
		mem::swap(self, other);
	}

	/// Allocates a block of exactly `cap` slots from this storage's allocator, without installing
	/// it.
	pub fn allocate_block(&self, cap: usize) -> Result<Block<T>, AllocError> {
		if T::IS_ZST || cap == 0 {
			return Ok(Block::empty())
		}

		let layout = block_layout::<T>(cap)?;
		let Ok(ptr) = self.alloc.allocate(layout) else {
			return Err(AllocError::Alloc { layout })
		};

		trace!(capacity = cap, bytes = layout.size(), "acquired block");
		Ok(Block {
			ptr: Some(ptr.cast()),
			cap,
			_t: PhantomData,
		})
	}

	/// Returns a block's memory to the allocator.
	///
	/// # Safety
	///
	/// The block must have been allocated by this storage's allocator, and must not be the block
	/// currently installed.
	pub unsafe fn release_block(&self, block: Block<T>) {
		let Some((ptr, layout)) = block.layout() else { return };
		trace!(capacity = block.cap, bytes = layout.size(), "released block");
		self.alloc.deallocate(ptr, layout);
	}

	/// Installs `block` as the current block, returning the previous one.
	///
	/// # Safety
	///
	/// The block must have been allocated by this storage's allocator.
	pub unsafe fn replace(&mut self, block: Block<T>) -> Block<T> {
		mem::replace(&mut self.block, block)
	}

	/// Installs `block` as the current block, releasing the previous one.
	///
	/// # Safety
	///
	/// The block must have been allocated by this storage's allocator, and the previous block must
	/// hold no live elements.
	pub unsafe fn install(&mut self, block: Block<T>) {
		let old = mem::replace(&mut self.block, block);
		self.release_block(old);
	}

	/// Allocates a block guarded against leaking if the caller unwinds before committing it.
	pub fn pending(&self, cap: usize) -> Result<Pending<'_, T, A>, AllocError> {
		Ok(Pending {
			storage: self,
			block: self.allocate_block(cap)?,
		})
	}
}

// Safety: the storage uniquely owns its block, like `Box<[T], A>`.
unsafe impl<T: Send, A: Allocator + Send> Send for RawStorage<T, A> { }
// Safety: shared access to the storage only hands out shared access to the block.
unsafe impl<T: Sync, A: Allocator + Sync> Sync for RawStorage<T, A> { }

impl<T, A: Allocator> Drop for RawStorage<T, A> {
	fn drop(&mut self) {
		self.release();
	}
}

/// A freshly allocated block which is released on drop unless [committed](Self::commit).
pub struct Pending<'a, T, A: Allocator> {
	storage: &'a RawStorage<T, A>,
	block: Block<T>,
}

impl<T, A: Allocator> Pending<'_, T, A> {
	pub const fn ptr(&self) -> NonNull<T> {
		self.block.ptr()
	}

	pub fn commit(mut self) -> Block<T> {
		self.block.take()
	}
}

impl<T, A: Allocator> Drop for Pending<'_, T, A> {
	fn drop(&mut self) {
		let block = self.block.take();
		// Safety: the block came from this storage's allocator, and was never installed.
		unsafe {
			self.storage.release_block(block);
		}
	}
}
