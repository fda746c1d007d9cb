// Copyright 2025 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code)]

use std::alloc::Layout;
use std::cell::Cell;
use std::fmt;
use std::ptr::NonNull;
use std::rc::Rc;
use allocator_api2::alloc::{AllocError, Allocator, Global};

#[derive(Default)]
struct Stats {
	allocations: Cell<usize>,
	deallocations: Cell<usize>,
	allocated_bytes: Cell<usize>,
	outstanding_bytes: Cell<usize>,
	fail_after: Cell<Option<usize>>,
}

/// An allocator over [`Global`] which counts what passes through it, and can be told to refuse
/// requests. Clones share their counts.
#[derive(Clone, Default)]
pub struct Counting(Rc<Stats>);

impl Counting {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn allocations(&self) -> usize {
		self.0.allocations.get()
	}

	pub fn deallocations(&self) -> usize {
		self.0.deallocations.get()
	}

	/// The total number of bytes ever handed out.
	pub fn allocated_bytes(&self) -> usize {
		self.0.allocated_bytes.get()
	}

	/// The number of bytes handed out and not yet returned.
	pub fn outstanding_bytes(&self) -> usize {
		self.0.outstanding_bytes.get()
	}

	/// Allows `count` more allocations, then refuses every request until [`heal`](Self::heal)ed.
	pub fn fail_after(&self, count: usize) {
		self.0.fail_after.set(Some(count));
	}

	pub fn fail_now(&self) {
		self.fail_after(0);
	}

	pub fn heal(&self) {
		self.0.fail_after.set(None);
	}
}

// Safety: every block comes from `Global` and goes back to it unchanged.
unsafe impl Allocator for Counting {
	fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
		let stats = &self.0;
		if let Some(left) = stats.fail_after.get() {
			if left == 0 {
				return Err(AllocError)
			}
			stats.fail_after.set(Some(left - 1));
		}

		let block = Global.allocate(layout)?;
		stats.allocations.set(stats.allocations.get() + 1);
		stats.allocated_bytes.set(stats.allocated_bytes.get() + layout.size());
		stats.outstanding_bytes.set(stats.outstanding_bytes.get() + layout.size());
		Ok(block)
	}

	unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
		let stats = &self.0;
		stats.deallocations.set(stats.deallocations.get() + 1);
		stats.outstanding_bytes.set(stats.outstanding_bytes.get() - layout.size());
		Global.deallocate(ptr, layout);
	}
}

#[derive(Default)]
struct Ledger {
	live: Cell<isize>,
	clones: Cell<usize>,
	drops: Cell<usize>,
	panic_in: Cell<Option<usize>>,
}

/// Makes [`Tracked`] elements and keeps count of their clones and drops.
#[derive(Clone, Default)]
pub struct Counter(Rc<Ledger>);

impl Counter {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn make(&self, value: i32) -> Tracked {
		let ledger = &self.0;
		ledger.live.set(ledger.live.get() + 1);
		Tracked { value, ledger: Rc::clone(ledger) }
	}

	pub fn make_all(&self, values: impl IntoIterator<Item = i32>) -> Vec<Tracked> {
		values.into_iter().map(|v| self.make(v)).collect()
	}

	/// The number of elements made or cloned and not yet dropped.
	pub fn live(&self) -> isize {
		self.0.live.get()
	}

	pub fn clones(&self) -> usize {
		self.0.clones.get()
	}

	pub fn drops(&self) -> usize {
		self.0.drops.get()
	}

	/// Makes the `k`-th clone from now on panic, counting from one.
	pub fn panic_on_clone(&self, k: usize) {
		assert!(k > 0, "clones are counted from one");
		self.0.panic_in.set(Some(k));
	}

	pub fn reset(&self) {
		self.0.clones.set(0);
		self.0.drops.set(0);
		self.0.panic_in.set(None);
	}
}

/// An element which reports its clones and drops to a [`Counter`].
pub struct Tracked {
	pub value: i32,
	ledger: Rc<Ledger>,
}

impl Clone for Tracked {
	fn clone(&self) -> Self {
		let ledger = &self.ledger;
		if let Some(k) = ledger.panic_in.get() {
			if k == 1 {
				ledger.panic_in.set(None);
				panic!("refused to clone {}", self.value);
			}
			ledger.panic_in.set(Some(k - 1));
		}

		ledger.clones.set(ledger.clones.get() + 1);
		ledger.live.set(ledger.live.get() + 1);
		Self { value: self.value, ledger: Rc::clone(ledger) }
	}
}

impl Drop for Tracked {
	fn drop(&mut self) {
		let ledger = &self.ledger;
		ledger.drops.set(ledger.drops.get() + 1);
		ledger.live.set(ledger.live.get() - 1);
		assert!(ledger.live.get() >= 0, "element {} dropped twice", self.value);
	}
}

impl PartialEq for Tracked {
	fn eq(&self, other: &Self) -> bool {
		self.value == other.value
	}
}

impl PartialEq<i32> for Tracked {
	fn eq(&self, other: &i32) -> bool {
		self.value == *other
	}
}

impl fmt::Debug for Tracked {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&self.value, f)
	}
}

/// Returns the values of a run of tracked elements.
pub fn values(elements: &[Tracked]) -> Vec<i32> {
	elements.iter().map(|e| e.value).collect()
}
