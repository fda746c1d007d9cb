// Copyright 2025 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

//! Opening and closing gaps inside the live range of a block.
//!
//! A shift of the tail by `count` slots splits the tail in two. Elements landing in slots that held
//! nothing live before the shift are *relocated* into them. The remaining elements land on slots
//! the shift itself just vacated, and are *shifted* over them. When the tail is no longer than the
//! gap, everything is relocated.
//!
//! ```text
//! open_gap(pos = 1, count = 2), tail = 4
//!
//!  before: | a | b | c | d | e | . | . |
//!  relocate d, e past the old end:
//!          | a | b | c | ~ | ~ | d | e |
//!  shift b, c right over vacated slots:
//!          | a | ~ | ~ | b | c | d | e |
//!                ^^^^^^^ gap
//! ```

use core::mem;
use core::ptr::NonNull;
use crate::macros::trace;
use crate::raw::uninit;

/// How a tail is split when moved by a gap of some size.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SplicePlan {
	/// Elements moved into slots which held no live element before the move.
	pub relocated: usize,
	/// Elements moved over slots vacated earlier in the same move.
	pub shifted: usize,
}

impl SplicePlan {
	pub const fn new(tail: usize, count: usize) -> Self {
		if tail <= count {
			Self { relocated: tail, shifted: 0 }
		} else {
			Self { relocated: count, shifted: tail - count }
		}
	}
}

/// Moves the tail `[pos, len)` right by `count` slots, leaving `[pos, pos + count)` vacated.
///
/// # Safety
///
/// `[0, len)` must be live, `pos <= len`, and the block must have room for `len + count` slots.
pub unsafe fn open_gap<T>(base: NonNull<T>, pos: usize, len: usize, count: usize) -> SplicePlan {
	let plan = SplicePlan::new(len - pos, count);
	let SplicePlan { relocated, shifted } = plan;
	// The last `relocated` tail elements go past the old end, into fresh slots.
	uninit::relocate(base.add(len - relocated), base.add(len + count - relocated), relocated);
	// The rest slide right over the slots just vacated.
	uninit::shift(base.add(pos), base.add(pos + count), shifted);
	plan
}

/// Moves the tail `[pos + count, len)` left by `count` slots, over the vacated gap
/// `[pos, pos + count)`. The last `count` slots are left vacated.
///
/// # Safety
///
/// `[0, pos)` and `[pos + count, len)` must be live, and `[pos, pos + count)` vacated.
pub unsafe fn close_gap<T>(base: NonNull<T>, pos: usize, len: usize, count: usize) -> SplicePlan {
	let plan = SplicePlan::new(len - pos - count, count);
	let SplicePlan { relocated, shifted } = plan;
	// The first `relocated` tail elements fill the gap directly.
	uninit::relocate(base.add(pos + count), base.add(pos), relocated);
	// The rest slide left over the slots just vacated.
	uninit::shift(base.add(pos + count + relocated), base.add(pos + relocated), shifted);
	plan
}

/// A gap opened in the live range for construction. While the gap is open, the vector length only
/// covers the elements before it. Dropping the gap without [filling](Self::fill) it closes it
/// again, restoring the vector to its state before the gap was opened.
pub struct Gap<'a, T> {
	base: NonNull<T>,
	len: &'a mut usize,
	pos: usize,
	count: usize,
	end: usize,
}

impl<'a, T> Gap<'a, T> {
	/// Opens a gap of `count` vacated slots at `pos`.
	///
	/// # Safety
	///
	/// `len` must be the live length of the block at `base`, `pos <= *len`, and the block must have
	/// room for `*len + count` slots.
	pub unsafe fn open(base: NonNull<T>, len: &'a mut usize, pos: usize, count: usize) -> Self {
		let end = *len;
		let plan = open_gap(base, pos, end, count);
		trace!(pos, count, relocated = plan.relocated, shifted = plan.shifted, "opened gap");
		*len = pos;
		Self { base, len, pos, count, end }
	}

	/// Returns a pointer to the first slot of the gap.
	pub fn start(&self) -> NonNull<T> {
		// Safety: `pos` is within the block.
		unsafe {
			self.base.add(self.pos)
		}
	}

	/// Marks the gap as constructed, extending the length over it and the tail.
	#[allow(clippy::mem_forget)]
	pub fn fill(self) {
		*self.len = self.end + self.count;
		mem::forget(self);
	}
}

impl<T> Drop for Gap<'_, T> {
	fn drop(&mut self) {
		let Self { base, pos, count, end, .. } = *self;
		// Safety: the gap slots were either never constructed, or dropped again by the primitive
		//  that failed to construct them.
		let plan = unsafe { close_gap(base, pos, end + count, count) };
		trace!(pos, count, relocated = plan.relocated, shifted = plan.shifted, "closed unfilled gap");
		*self.len = end;
	}
}

/// A run of elements being erased. While the hole is open, the vector length only covers the
/// elements before it. Dropping the hole closes it, so the vector stays contiguous even if an
/// element destructor panics.
pub struct Hole<'a, T> {
	base: NonNull<T>,
	len: &'a mut usize,
	pos: usize,
	count: usize,
	end: usize,
}

impl<'a, T> Hole<'a, T> {
	/// Marks `count` elements at `pos` as leaving the live range. The caller is then responsible
	/// for dropping or moving them out before the hole is dropped.
	///
	/// # Safety
	///
	/// `len` must be the live length of the block at `base`, and `pos + count <= *len`.
	pub unsafe fn punch(base: NonNull<T>, len: &'a mut usize, pos: usize, count: usize) -> Self {
		let end = *len;
		*len = pos;
		Self { base, len, pos, count, end }
	}

	/// Returns a pointer to the first slot of the hole.
	pub fn start(&self) -> NonNull<T> {
		// Safety: `pos` is within the block.
		unsafe {
			self.base.add(self.pos)
		}
	}
}

impl<T> Drop for Hole<'_, T> {
	fn drop(&mut self) {
		let Self { base, pos, count, end, .. } = *self;
		// Safety: the hole slots have been vacated by the caller, and everything else within
		//  `end` is live.
		let plan = unsafe { close_gap(base, pos, end, count) };
		trace!(pos, count, relocated = plan.relocated, shifted = plan.shifted, "closed hole");
		*self.len = end - count;
	}
}

#[cfg(test)]
mod tests {
	use core::mem::MaybeUninit;
	use super::*;

	fn block<const N: usize>(values: &[u32]) -> [MaybeUninit<u32>; N] {
		let mut buf = [MaybeUninit::new(0); N];
		for (slot, &v) in buf.iter_mut().zip(values) {
			slot.write(v);
		}
		buf
	}

	fn base<const N: usize>(buf: &mut [MaybeUninit<u32>; N]) -> NonNull<u32> {
		NonNull::from(buf).cast()
	}

	fn read<const N: usize>(buf: &[MaybeUninit<u32>; N], range: core::ops::Range<usize>) -> std::vec::Vec<u32> {
		// Safety: the buffer is filled with initialized integers.
		buf[range].iter().map(|v| unsafe { v.assume_init() }).collect()
	}

	#[test]
	fn plan_split() {
		assert_eq!(SplicePlan::new(0, 3), SplicePlan { relocated: 0, shifted: 0 });
		assert_eq!(SplicePlan::new(2, 3), SplicePlan { relocated: 2, shifted: 0 });
		assert_eq!(SplicePlan::new(3, 3), SplicePlan { relocated: 3, shifted: 0 });
		assert_eq!(SplicePlan::new(5, 2), SplicePlan { relocated: 2, shifted: 3 });
	}

	#[test]
	fn open_short_tail() {
		let mut buf = block::<8>(&[1, 2, 3, 4, 5]);
		// Safety: five live elements, room for eight.
		let plan = unsafe { open_gap(base(&mut buf), 3, 5, 3) };
		assert_eq!(plan, SplicePlan { relocated: 2, shifted: 0 });
		assert_eq!(read(&buf, 0..3), [1, 2, 3]);
		assert_eq!(read(&buf, 6..8), [4, 5]);
	}

	#[test]
	fn open_long_tail() {
		let mut buf = block::<8>(&[1, 2, 3, 4, 5, 6]);
		// Safety: six live elements, room for eight.
		let plan = unsafe { open_gap(base(&mut buf), 1, 6, 2) };
		assert_eq!(plan, SplicePlan { relocated: 2, shifted: 3 });
		assert_eq!(read(&buf, 0..1), [1]);
		assert_eq!(read(&buf, 3..8), [2, 3, 4, 5, 6]);
	}

	#[test]
	fn close_short_tail() {
		let mut buf = block::<8>(&[1, 2, 0, 0, 0, 6, 7]);
		// Safety: slots 2..5 are treated as vacated.
		let plan = unsafe { close_gap(base(&mut buf), 2, 7, 3) };
		assert_eq!(plan, SplicePlan { relocated: 2, shifted: 0 });
		assert_eq!(read(&buf, 0..4), [1, 2, 6, 7]);
	}

	#[test]
	fn close_long_tail() {
		let mut buf = block::<8>(&[1, 0, 3, 4, 5, 6, 7, 8]);
		// Safety: slot 1 is treated as vacated.
		let plan = unsafe { close_gap(base(&mut buf), 1, 8, 1) };
		assert_eq!(plan, SplicePlan { relocated: 1, shifted: 5 });
		assert_eq!(read(&buf, 0..7), [1, 3, 4, 5, 6, 7, 8]);
	}

	#[test]
	fn unfilled_gap_restores() {
		let mut buf = block::<8>(&[1, 2, 3, 4]);
		let mut len = 4;
		// Safety: four live elements, room for eight.
		let gap = unsafe { Gap::open(base(&mut buf), &mut len, 1, 3) };
		drop(gap);
		assert_eq!(len, 4);
		assert_eq!(read(&buf, 0..4), [1, 2, 3, 4]);
	}

	#[test]
	fn filled_gap_extends() {
		let mut buf = block::<8>(&[1, 2, 3, 4]);
		let mut len = 4;
		// Safety: four live elements, room for eight.
		let gap = unsafe { Gap::open(base(&mut buf), &mut len, 2, 2) };
		let start = gap.start();
		// Safety: the gap has two uninitialized slots.
		unsafe {
			start.write(10);
		}
		// Safety: likewise.
		let next = unsafe { start.add(1) };
		// Safety: likewise.
		unsafe {
			next.write(11);
		}
		gap.fill();
		assert_eq!(len, 6);
		assert_eq!(read(&buf, 0..6), [1, 2, 10, 11, 3, 4]);
	}

	#[test]
	fn hole_closes() {
		let mut buf = block::<8>(&[1, 2, 3, 4, 5]);
		let mut len = 5;
		// Safety: five live elements; integers need no dropping.
		let hole = unsafe { Hole::punch(base(&mut buf), &mut len, 1, 2) };
		drop(hole);
		assert_eq!(len, 3);
		assert_eq!(read(&buf, 0..3), [1, 4, 5]);
	}
}
