// Copyright 2025 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

use core::ops::{Bound, Range, RangeBounds};
use crate::macros::bounds_failed;

pub trait TypeSize: Sized {
	const IS_ZST: bool = size_of::<Self>() == 0;
	/// The largest slot count whose block size still fits in `isize`.
	const MAX_SLOTS: usize = if Self::IS_ZST {
		usize::MAX
	} else {
		isize::MAX as usize / size_of::<Self>()
	};
}

impl<T> TypeSize for T { }

/// Resolves `range` against a length of `len`, panicking if it is decreasing or out of bounds.
#[track_caller]
pub fn slice_range<R: RangeBounds<usize>>(range: R, len: usize) -> Range<usize> {
	#[allow(clippy::panic)]
	#[cold]
	#[inline(never)]
	#[track_caller]
	fn order_failed(start: usize, end: usize) -> ! {
		panic!("range start (is {start}) should be <= range end (is {end})");
	}

	#[allow(clippy::panic)]
	#[cold]
	#[inline(never)]
	#[track_caller]
	fn overflow_failed() -> ! {
		panic!("range bound overflows usize");
	}

	let start = match range.start_bound() {
		Bound::Included(&start) => start,
		Bound::Excluded(&start) => start.checked_add(1).unwrap_or_else(|| overflow_failed()),
		Bound::Unbounded => 0,
	};
	let end = match range.end_bound() {
		Bound::Included(&end) => end.checked_add(1).unwrap_or_else(|| overflow_failed()),
		Bound::Excluded(&end) => end,
		Bound::Unbounded => len,
	};

	if start > end {
		order_failed(start, end);
	}
	if end > len {
		bounds_failed!("range end", end, "<=", len);
	}
	start..end
}
