// Copyright 2025 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

mod common;

use std::panic::{catch_unwind, AssertUnwindSafe};
use allocvec::error::{AllocError, InsertError, Partial};
use allocvec::Vec;
use common::{values, Counter, Counting, Tracked};

fn tracked_in(counter: &Counter, alloc: &Counting, capacity: usize, values: impl IntoIterator<Item = i32>) -> Vec<Tracked, Counting> {
	let mut vec = Vec::with_capacity_in(capacity, alloc.clone());
	vec.extend(counter.make_all(values));
	vec
}

#[test]
fn panicking_fill_in_place() {
	let counter = Counter::new();
	let alloc = Counting::new();
	let mut vec = tracked_in(&counter, &alloc, 16, 0..4);
	let proto = counter.make(9);
	let ptr = vec.as_ptr();

	counter.reset();
	counter.panic_on_clone(3);
	let result = catch_unwind(AssertUnwindSafe(|| vec.insert_fill(1, 5, &proto)));
	assert!(result.is_err());

	assert_eq!(values(&vec), [0, 1, 2, 3]);
	assert_eq!(vec.as_ptr(), ptr);
	assert_eq!(counter.clones(), 2);
	assert_eq!(counter.drops(), 2);
	assert_eq!(counter.live(), 5);
}

#[test]
fn panicking_copy_while_reallocating() {
	let counter = Counter::new();
	let alloc = Counting::new();
	let mut vec = tracked_in(&counter, &alloc, 4, 0..4);
	let source = counter.make_all(10..15);
	let ptr = vec.as_ptr();
	let outstanding = alloc.outstanding_bytes();

	counter.reset();
	counter.panic_on_clone(4);
	let result = catch_unwind(AssertUnwindSafe(|| vec.insert_slice(2, &source)));
	assert!(result.is_err());

	assert_eq!(values(&vec), [0, 1, 2, 3]);
	assert_eq!(vec.capacity(), 4);
	assert_eq!(vec.as_ptr(), ptr);
	assert_eq!(alloc.outstanding_bytes(), outstanding);
	assert_eq!(alloc.allocations(), alloc.deallocations() + 1);
	assert_eq!(counter.drops(), 3);
	assert_eq!(counter.live(), 9);
}

#[test]
fn panicking_resize() {
	let counter = Counter::new();
	let alloc = Counting::new();
	let mut vec = tracked_in(&counter, &alloc, 2, 0..2);

	counter.panic_on_clone(5);
	let proto = counter.make(7);
	let result = catch_unwind(AssertUnwindSafe(|| vec.resize(10, proto)));
	assert!(result.is_err());

	assert_eq!(values(&vec), [0, 1]);
	assert_eq!(vec.capacity(), 2);
	assert_eq!(counter.live(), 2);
}

#[test]
fn panicking_iterator_insert() {
	let counter = Counter::new();
	let alloc = Counting::new();
	let mut vec = tracked_in(&counter, &alloc, 8, 0..3);

	let result = catch_unwind(AssertUnwindSafe(|| {
		vec.insert_iter(1, (0..4).map(|i| {
			assert!(i < 2, "iterator gave up");
			counter.make(100 + i)
		}))
	}));
	assert!(result.is_err());
	assert_eq!(values(&vec), [0, 1, 2]);
	assert_eq!(counter.live(), 3);
}

#[test]
fn panicking_construction_leaks_nothing() {
	let counter = Counter::new();
	let alloc = Counting::new();
	let proto = counter.make(1);

	counter.panic_on_clone(3);
	let result = catch_unwind(AssertUnwindSafe(|| Vec::from_elem_in(8, &proto, alloc.clone())));
	assert!(result.is_err());
	assert_eq!(alloc.outstanding_bytes(), 0);
	assert_eq!(counter.live(), 1);
}

#[test]
fn panicking_clone_leaves_original() {
	let counter = Counter::new();
	let alloc = Counting::new();
	let vec = tracked_in(&counter, &alloc, 6, 0..6);
	let outstanding = alloc.outstanding_bytes();

	counter.panic_on_clone(6);
	let result = catch_unwind(AssertUnwindSafe(|| vec.clone()));
	assert!(result.is_err());
	assert_eq!(values(&vec), [0, 1, 2, 3, 4, 5]);
	assert_eq!(alloc.outstanding_bytes(), outstanding);
	assert_eq!(counter.live(), 6);
}

#[test]
fn panicking_rebuild_is_strong() {
	let counter = Counter::new();
	let alloc = Counting::new();
	let mut vec = tracked_in(&counter, &alloc, 2, 0..2);
	let source = counter.make_all(10..15);
	let ptr = vec.as_ptr();

	counter.panic_on_clone(4);
	let result = catch_unwind(AssertUnwindSafe(|| vec.assign_slice(&source)));
	assert!(result.is_err());
	assert_eq!(values(&vec), [0, 1]);
	assert_eq!(vec.as_ptr(), ptr);
	assert_eq!(vec.capacity(), 2);
	assert_eq!(counter.live(), 7);
}

#[test]
fn panicking_assignment_changes_nothing() {
	let counter = Counter::new();
	let alloc = Counting::new();
	let mut vec = tracked_in(&counter, &alloc, 8, 0..3);
	let ptr = vec.as_ptr();
	let fits = counter.make_all(10..15);
	let grows = counter.make_all(10..16);
	let live = counter.live();

	// Built in the spare slots, then in a new block.
	for source in [&fits, &grows] {
		counter.panic_on_clone(2);
		let result = catch_unwind(AssertUnwindSafe(|| vec.assign_slice(source)));
		assert!(result.is_err());
		assert_eq!(values(&vec), [0, 1, 2]);
		assert_eq!(vec.as_ptr(), ptr);
		assert_eq!(vec.capacity(), 8);
		assert_eq!(counter.live(), live);
	}

	let other = tracked_in(&counter, &alloc, 3, 10..13);
	counter.panic_on_clone(2);
	let result = catch_unwind(AssertUnwindSafe(|| vec.clone_from(&other)));
	assert!(result.is_err());
	assert_eq!(values(&vec), [0, 1, 2]);

	let proto = counter.make(7);
	counter.panic_on_clone(3);
	let result = catch_unwind(AssertUnwindSafe(|| vec.assign_fill(4, &proto)));
	assert!(result.is_err());
	assert_eq!(values(&vec), [0, 1, 2]);
	assert_eq!(vec.as_ptr(), ptr);

	vec.clone_from(&other);
	assert_eq!(values(&vec), [10, 11, 12]);

	drop((vec, other, proto, fits, grows));
	assert_eq!(counter.live(), 0);
	assert_eq!(alloc.outstanding_bytes(), 0);
}

#[test]
fn panicking_iterator_assignment_changes_nothing() {
	let counter = Counter::new();
	let alloc = Counting::new();
	let mut vec = tracked_in(&counter, &alloc, 4, 0..3);

	let result = catch_unwind(AssertUnwindSafe(|| {
		vec.assign_iter((0..6).map(|i| {
			assert!(i < 4, "iterator gave up");
			counter.make(10 + i)
		}));
	}));
	assert!(result.is_err());
	assert_eq!(values(&vec), [0, 1, 2]);
	assert_eq!(counter.live(), 3);

	vec.assign_iter((0..6).map(|i| counter.make(10 + i)));
	assert_eq!(values(&vec), [10, 11, 12, 13, 14, 15]);
	assert_eq!(counter.live(), 6);
}

#[test]
fn panicking_unsized_iterator_insert() {
	let counter = Counter::new();
	let alloc = Counting::new();
	let mut vec = tracked_in(&counter, &alloc, 4, 0..3);

	let result = catch_unwind(AssertUnwindSafe(|| {
		let evens = (0..6).filter(|&i| {
			assert!(i < 4, "iterator gave up");
			i % 2 == 0
		});
		vec.insert_iter(1, evens.map(|i| counter.make(100 + i)))
	}));
	assert!(result.is_err());
	assert_eq!(values(&vec), [0, 1, 2]);
	assert_eq!(counter.live(), 3);
}

#[test]
fn panicking_extend_keeps_what_was_pushed() {
	let counter = Counter::new();
	let alloc = Counting::new();
	let mut vec = tracked_in(&counter, &alloc, 0, []);
	let source = counter.make_all(0..5);

	counter.panic_on_clone(3);
	let result = catch_unwind(AssertUnwindSafe(|| vec.extend(&source)));
	assert!(result.is_err());
	assert_eq!(values(&vec), [0, 1]);

	drop(vec);
	drop(source);
	assert_eq!(counter.live(), 0);
	assert_eq!(alloc.outstanding_bytes(), 0);
}

#[test]
fn failed_allocation_changes_nothing() {
	let counter = Counter::new();
	let alloc = Counting::new();
	let mut vec = tracked_in(&counter, &alloc, 4, 0..4);
	let ptr = vec.as_ptr();

	alloc.fail_now();
	assert!(matches!(vec.try_push_back(counter.make(4)), Err(AllocError::Alloc { .. })));
	assert!(matches!(vec.try_insert(1, counter.make(5)), Err(AllocError::Alloc { .. })));
	assert!(matches!(vec.try_reserve(5), Err(AllocError::Alloc { .. })));
	assert!(matches!(vec.try_reserve_amortized(5), Err(AllocError::Alloc { .. })));
	assert!(matches!(vec.try_resize(6, counter.make(6)), Err(AllocError::Alloc { .. })));
	assert!(matches!(
		vec.try_insert_with(0, 2, |i| Ok::<_, ()>(counter.make(i as i32))),
		Err(InsertError::Alloc(AllocError::Alloc { .. }))
	));

	assert_eq!(values(&vec), [0, 1, 2, 3]);
	assert_eq!(vec.capacity(), 4);
	assert_eq!(vec.as_ptr(), ptr);
	assert_eq!(counter.live(), 4);

	vec.truncate(2);
	assert!(matches!(vec.try_shrink_to_fit(), Err(AllocError::Alloc { .. })));
	assert_eq!(vec.capacity(), 4);
	assert_eq!(vec.as_ptr(), ptr);

	alloc.heal();
	vec.try_push_back(counter.make(2)).unwrap();
	assert_eq!(values(&vec), [0, 1, 2]);
}

#[test]
fn failed_construction_allocates_nothing() {
	let alloc = Counting::new();
	alloc.fail_now();
	let err = Vec::<u32, _>::try_with_capacity_in(4, alloc.clone()).unwrap_err();
	assert!(matches!(err, AllocError::Alloc { layout } if layout.size() == 16));
	assert_eq!(alloc.allocations(), 0);
}

#[test]
fn allocation_fails_partway() {
	let counter = Counter::new();
	let alloc = Counting::new();
	let mut vec = tracked_in(&counter, &alloc, 1, 0..1);

	alloc.fail_after(2);
	let mut pushed = 1;
	while vec.try_push_back(counter.make(pushed)).is_ok() {
		pushed += 1;
	}
	// Grew to 2, then 4, then the third request failed.
	assert_eq!(pushed, 4);
	assert_eq!(values(&vec), [0, 1, 2, 3]);
	assert_eq!(counter.live(), 4);
}

#[test]
fn fallible_constructors_roll_back() {
	let counter = Counter::new();
	let alloc = Counting::new();

	for capacity in [3, 16] {
		let mut vec = tracked_in(&counter, &alloc, capacity, 0..3);
		let err = vec.try_insert_with(1, 5, |i| {
			if i < 3 { Ok(counter.make(i as i32)) } else { Err("out of values") }
		});
		assert!(matches!(err, Err(InsertError::Construct(Partial { constructed: 3, error: "out of values" }))));
		assert_eq!(values(&vec), [0, 1, 2]);
		assert_eq!(vec.capacity(), capacity);
		assert_eq!(counter.live(), 3);

		let err = vec.try_emplace(0, || Err::<Tracked, _>(1));
		assert!(matches!(err, Err(InsertError::Construct(Partial { constructed: 0, error: 1 }))));
		let err = vec.try_emplace_back(|| Err::<Tracked, _>(2));
		assert!(matches!(err, Err(InsertError::Construct(Partial { constructed: 0, error: 2 }))));
		assert_eq!(values(&vec), [0, 1, 2]);

		let value = vec.try_emplace(1, || Ok::<_, ()>(counter.make(9))).unwrap();
		assert_eq!(value.value, 9);
		assert_eq!(values(&vec), [0, 9, 1, 2]);
	}

	assert_eq!(counter.live(), 0);
	assert_eq!(alloc.outstanding_bytes(), 0);
}
