// Copyright 2025 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(
	clippy::alloc_instead_of_core,
	clippy::as_pointer_underscore,
	clippy::as_underscore,
	clippy::assertions_on_result_states,
	clippy::clone_on_ref_ptr,
	clippy::decimal_literal_representation,
	clippy::deref_by_slicing,
	clippy::else_if_without_else,
	clippy::empty_drop,
	clippy::empty_enum_variants_with_brackets,
	clippy::empty_structs_with_brackets,
	clippy::error_impl_error,
	clippy::exhaustive_enums,
	clippy::field_scoped_visibility_modifiers,
	clippy::if_then_some_else_none,
	clippy::impl_trait_in_params,
	clippy::infinite_loop,
	clippy::map_err_ignore,
	clippy::mem_forget,
	clippy::missing_assert_message,
	clippy::missing_errors_doc,
	clippy::missing_panics_doc,
	clippy::missing_safety_doc,
	clippy::multiple_unsafe_ops_per_block,
	clippy::panic,
	clippy::partial_pub_fields,
	clippy::redundant_type_annotations,
	clippy::ref_patterns,
	clippy::renamed_function_params,
	clippy::semicolon_inside_block,
	clippy::std_instead_of_alloc,
	clippy::std_instead_of_core,
	clippy::undocumented_unsafe_blocks,
	clippy::unwrap_used,
)]

//! # `allocvec`
//!
//! `allocvec` provides [`Vec`], a contiguous growable array generic over its [`Allocator`], with
//! explicit rules for when elements are constructed, moved, and dropped.
//!
//! - Every growing operation has a `try_` form returning an [`AllocError`]. A failed allocation
//!   never changes the vector.
//! - Insertions and assignments are strongly exception-safe. If an element constructor panics or
//!   returns an error, the elements it already built are dropped and the vector is restored,
//!   whether or not the operation needed a new block.
//! - Capacity grows to the next power of two when elements are added, and exactly when reserved.
//! - Positions are slot indices. [`Iter`](vec::Iter) and [`IterMut`](vec::IterMut) report theirs
//!   with `offset`, and a mutable iterator widens into a read-only one.
//!
//! Allocators come from [`allocator-api2`], which mirrors the unstable standard allocator API on
//! stable Rust. [`Global`] is the default.
//!
//! ```
//! use allocvec::Vec;
//!
//! let mut vec = Vec::from([1, 2, 3, 4, 5]);
//! vec.insert(2, 99);
//! assert_eq!(vec, [1, 2, 99, 3, 4, 5]);
//!
//! vec.erase(2);
//! vec.resize(3, 0);
//! assert_eq!(vec, [1, 2, 3]);
//! ```
//!
//! # Features
//!
//! - `std` (default): enables the standard library support of `allocator-api2`. The error types
//!   implement [`core::error::Error`] either way.
//! - `tracing`: emits trace-level events under the `allocvec` target when blocks are acquired,
//!   released, or reallocated, when gaps are opened and closed, and when a failed construction is
//!   rolled back.
//!
//! [`allocator-api2`]: allocator_api2
//! [`AllocError`]: error::AllocError

extern crate alloc;

pub mod error;
mod internal;
mod macros;
mod raw;
pub mod vec;

pub use allocator_api2::alloc::{Allocator, Global};
pub use vec::Vec;

pub mod prelude {
	pub use crate::error::{AllocError, InsertError, OutOfRange};
	pub use crate::vec::Vec;
	pub use allocator_api2::alloc::{Allocator, Global};
}
