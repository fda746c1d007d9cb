// Copyright 2025 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};
use allocator_api2::alloc::Allocator;
use super::Vec;

macro_rules! gen_eq {
	() => { };
	($lhs:ty, $rhs:ty;$($next:tt)*) => {
		gen_eq! { $lhs, $rhs [A: Allocator];$($next)* }
	};
	($lhs:ty, $rhs:ty [$($params:tt)+];$($next:tt)*) => {
		impl<T: PartialEq<U>, U, $($params)+> PartialEq<$rhs> for $lhs {
			fn eq(&self, other: &$rhs) -> bool { self[..] == other[..] }
		}
		gen_eq! { $($next)* }
	};
}

gen_eq! {
	Vec<T, A1>, Vec<U, A2> [A1: Allocator, A2: Allocator];
	Vec<T, A>, &[U];
	Vec<T, A>, &mut [U];
	&[T], Vec<U, A>;
	&mut [T], Vec<U, A>;
	Vec<T, A>, [U];
	[T], Vec<U, A>;
	Vec<T, A>, [U; N]      [A: Allocator, const N: usize];
	Vec<T, A>, &[U; N]     [A: Allocator, const N: usize];
	[T; N], Vec<U, A>      [A: Allocator, const N: usize];
	&[T; N], Vec<U, A>     [A: Allocator, const N: usize];
}

impl<T: Eq, A: Allocator> Eq for Vec<T, A> { }

impl<T: PartialOrd, A1: Allocator, A2: Allocator> PartialOrd<Vec<T, A2>> for Vec<T, A1> {
	fn partial_cmp(&self, other: &Vec<T, A2>) -> Option<Ordering> {
		PartialOrd::partial_cmp(&**self, &**other)
	}
}

impl<T: Ord, A: Allocator> Ord for Vec<T, A> {
	fn cmp(&self, other: &Self) -> Ordering {
		Ord::cmp(&**self, &**other)
	}
}

impl<T: Hash, A: Allocator> Hash for Vec<T, A> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		Hash::hash(&**self, state)
	}
}

#[cfg(test)]
mod tests {
	use core::cmp::Ordering;
	use crate::Vec;

	#[test]
	fn equality() {
		let a = Vec::from([1, 2, 3]);
		let b = Vec::from([1, 2, 3]);
		assert_eq!(a, b);
		assert_eq!(a, [1, 2, 3]);
		assert_eq!([1, 2, 3], a);
		assert_eq!(a, &[1, 2, 3][..]);
		assert_ne!(a, [1, 2]);
	}

	#[test]
	fn lexicographic() {
		let a = Vec::from([1, 2, 3]);
		assert_eq!(a.cmp(&Vec::from([1, 2, 4])), Ordering::Less);
		assert_eq!(a.cmp(&Vec::from([1, 2])), Ordering::Greater);
		assert_eq!(a.cmp(&Vec::from([1, 2, 3])), Ordering::Equal);
		assert!(Vec::<i32>::new() < a);
	}
}
