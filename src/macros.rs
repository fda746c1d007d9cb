// Copyright 2025 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

/// Emits a `tracing` event at the trace level when the `tracing` feature is enabled. Otherwise the
/// fields are only borrowed, so they count as used either way.
#[cfg(feature = "tracing")]
macro_rules! trace {
	($($args:tt)+) => {
		::tracing::trace!(target: "allocvec", $($args)+)
	};
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
	(@field $key:ident = $value:expr) => { $value };
	(@field $key:ident) => { $key };
	($($key:ident $(= $value:expr)?),+ , $message:literal) => {
		$(let _ = &trace!(@field $key $(= $value)?);)+
	};
}

/// Panics with a message describing an out-of-bounds position, outlined to keep the panic path out
/// of the hot code.
macro_rules! bounds_failed {
	($what:literal, $index:expr, $op:literal, $len:expr) => {{
		#[allow(clippy::panic)]
		#[cold]
		#[inline(never)]
		#[track_caller]
		fn assert_failed(index: usize, len: usize) -> ! {
			panic!(concat!($what, " index (is {}) should be ", $op, " len (is {})"), index, len);
		}

		assert_failed($index, $len)
	}};
}

pub(crate) use {bounds_failed, trace};
