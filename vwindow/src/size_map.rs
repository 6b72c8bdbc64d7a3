#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

/// Sparse index → measured size storage.
#[cfg(feature = "std")]
pub(crate) type SizeMap = HashMap<usize, f64>;
#[cfg(not(feature = "std"))]
pub(crate) type SizeMap = BTreeMap<usize, f64>;
