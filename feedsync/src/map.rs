#[cfg(not(feature = "std"))]
use alloc::collections::{BTreeMap, BTreeSet};
#[cfg(feature = "std")]
use std::collections::{HashMap, HashSet};

use crate::ItemId;

#[cfg(feature = "std")]
pub(crate) type IdMap<V> = HashMap<ItemId, V>;
#[cfg(not(feature = "std"))]
pub(crate) type IdMap<V> = BTreeMap<ItemId, V>;

#[cfg(feature = "std")]
pub(crate) type IdSet = HashSet<ItemId>;
#[cfg(not(feature = "std"))]
pub(crate) type IdSet = BTreeSet<ItemId>;
