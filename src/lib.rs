//! chain-hashmap: a chained hash map and a hash set layered on it, with a
//! deterministic djb2 string hash and fully structural deep copies.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: implement open-chained hashing in safe, verifiable layers so
//!   each piece can be reasoned about independently.
//! - Layers:
//!   - hash_code: renders a key through its `Display` impl and reduces the
//!     bytes with djb2 (seed 5381, multiplier 33, wrapping u32) to a
//!     nonnegative 31-bit code. Pure and deterministic; collisions are
//!     expected and resolved by the layer above.
//!   - ChainHashMap<K, V>: the chained table. Entries live in a `SlotMap`
//!     arena and are linked into per-bucket chains by slot key; buckets
//!     hold chain heads. New entries are prepended, overwrites are in
//!     place, and a load factor strictly above 0.7 doubles the bucket
//!     array by relinking slots in place.
//!   - ChainHashSet<V>: presence set over a private
//!     `ChainHashMap<V, bool>`; adds subset relations, set algebra, and
//!     the crate's only failing operations (`first`/`last` on an empty
//!     set).
//!
//! Constraints
//! - Single-threaded, synchronous; every operation runs to completion
//!   with no background work (rehashing happens inline inside insert).
//! - No shared ownership: `Clone` is a full structural duplicate that
//!   reproduces each chain's traversal order, so two maps never alias.
//! - Missing keys are not an error on any map path: read paths return a
//!   default, `get_or_insert` creates the entry (auto-vivification).
//! - Map equality is structural (bucket count and per-chain positions);
//!   set equality is content-based (mutual subset). The two are distinct
//!   on purpose and must stay that way.
//!
//! Hashing invariants
//! - Each entry stores its precomputed 31-bit code and rehashing indexes
//!   only by the stored code; `Display` and `Eq` on keys never run during
//!   a rehash.
//!
//! Why this split?
//! - Localize invariants: chain linking and growth live in one module,
//!   set algebra never touches table internals (snapshots plus
//!   add/contains only), and the hash function is a leaf with no state.

pub mod chain_hash_map;
mod chain_hash_map_proptest;
pub mod chain_hash_set;
pub mod hash_code;

// Public surface
pub use chain_hash_map::ChainHashMap;
pub use chain_hash_set::{ChainHashSet, EmptyCollection};
pub use hash_code::{hash_code, str_hash_code, HASH_MASK, HASH_MULTIPLIER, HASH_SEED};
