//! djb2 hash codes over a key's canonical textual form.
//!
//! Any key that implements `Display` can be hashed: the key is rendered to
//! its display form and the bytes are folded with Daniel J. Bernstein's
//! djb2 recurrence. The result is reduced to a nonnegative 31-bit code so
//! it survives conversion to signed integer types unchanged. Identical
//! keys always produce identical codes; distinct keys may collide, and the
//! table layer resolves collisions by chaining.

use core::fmt::{self, Display, Write};

/// Accumulator seed for the first cycle.
pub const HASH_SEED: u32 = 5381;
/// Multiplier applied on each cycle.
pub const HASH_MULTIPLIER: u32 = 33;
/// All one bits except the sign bit of an i32.
pub const HASH_MASK: u32 = 0x7FFF_FFFF;

/// Hash a string directly: fold every byte in order with
/// `acc = acc * 33 + byte` under wrapping u32 arithmetic, then reduce
/// modulo `HASH_MASK`. The result lies in `[0, 0x7FFF_FFFE]`.
pub fn str_hash_code(s: &str) -> u32 {
    let mut acc = HASH_SEED;
    for b in s.bytes() {
        acc = acc.wrapping_mul(HASH_MULTIPLIER).wrapping_add(u32::from(b));
    }
    acc % HASH_MASK
}

// Feeds `Display` output straight into the accumulator so hashing a
// non-string key does not allocate an intermediate String.
struct Djb2Writer(u32);

impl Write for Djb2Writer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for b in s.bytes() {
            self.0 = self.0.wrapping_mul(HASH_MULTIPLIER).wrapping_add(u32::from(b));
        }
        Ok(())
    }
}

/// Hash any displayable key through its canonical textual rendering.
///
/// Equivalent to `str_hash_code(&key.to_string())` without the
/// allocation. `Display` impls are infallible, so the write cannot error.
pub fn hash_code<K: Display + ?Sized>(key: &K) -> u32 {
    let mut w = Djb2Writer(HASH_SEED);
    let _ = write!(w, "{key}");
    w.0 % HASH_MASK
}
