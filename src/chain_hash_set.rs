//! ChainHashSet: a presence set layered on the chained map.

use crate::chain_hash_map::{self, ChainHashMap};
use core::fmt::{self, Debug, Display};
use core::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

/// Error returned by [`ChainHashSet::first`] and [`ChainHashSet::last`]
/// on an empty set. The only failing operation in the crate; everything
/// else is total.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct EmptyCollection;

impl Display for EmptyCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("set is empty")
    }
}

impl std::error::Error for EmptyCollection {}

/// A set of distinct values backed by a private `ChainHashMap<V, bool>`,
/// where the boolean payload is a presence sentinel (always `true`) and
/// is never read semantically.
///
/// Unlike the backing map, whose equality is structural, set equality is
/// content-based: two sets are equal when each is a subset of the other,
/// regardless of how their backing tables grew. Iteration follows the
/// map's bucket/chain order and is not sorted.
pub struct ChainHashSet<V> {
    map: ChainHashMap<V, bool>,
}

impl<V> ChainHashSet<V>
where
    V: Eq + Display,
{
    pub fn new() -> Self {
        Self {
            map: ChainHashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Add `value`; returns whether it was newly added.
    pub fn add(&mut self, value: V) -> bool {
        self.map.insert(value, true).is_none()
    }

    /// Remove `value`; returns whether it was present. Absent values are
    /// a no-op, not an error.
    pub fn remove(&mut self, value: &V) -> bool {
        self.map.remove(value).is_some()
    }

    pub fn contains(&self, value: &V) -> bool {
        self.map.contains_key(value)
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Iterate elements in the backing map's bucket/chain order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            inner: self.map.iter(),
        }
    }

    /// Snapshot of the elements in iteration order.
    pub fn elements(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.map.keys()
    }

    /// True when every element of this set is contained in `other`.
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.iter().all(|v| other.contains(v))
    }

    /// True when every element of `other` is contained in this set.
    pub fn is_superset_of(&self, other: &Self) -> bool {
        other.is_subset_of(self)
    }

    /// First element of the snapshot in its current iteration order.
    ///
    /// The backing store is unordered, so this is *not* a sorted minimum;
    /// it is whichever element the bucket/chain walk reaches first.
    pub fn first(&self) -> Result<V, EmptyCollection>
    where
        V: Clone,
    {
        self.iter().next().cloned().ok_or(EmptyCollection)
    }

    /// Last element of the snapshot in its current iteration order. Like
    /// [`first`](Self::first), not a sorted maximum.
    pub fn last(&self) -> Result<V, EmptyCollection>
    where
        V: Clone,
    {
        self.iter().last().cloned().ok_or(EmptyCollection)
    }
}

// Set algebra. Everything below is defined purely in terms of
// add/contains/remove over element snapshots; nothing reaches into the
// table's buckets.
impl<V> ChainHashSet<V>
where
    V: Eq + Display + Clone,
{
    /// New set holding every element that appears in either set.
    pub fn union(&self, other: &Self) -> Self {
        let mut out = self.clone();
        for v in other.iter() {
            if !out.contains(v) {
                // UFCS: `out.add(..)` on an owned set would resolve to the
                // `Add` operator impl with `ops::Add` in scope.
                ChainHashSet::add(&mut out, v.clone());
            }
        }
        out
    }

    /// New set holding every element that appears in both sets.
    pub fn intersection(&self, other: &Self) -> Self {
        let mut out = Self::new();
        for v in self.iter() {
            if other.contains(v) {
                ChainHashSet::add(&mut out, v.clone());
            }
        }
        out
    }

    /// New set holding every element of `self` that is not in `other`.
    pub fn difference(&self, other: &Self) -> Self {
        let mut out = Self::new();
        for v in self.iter() {
            if !other.contains(v) {
                ChainHashSet::add(&mut out, v.clone());
            }
        }
        out
    }

    /// In-place union; rewrites `self` with the immutable result.
    pub fn union_with(&mut self, other: &Self) {
        *self = self.union(other);
    }

    /// In-place intersection; rewrites `self` with the immutable result.
    pub fn intersect_with(&mut self, other: &Self) {
        *self = self.intersection(other);
    }

    /// In-place difference; rewrites `self` with the immutable result.
    pub fn difference_with(&mut self, other: &Self) {
        *self = self.difference(other);
    }
}

impl<V> Default for ChainHashSet<V>
where
    V: Eq + Display,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for ChainHashSet<V>
where
    V: Eq + Display + Clone,
{
    fn clone(&self) -> Self {
        Self {
            map: self.map.clone(),
        }
    }
}

/// Content equality by mutual subset containment. Deliberately not the
/// backing map's structural equality: sets with identical elements but
/// divergent table layouts still compare equal.
impl<V> PartialEq for ChainHashSet<V>
where
    V: Eq + Display,
{
    fn eq(&self, other: &Self) -> bool {
        self.is_subset_of(other) && other.is_subset_of(self)
    }
}

impl<V> Eq for ChainHashSet<V> where V: Eq + Display {}

/// Renders as `{v1, v2}` in iteration order.
impl<V> Display for ChainHashSet<V>
where
    V: Eq + Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        let mut first = true;
        for v in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{v}")?;
        }
        f.write_str("}")
    }
}

impl<V> Debug for ChainHashSet<V>
where
    V: Eq + Display + Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<V> Extend<V> for ChainHashSet<V>
where
    V: Eq + Display,
{
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for v in iter {
            self.add(v);
        }
    }
}

impl<V> FromIterator<V> for ChainHashSet<V>
where
    V: Eq + Display,
{
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

/// `&a + &b` is the union of the two sets.
impl<V> Add for &ChainHashSet<V>
where
    V: Eq + Display + Clone,
{
    type Output = ChainHashSet<V>;

    fn add(self, rhs: Self) -> ChainHashSet<V> {
        self.union(rhs)
    }
}

/// `&a + v` is the set formed by adding the single element `v`.
impl<V> Add<V> for &ChainHashSet<V>
where
    V: Eq + Display + Clone,
{
    type Output = ChainHashSet<V>;

    fn add(self, value: V) -> ChainHashSet<V> {
        let mut out = self.clone();
        ChainHashSet::add(&mut out, value);
        out
    }
}

/// `&a * &b` is the intersection of the two sets.
impl<V> Mul for &ChainHashSet<V>
where
    V: Eq + Display + Clone,
{
    type Output = ChainHashSet<V>;

    fn mul(self, rhs: Self) -> ChainHashSet<V> {
        self.intersection(rhs)
    }
}

/// `&a - &b` is the difference: elements of `a` not in `b`.
impl<V> Sub for &ChainHashSet<V>
where
    V: Eq + Display + Clone,
{
    type Output = ChainHashSet<V>;

    fn sub(self, rhs: Self) -> ChainHashSet<V> {
        self.difference(rhs)
    }
}

/// `&a - v` is the set formed by removing the single element `v`.
impl<V> Sub<&V> for &ChainHashSet<V>
where
    V: Eq + Display + Clone,
{
    type Output = ChainHashSet<V>;

    fn sub(self, value: &V) -> ChainHashSet<V> {
        let mut out = self.clone();
        out.remove(value);
        out
    }
}

impl<V> AddAssign<&ChainHashSet<V>> for ChainHashSet<V>
where
    V: Eq + Display + Clone,
{
    fn add_assign(&mut self, rhs: &ChainHashSet<V>) {
        *self = &*self + rhs;
    }
}

impl<V> AddAssign<V> for ChainHashSet<V>
where
    V: Eq + Display + Clone,
{
    fn add_assign(&mut self, value: V) {
        *self = &*self + value;
    }
}

impl<V> MulAssign<&ChainHashSet<V>> for ChainHashSet<V>
where
    V: Eq + Display + Clone,
{
    fn mul_assign(&mut self, rhs: &ChainHashSet<V>) {
        *self = &*self * rhs;
    }
}

impl<V> SubAssign<&ChainHashSet<V>> for ChainHashSet<V>
where
    V: Eq + Display + Clone,
{
    fn sub_assign(&mut self, rhs: &ChainHashSet<V>) {
        *self = &*self - rhs;
    }
}

impl<V> SubAssign<&V> for ChainHashSet<V>
where
    V: Eq + Display + Clone,
{
    fn sub_assign(&mut self, value: &V) {
        *self = &*self - value;
    }
}

/// Element iterator returned by [`ChainHashSet::iter`].
pub struct Iter<'a, V> {
    inner: chain_hash_map::Iter<'a, V, bool>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(v, _)| v)
    }
}

impl<'a, V> IntoIterator for &'a ChainHashSet<V>
where
    V: Eq + Display,
{
    type Item = &'a V;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
