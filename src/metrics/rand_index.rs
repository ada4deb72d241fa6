//! Rand index between two independently labeled datasets.
//!
//! Both datasets describe the same entities. Entities are matched by identity,
//! not position: for each position `k` of `A`, the counterpart in `B` is
//! `B[k]` when the identities agree and an identity lookup otherwise.
//!
//! Every unordered pair of entities is classified:
//!
//! | | same cluster in B | different in B |
//! |---|---|---|
//! | **same cluster in A** | `a` | `c` |
//! | **different in A** | `d` | `b` |
//!
//! ```text
//! R = (a + b) / (a + b + c + d)
//! ```
//!
//! Invalid input is reported as [`RandIndex::SizeMismatch`] or
//! [`RandIndex::IdentityMismatch`]. Report renderers that predate the
//! structured result read the sentinels from [`RandIndex::as_sentinel`]
//! (`-1.0` and `-2.0`), which lie outside the `[0, 1]` range of the index.

use crate::dataset::Dataset;
use crate::error::Result;
use std::borrow::Cow;
use std::fmt;

/// Outcome of a Rand index computation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RandIndex {
    /// Rand index in `[0, 1]`.
    Value(f64),
    /// The datasets have different sizes.
    SizeMismatch,
    /// An identity of `A` is absent from `B`, or there are no pairs to compare.
    IdentityMismatch,
}

impl RandIndex {
    /// Sentinel reported for [`RandIndex::SizeMismatch`].
    pub const SIZE_MISMATCH: f64 = -1.0;
    /// Sentinel reported for [`RandIndex::IdentityMismatch`].
    pub const IDENTITY_MISMATCH: f64 = -2.0;

    /// The index, or its sentinel for invalid input.
    pub fn as_sentinel(&self) -> f64 {
        match self {
            RandIndex::Value(value) => *value,
            RandIndex::SizeMismatch => Self::SIZE_MISMATCH,
            RandIndex::IdentityMismatch => Self::IDENTITY_MISMATCH,
        }
    }

    /// Decode a sentinel-encoded value.
    pub fn from_sentinel(value: f64) -> Self {
        if value == Self::SIZE_MISMATCH {
            RandIndex::SizeMismatch
        } else if value == Self::IDENTITY_MISMATCH {
            RandIndex::IdentityMismatch
        } else {
            RandIndex::Value(value)
        }
    }

    /// The index, `None` for invalid input.
    pub fn value(&self) -> Option<f64> {
        match self {
            RandIndex::Value(value) => Some(*value),
            _ => None,
        }
    }

    /// Whether the result is a genuine index.
    pub fn is_valid(&self) -> bool {
        matches!(self, RandIndex::Value(_))
    }
}

impl fmt::Display for RandIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RandIndex::Value(value) => write!(f, "{value}"),
            RandIndex::SizeMismatch => f.write_str("datasets differ in size"),
            RandIndex::IdentityMismatch => f.write_str("datasets do not share identities"),
        }
    }
}

/// Pair agreement counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairCounts {
    /// Same cluster in both.
    pub a: u64,
    /// Different clusters in both.
    pub b: u64,
    /// Same cluster in `A` only.
    pub c: u64,
    /// Same cluster in `B` only.
    pub d: u64,
}

impl PairCounts {
    /// Number of classified pairs.
    pub fn total(&self) -> u64 {
        self.a + self.b + self.c + self.d
    }

    /// `(a + b) / total`, `None` when no pair was classified.
    pub fn rand(&self) -> Option<f64> {
        let total = self.total();
        (total > 0).then(|| (self.a + self.b) as f64 / total as f64)
    }

    fn record(&mut self, same_a: bool, same_b: bool) {
        match (same_a, same_b) {
            (true, true) => self.a += 1,
            (false, false) => self.b += 1,
            (true, false) => self.c += 1,
            (false, true) => self.d += 1,
        }
    }
}

/// Classify every pair of entities of `a` against their counterparts in `b`.
///
/// Returns `Ok(None)` when the datasets differ in size or an identity of `a`
/// cannot be found in `b`. Fails if either dataset lacks `cluster_attribute`.
pub fn pair_counts(a: &Dataset, b: &Dataset, cluster_attribute: &str) -> Result<Option<PairCounts>> {
    if a.len() != b.len() {
        return Ok(None);
    }
    let (index_a, _) = a.attribute(cluster_attribute)?;
    let (index_b, _) = b.attribute(cluster_attribute)?;

    let labels_a: Vec<Cow<'_, str>> = a
        .iter()
        .map(|entity| entity.value(index_a).as_nominal())
        .collect();
    let mut labels_b: Vec<Cow<'_, str>> = Vec::with_capacity(b.len());
    for (position, entity) in a.iter().enumerate() {
        let counterpart = match b.entity(position) {
            Some(candidate) if candidate.id() == entity.id() => Some(candidate),
            _ => b.entity_by_id(entity.id()),
        };
        match counterpart {
            Some(counterpart) => labels_b.push(counterpart.value(index_b).as_nominal()),
            None => {
                tracing::debug!(id = %entity.id(), "identity not found in second dataset");
                return Ok(None);
            }
        }
    }

    let mut counts = PairCounts::default();
    for (i, (first_a, first_b)) in labels_a.iter().zip(&labels_b).enumerate() {
        for (second_a, second_b) in labels_a[i + 1..].iter().zip(&labels_b[i + 1..]) {
            counts.record(first_a == second_a, first_b == second_b);
        }
    }
    Ok(Some(counts))
}

/// Rand index of two labelings of the same entities.
///
/// Only a missing cluster attribute is an error; invalid pairings are encoded
/// in the returned [`RandIndex`].
pub fn rand_index(a: &Dataset, b: &Dataset, cluster_attribute: &str) -> Result<RandIndex> {
    if a.len() != b.len() {
        return Ok(RandIndex::SizeMismatch);
    }
    let index = match pair_counts(a, b, cluster_attribute)? {
        Some(counts) => counts.rand().map_or(RandIndex::IdentityMismatch, RandIndex::Value),
        None => RandIndex::IdentityMismatch,
    };
    Ok(index)
}
