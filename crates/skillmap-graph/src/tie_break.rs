//! Deterministic ordering between nodes that become ready at the same time.

use skillmap_core::{NodeId, TieBreakKind};
use std::cmp::Ordering;

/// What a tie-break rule gets to look at.
#[derive(Debug, Clone, Copy)]
pub struct NodeKey<'a> {
    pub id: &'a NodeId,
    pub name: &'a str,
    /// Position in the input collection
    pub index: usize,
}

/// Deterministic secondary order between equally eligible nodes.
///
/// Implementations need not be total: `priorities` falls back to the id and
/// then the input position, so the final order never depends on hashing.
pub trait TieBreak {
    fn compare(&self, a: &NodeKey<'_>, b: &NodeKey<'_>) -> Ordering;
}

/// Orders by the first run of digits in the id, read as a number. Ids
/// without digits come after all numbered ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericId;

impl NumericId {
    fn digits(id: &str) -> Option<&str> {
        let start = id.find(|c: char| c.is_ascii_digit())?;
        let rest = &id[start..];
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let run = rest[..end].trim_start_matches('0');
        // "000" is zero
        Some(if run.is_empty() { "0" } else { run })
    }
}

impl TieBreak for NumericId {
    fn compare(&self, a: &NodeKey<'_>, b: &NodeKey<'_>) -> Ordering {
        // Compared as (length, digits) so arbitrarily long ids never overflow.
        match (Self::digits(a.id.as_str()), Self::digits(b.id.as_str())) {
            (Some(x), Some(y)) => x.len().cmp(&y.len()).then_with(|| x.cmp(y)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Lexicographic;

impl TieBreak for Lexicographic {
    fn compare(&self, a: &NodeKey<'_>, b: &NodeKey<'_>) -> Ordering {
        a.id.cmp(b.id)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ByName;

impl TieBreak for ByName {
    fn compare(&self, a: &NodeKey<'_>, b: &NodeKey<'_>) -> Ordering {
        a.name.cmp(b.name)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Insertion;

impl TieBreak for Insertion {
    fn compare(&self, a: &NodeKey<'_>, b: &NodeKey<'_>) -> Ordering {
        a.index.cmp(&b.index)
    }
}

pub fn tie_break_for(kind: TieBreakKind) -> Box<dyn TieBreak> {
    match kind {
        TieBreakKind::NumericId => Box::new(NumericId),
        TieBreakKind::Lexicographic => Box::new(Lexicographic),
        TieBreakKind::Name => Box::new(ByName),
        TieBreakKind::Insertion => Box::new(Insertion),
    }
}

/// Priority of every key under `rule`; lower comes first. The result is a
/// permutation of `0..keys.len()`.
pub fn priorities(keys: &[NodeKey<'_>], rule: &dyn TieBreak) -> Vec<usize> {
    let mut sorted: Vec<usize> = (0..keys.len()).collect();
    sorted.sort_by(|&a, &b| {
        let (ka, kb) = (&keys[a], &keys[b]);
        rule.compare(ka, kb)
            .then_with(|| ka.id.cmp(kb.id))
            .then_with(|| ka.index.cmp(&kb.index))
    });

    let mut priority = vec![0; keys.len()];
    for (rank, idx) in sorted.into_iter().enumerate() {
        priority[idx] = rank;
    }
    priority
}
