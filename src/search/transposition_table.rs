//! Transposition cache keyed by board, perspective, node kind, remaining
//! depth, and evaluator.
//!
//! Keys carry the remaining depth and the scorer name so a shallow or
//! differently-evaluated result is never reused by another search. Alpha-beta
//! entries record whether the value is exact or only a bound.

use std::collections::HashMap;

use crate::game_state::board::{Board, Move, Side};
use crate::search::search_common::{NodeKind, Score};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exact,
    /// True value is at least the stored value.
    Lower,
    /// True value is at most the stored value.
    Upper,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub board: Board,
    pub perspective: Side,
    pub node: NodeKind,
    /// `None` for unbounded searches.
    pub remaining: Option<u32>,
    pub scorer: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TTEntry {
    pub best_move: Option<Move>,
    pub value: Score,
    pub bound: Bound,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TTStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
}

#[derive(Debug, Clone, Default)]
pub struct TranspositionTable {
    entries: HashMap<CacheKey, TTEntry>,
    stats: TTStats,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats = TTStats::default();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> TTStats {
        self.stats
    }

    pub fn probe(&mut self, key: &CacheKey) -> Option<TTEntry> {
        self.stats.probes += 1;
        let hit = self.entries.get(key).copied();
        if hit.is_some() {
            self.stats.hits += 1;
        }
        hit
    }

    /// Insert or replace; an exact entry is never downgraded to a bound.
    pub fn store(&mut self, key: CacheKey, entry: TTEntry) {
        self.stats.stores += 1;
        match self.entries.get_mut(&key) {
            Some(existing) if existing.bound == Bound::Exact && entry.bound != Bound::Exact => {}
            Some(existing) => *existing = entry,
            None => {
                self.entries.insert(key, entry);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Bound, CacheKey, TTEntry, TranspositionTable};
    use crate::game_state::board::{Move, Side};
    use crate::game_state::othello_rules::OthelloRules;
    use crate::search::search_common::NodeKind;

    fn key(remaining: Option<u32>) -> CacheKey {
        CacheKey {
            board: OthelloRules::initial_board(4).expect("board"),
            perspective: Side::Dark,
            node: NodeKind::Max,
            remaining,
            scorer: "utility",
        }
    }

    #[test]
    fn store_and_probe_round_trip() {
        let mut tt = TranspositionTable::new();
        let entry = TTEntry {
            best_move: Some(Move::new(1, 0)),
            value: 3.0,
            bound: Bound::Exact,
        };
        tt.store(key(Some(2)), entry);

        assert_eq!(tt.probe(&key(Some(2))), Some(entry));
        assert_eq!(tt.probe(&key(Some(1))), None);
        assert_eq!(tt.probe(&key(None)), None);

        let stats = tt.stats();
        assert_eq!((stats.probes, stats.hits, stats.stores), (3, 1, 1));
    }

    #[test]
    fn exact_entries_are_not_downgraded() {
        let mut tt = TranspositionTable::new();
        let exact = TTEntry {
            best_move: Some(Move::new(0, 1)),
            value: 5.0,
            bound: Bound::Exact,
        };
        tt.store(key(Some(3)), exact);
        tt.store(
            key(Some(3)),
            TTEntry {
                best_move: None,
                value: 9.0,
                bound: Bound::Lower,
            },
        );
        assert_eq!(tt.probe(&key(Some(3))), Some(exact));

        let upper = TTEntry {
            best_move: None,
            value: -1.0,
            bound: Bound::Upper,
        };
        tt.store(key(Some(4)), upper);
        tt.store(key(Some(4)), exact);
        assert_eq!(tt.probe(&key(Some(4))), Some(exact));
    }

    #[test]
    fn node_kind_and_scorer_separate_entries() {
        let mut tt = TranspositionTable::new();
        let entry = TTEntry {
            best_move: None,
            value: 1.0,
            bound: Bound::Exact,
        };
        tt.store(key(Some(1)), entry);

        let min_key = CacheKey {
            node: NodeKind::Min,
            ..key(Some(1))
        };
        let heuristic_key = CacheKey {
            scorer: "heuristic",
            ..key(Some(1))
        };
        assert_eq!(tt.probe(&min_key), None);
        assert_eq!(tt.probe(&heuristic_key), None);
    }

    #[test]
    fn clear_resets_entries_and_stats() {
        let mut tt = TranspositionTable::new();
        tt.store(
            key(Some(1)),
            TTEntry {
                best_move: None,
                value: 0.0,
                bound: Bound::Exact,
            },
        );
        assert_eq!(tt.len(), 1);
        tt.clear();
        assert!(tt.is_empty());
        assert_eq!(tt.stats().stores, 0);
    }
}
