/*
  Strix, a UCI-compatible chess engine core.
  Copyright (C) 2024 The Strix Authors (see AUTHORS.md file)

  Strix is free software: you can redistribute it and/or modify
  it under the terms of the GNU General Public License as published by
  the Free Software Foundation, either version 3 of the License, or
  (at your option) any later version.

  Strix is distributed in the hope that it will be useful,
  but WITHOUT ANY WARRANTY; without even the implied warranty of
  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
  GNU General Public License for more details.

  You should have received a copy of the GNU General Public License
  along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/

//! A direct-mapped transposition table: one slot per index, unconditional
//! replacement, no buckets or aging. Deliberately simple: a collision
//! just evicts the old entry rather than being resolved by a probing
//! scheme, and a stale hit is caught by comparing the full stored hash
//! against the position's current hash rather than trusting the index
//! alone.

use super::moves::Move;

/// The kind of bound a stored score represents, relative to the search
/// window it was computed in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// An exact score: every move was searched inside the window.
    Exact,
    /// A lower bound: the real score is at least this (a beta cutoff).
    LowerBound,
    /// An upper bound: the real score is at most this (no move raised alpha).
    UpperBound,
}

#[derive(Debug, Copy, Clone)]
pub struct TTEntry {
    pub hash: u64,
    pub score: i32,
    pub depth: u8,
    pub node_kind: NodeKind,
    pub best_move: Move,
}

/// Number of entries in the default-sized table: 2^21, a little over two
/// million slots.
pub const DEFAULT_CAPACITY_POWER: u32 = 21;

pub struct TranspositionTable {
    slots: Vec<Option<TTEntry>>,
    mask: u64,
}

impl TranspositionTable {
    #[must_use]
    /// Builds a table with `2.pow(capacity_power)` slots.
    pub fn new(capacity_power: u32) -> TranspositionTable {
        let size = 1usize << capacity_power;
        TranspositionTable {
            slots: vec![None; size],
            mask: (size - 1) as u64,
        }
    }

    #[must_use]
    pub fn with_default_capacity() -> TranspositionTable {
        TranspositionTable::new(DEFAULT_CAPACITY_POWER)
    }

    #[inline(always)]
    fn index(&self, hash: u64) -> usize {
        (hash & self.mask) as usize
    }

    #[must_use]
    /// Looks up `hash`. Returns `None` both when the slot is empty and
    /// when it holds an entry for a different position that happened to
    /// map to the same index.
    pub fn get(&self, hash: u64) -> Option<TTEntry> {
        let entry = self.slots[self.index(hash)]?;
        if entry.hash == hash {
            Some(entry)
        } else {
            None
        }
    }

    /// Stores `entry`, unconditionally overwriting whatever was in that
    /// slot before.
    pub fn store(&mut self, entry: TTEntry) {
        let idx = self.index(entry.hash);
        self.slots[idx] = Some(entry);
    }

    /// Drops every stored entry, e.g. at the start of a new game.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MoveKind, Square};

    #[test]
    fn stores_and_retrieves_an_entry() {
        let mut tt = TranspositionTable::new(10);
        let mv = Move::new(Square::E2, Square::E4, MoveKind::DoublePawnPush);
        tt.store(TTEntry {
            hash: 0xABCD,
            score: 42,
            depth: 3,
            node_kind: NodeKind::Exact,
            best_move: mv,
        });
        let found = tt.get(0xABCD).unwrap();
        assert_eq!(found.score, 42);
        assert_eq!(found.best_move, mv);
    }

    #[test]
    fn colliding_hash_to_the_same_slot_is_not_mistaken_for_a_hit() {
        let mut tt = TranspositionTable::new(4);
        let mv = Move::NULL;
        tt.store(TTEntry {
            hash: 1,
            score: 1,
            depth: 1,
            node_kind: NodeKind::Exact,
            best_move: mv,
        });
        // Shares an index with hash 1 in a 16-slot table but isn't hash 1.
        assert!(tt.get(17).is_none());
    }

    #[test]
    fn clear_empties_every_slot() {
        let mut tt = TranspositionTable::new(4);
        tt.store(TTEntry {
            hash: 5,
            score: 5,
            depth: 1,
            node_kind: NodeKind::Exact,
            best_move: Move::NULL,
        });
        tt.clear();
        assert!(tt.get(5).is_none());
    }
}
