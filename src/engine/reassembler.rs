// Reassembler - 到着順のOutcomeを元のインデックス順に復元

use crate::core::{FanoutError, FanoutResult, Outcome};
use std::collections::BTreeMap;

/// 最小インデックス優先のバッファで連続区間を順に解放する
#[derive(Debug)]
pub struct Reassembler {
    total: usize,
    next_expected: usize,
    pending: BTreeMap<usize, Outcome>,
    ordered: Vec<Outcome>,
}

impl Reassembler {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            next_expected: 0,
            pending: BTreeMap::new(),
            ordered: Vec::with_capacity(total),
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn next_expected(&self) -> usize {
        self.next_expected
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_complete(&self) -> bool {
        self.next_expected == self.total && self.pending.is_empty()
    }

    /// Outcomeを受け入れ、今回新たに解放された区間を返す
    pub fn accept(&mut self, outcome: Outcome) -> FanoutResult<&[Outcome]> {
        let index = outcome.index;
        if index >= self.total {
            return Err(FanoutError::IndexOutOfRange {
                index,
                total: self.total,
            });
        }
        if index < self.next_expected || self.pending.contains_key(&index) {
            return Err(FanoutError::DuplicateOutcome { index });
        }

        self.pending.insert(index, outcome);

        let before = self.ordered.len();
        while let Some(entry) = self.pending.first_entry() {
            if *entry.key() != self.next_expected {
                break;
            }
            self.ordered.push(entry.remove());
            self.next_expected += 1;
        }

        Ok(&self.ordered[before..])
    }

    /// ストリーム終了時の検証: 全件解放済みかつバッファが空であること
    pub fn finish(self) -> FanoutResult<Vec<Outcome>> {
        if !self.is_complete() {
            return Err(FanoutError::ReassemblyIncomplete {
                released: self.next_expected,
                total: self.total,
                pending: self.pending.len(),
            });
        }
        Ok(self.ordered)
    }
}
