use crate::transfers::TransferOffer;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Terminal offers, oldest dropped first once the limit is reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferHistory {
    pub items: VecDeque<TransferOffer>,
    pub limit: usize,
}

impl Default for TransferHistory {
    fn default() -> Self {
        TransferHistory::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl TransferHistory {
    pub fn new(limit: usize) -> Self {
        TransferHistory {
            items: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    pub fn push(&mut self, offer: TransferOffer) {
        self.items.push_back(offer);

        while self.items.len() > self.limit {
            self.items.pop_front();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransferOffer> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
