use std::collections::HashMap;

/// Loop-owned state: the round-robin counter and per-wallet wrap counts.
/// Lives for the process only.
#[derive(Debug, Default, Clone)]
pub struct RotationState {
    counter: u64,
    tx_counts: HashMap<usize, u64>,
}

impl RotationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks `counter mod wallet_count` and advances the counter.
    ///
    /// Panics if `wallet_count` is zero; the bot refuses to start without
    /// wallets.
    pub fn next_wallet_index(&mut self, wallet_count: usize) -> usize {
        assert!(wallet_count > 0, "rotation needs at least one wallet");
        let index = (self.counter % wallet_count as u64) as usize;
        self.counter += 1;
        index
    }

    pub fn iterations(&self) -> u64 {
        self.counter
    }

    pub fn tx_count(&self, wallet_index: usize) -> u64 {
        self.tx_counts.get(&wallet_index).copied().unwrap_or(0)
    }

    /// Counts a submitted wrap and returns the wallet's new total.
    pub fn record_wrap(&mut self, wallet_index: usize) -> u64 {
        let count = self.tx_counts.entry(wallet_index).or_insert(0);
        *count += 1;
        *count
    }
}
