//! Compost balance bookkeeping.

use garden_defence_core::PlacementError;

/// Single non-negative resource balance.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Economy {
    balance: u32,
}

impl Economy {
    pub(crate) const fn new(balance: u32) -> Self {
        Self { balance }
    }

    pub(crate) const fn balance(&self) -> u32 {
        self.balance
    }

    pub(crate) const fn can_afford(&self, cost: u32) -> bool {
        self.balance >= cost
    }

    /// Deducts `cost`, returning the new balance. The balance is untouched on
    /// failure.
    pub(crate) fn spend(&mut self, cost: u32) -> Result<u32, PlacementError> {
        self.balance = self
            .balance
            .checked_sub(cost)
            .ok_or(PlacementError::InsufficientFunds)?;
        Ok(self.balance)
    }

    /// Adds `amount` unconditionally, returning the new balance.
    pub(crate) fn credit(&mut self, amount: u32) -> u32 {
        self.balance = self.balance.saturating_add(amount);
        self.balance
    }
}
