use crate::shared::{Currency, CurrencyValue, Money};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

const LEDGER_LIMIT: usize = 200;

/// Cash accessor the transfer pipeline settles against.
pub trait CashLedger {
    fn balance(&self) -> Money;

    fn push_income(&mut self, round: usize, kind: LedgerKind, amount: Money);

    /// Unconditional outflow; the balance may go negative.
    fn push_outcome(&mut self, round: usize, kind: LedgerKind, amount: Money);

    /// Outflow that fails without touching the balance when cash is short.
    fn try_debit(&mut self, round: usize, kind: LedgerKind, amount: Money) -> Result<(), Money> {
        let available = self.balance();

        if available < amount {
            return Err(available);
        }

        self.push_outcome(round, kind, amount);

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerKind {
    WeeklyCosts,
    Wages,
    Sponsorship,
    TransferPurchase,
    TransferSale,
    ContinentalPrize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub round: usize,
    pub kind: LedgerKind,
    /// Signed: income positive, outcome negative.
    pub amount: Money,
    pub balance: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubFinances {
    pub cash: Money,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub income: Money,
    #[serde(default)]
    pub outcome: Money,
    #[serde(default)]
    pub history: VecDeque<LedgerEntry>,
    #[serde(default)]
    pub last_processed_round: Option<usize>,
}

impl Default for ClubFinances {
    fn default() -> Self {
        ClubFinances::new(crate::reference::DEFAULT_STARTING_CASH, Currency::default())
    }
}

impl ClubFinances {
    pub fn new(cash: Money, currency: Currency) -> Self {
        ClubFinances {
            cash,
            currency,
            income: 0,
            outcome: 0,
            history: VecDeque::new(),
            last_processed_round: None,
        }
    }

    pub fn cash_value(&self) -> CurrencyValue {
        CurrencyValue::new(self.cash, self.currency)
    }

    /// Weekly costs, wages and sponsor income for one domestic round. Returns
    /// `false` when the round has already been booked.
    pub fn process_round(
        &mut self,
        round: usize,
        weekly_costs: Money,
        wage_bill: Money,
        sponsor_income: Money,
    ) -> bool {
        if self.last_processed_round.is_some_and(|last| last >= round) {
            return false;
        }

        self.push_income(round, LedgerKind::Sponsorship, sponsor_income);
        self.push_outcome(round, LedgerKind::WeeklyCosts, weekly_costs);
        self.push_outcome(round, LedgerKind::Wages, wage_bill);

        self.last_processed_round = Some(round);

        debug!(
            "finance: round {} processed, balance = {}",
            round,
            self.cash_value()
        );

        true
    }

    pub fn reset_for_new_season(&mut self) {
        self.income = 0;
        self.outcome = 0;
        self.last_processed_round = None;
    }

    fn record(&mut self, round: usize, kind: LedgerKind, amount: Money) {
        if amount == 0 {
            return;
        }

        self.history.push_back(LedgerEntry {
            round,
            kind,
            amount,
            balance: self.cash,
        });

        while self.history.len() > LEDGER_LIMIT {
            self.history.pop_front();
        }
    }
}

impl CashLedger for ClubFinances {
    fn balance(&self) -> Money {
        self.cash
    }

    fn push_income(&mut self, round: usize, kind: LedgerKind, amount: Money) {
        self.cash += amount;
        self.income += amount;
        self.record(round, kind, amount);
    }

    fn push_outcome(&mut self, round: usize, kind: LedgerKind, amount: Money) {
        self.cash -= amount;
        self.outcome += amount;
        self.record(round, kind, -amount);
    }
}
