use crate::shared::{Currency, Money};
use serde::{Deserialize, Serialize};

pub const DEFAULT_STARTING_CASH: Money = 50_000_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyRules {
    pub starting_cash: Money,
    pub weekly_costs: Money,
    pub sponsor_income_per_round: Money,
    pub continental_prizes: ContinentalPrizes,
    pub currency_code: String,
    pub continental_interval_rounds: usize,
    pub transfer_windows: TransferWindowRules,
    pub offer_lifetime_rounds: u32,
    pub history_limit: usize,
    pub start_year: u16,
}

impl Default for EconomyRules {
    fn default() -> Self {
        EconomyRules {
            starting_cash: DEFAULT_STARTING_CASH,
            weekly_costs: 250_000,
            sponsor_income_per_round: 600_000,
            continental_prizes: ContinentalPrizes::default(),
            currency_code: String::from("EUR"),
            continental_interval_rounds: 3,
            transfer_windows: TransferWindowRules::default(),
            offer_lifetime_rounds: 3,
            history_limit: 100,
            start_year: 2025,
        }
    }
}

impl EconomyRules {
    pub fn currency(&self) -> Currency {
        Currency::from_code(&self.currency_code)
    }

    /// Interval used to pace live continental matchdays; never zero.
    pub fn continental_interval(&self) -> usize {
        self.continental_interval_rounds.max(1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContinentalPrizes {
    pub participation: Money,
    pub win: Money,
    pub draw: Money,
    pub champion: Money,
}

impl Default for ContinentalPrizes {
    fn default() -> Self {
        ContinentalPrizes {
            participation: 2_000_000,
            win: 2_800_000,
            draw: 900_000,
            champion: 20_000_000,
        }
    }
}

/// Inclusive round ranges; round numbers count domestic rounds already played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferWindowRules {
    pub pre_season: [u32; 2],
    pub mid_season: [u32; 2],
}

impl Default for TransferWindowRules {
    fn default() -> Self {
        TransferWindowRules {
            pre_season: [0, 4],
            mid_season: [17, 21],
        }
    }
}
