use crate::shared::{Money, percent_of};
use crate::transfers::CounterTerms;

pub const ACCEPT_PERCENT: i64 = 90;
pub const COUNTER_PERCENT: i64 = 70;
pub const COUNTER_FEE_PERCENT: i64 = 95;
pub const COUNTER_WAGE_PERCENT: i64 = 105;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferDecision {
    Accept,
    Counter(CounterTerms),
    Reject,
}

/// How a selling club answers a bid, judged against the player's market value.
pub struct OfferEvaluator;

impl OfferEvaluator {
    pub fn evaluate(fee: Money, wage: Money, value: Money) -> OfferDecision {
        // widened so any user-supplied fee compares without overflow
        let bid = fee as i128 * 100;
        let value_share = |percent: i64| value as i128 * percent as i128;

        if bid >= value_share(ACCEPT_PERCENT) {
            OfferDecision::Accept
        } else if bid >= value_share(COUNTER_PERCENT) {
            OfferDecision::Counter(CounterTerms {
                fee: percent_of(value, COUNTER_FEE_PERCENT),
                wage: percent_of(wage, COUNTER_WAGE_PERCENT),
            })
        } else {
            OfferDecision::Reject
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALUE: Money = 10_000_000;

    #[test]
    fn ninety_five_percent_is_accepted() {
        assert_eq!(OfferEvaluator::evaluate(9_500_000, 50_000, VALUE), OfferDecision::Accept);
    }

    #[test]
    fn seventy_five_percent_is_countered_at_ninety_five() {
        assert_eq!(
            OfferEvaluator::evaluate(7_500_000, 50_000, VALUE),
            OfferDecision::Counter(CounterTerms {
                fee: 9_500_000,
                wage: 52_500
            })
        );
    }

    #[test]
    fn sixty_percent_is_rejected() {
        assert_eq!(OfferEvaluator::evaluate(6_000_000, 50_000, VALUE), OfferDecision::Reject);
    }

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(OfferEvaluator::evaluate(9_000_000, 0, VALUE), OfferDecision::Accept);
        assert!(matches!(
            OfferEvaluator::evaluate(7_000_000, 0, VALUE),
            OfferDecision::Counter(_)
        ));
        assert_eq!(OfferEvaluator::evaluate(6_999_999, 0, VALUE), OfferDecision::Reject);
    }

    #[test]
    fn huge_fee_is_accepted_without_overflow() {
        assert_eq!(
            OfferEvaluator::evaluate(Money::MAX / 50, 50_000, VALUE),
            OfferDecision::Accept
        );
        assert_eq!(OfferEvaluator::evaluate(Money::MAX, 50_000, Money::MAX), OfferDecision::Accept);
    }

    #[test]
    fn huge_value_counters_with_saturated_wage() {
        let value = Money::MAX / 2;

        assert!(matches!(
            OfferEvaluator::evaluate(value / 100 * 75, Money::MAX, value),
            OfferDecision::Counter(CounterTerms { wage: Money::MAX, .. })
        ));
    }
}
