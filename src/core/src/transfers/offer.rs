use crate::shared::Money;
use crate::transfers::TransferError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OfferDirection {
    /// The user's club is buying.
    Outgoing,
    /// Another club wants one of the user's players.
    Incoming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OfferStatus {
    Pending,
    Countered,
    Accepted,
    Rejected,
    Expired,
    Cancelled,
}

impl OfferStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OfferStatus::Accepted | OfferStatus::Rejected | OfferStatus::Expired | OfferStatus::Cancelled
        )
    }

    pub fn is_open(&self) -> bool {
        !self.is_terminal()
    }

    pub fn can_become(&self, next: OfferStatus) -> bool {
        match self {
            OfferStatus::Pending => next != OfferStatus::Pending,
            OfferStatus::Countered => matches!(
                next,
                OfferStatus::Accepted | OfferStatus::Rejected | OfferStatus::Expired
            ),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterTerms {
    pub fee: Money,
    pub wage: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOffer {
    pub id: u32,
    pub direction: OfferDirection,
    pub player_id: u32,
    pub player_name: String,
    pub buying_club_id: u32,
    pub buying_club_name: String,
    pub selling_club_id: u32,
    pub selling_club_name: String,
    pub fee: Money,
    pub wage: Money,
    pub status: OfferStatus,
    pub created_round: u32,
    pub expiry_round: u32,
    #[serde(default)]
    pub counter: Option<CounterTerms>,
    /// Money and player have changed hands.
    #[serde(default)]
    pub settled: bool,
    #[serde(default)]
    pub resolved_round: Option<u32>,
}

impl TransferOffer {
    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    pub fn is_expired_at(&self, round: u32) -> bool {
        self.is_open() && round > self.expiry_round
    }

    /// Guarded status change; terminal offers never change again.
    pub fn transition(&mut self, next: OfferStatus, round: u32) -> Result<(), TransferError> {
        if !self.status.can_become(next) {
            return Err(TransferError::InvalidTransition {
                id: self.id,
                from: self.status,
                to: next,
            });
        }

        self.status = next;

        if next.is_terminal() {
            self.resolved_round = Some(round);
        }

        Ok(())
    }

    pub fn counter_with(&mut self, terms: CounterTerms, round: u32) -> Result<(), TransferError> {
        self.transition(OfferStatus::Countered, round)?;
        self.counter = Some(terms);

        Ok(())
    }

    /// Fee and wage that apply once accepted: the counter terms if any.
    pub fn agreed_terms(&self) -> CounterTerms {
        self.counter.unwrap_or(CounterTerms {
            fee: self.fee,
            wage: self.wage,
        })
    }

    pub fn awaits_settlement(&self) -> bool {
        self.status == OfferStatus::Accepted && !self.settled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer() -> TransferOffer {
        TransferOffer {
            id: 1,
            direction: OfferDirection::Outgoing,
            player_id: 10,
            player_name: String::from("Striker"),
            buying_club_id: 1,
            buying_club_name: String::from("Northfield"),
            selling_club_id: 2,
            selling_club_name: String::from("Southport"),
            fee: 8_000_000,
            wage: 40_000,
            status: OfferStatus::Pending,
            created_round: 2,
            expiry_round: 5,
            counter: None,
            settled: false,
            resolved_round: None,
        }
    }

    #[test]
    fn countered_offer_can_only_be_answered_or_expire() {
        let mut offer = offer();

        offer
            .counter_with(CounterTerms { fee: 9_500_000, wage: 42_000 }, 3)
            .unwrap();

        assert_eq!(offer.status, OfferStatus::Countered);
        assert!(offer.transition(OfferStatus::Cancelled, 3).is_err());
        assert!(offer.transition(OfferStatus::Countered, 3).is_err());

        offer.transition(OfferStatus::Accepted, 4).unwrap();
        assert_eq!(offer.resolved_round, Some(4));
        assert_eq!(offer.agreed_terms().fee, 9_500_000);
        assert!(offer.awaits_settlement());
    }

    #[test]
    fn terminal_offers_never_change() {
        for terminal in [
            OfferStatus::Accepted,
            OfferStatus::Rejected,
            OfferStatus::Expired,
            OfferStatus::Cancelled,
        ] {
            let mut offer = offer();
            offer.transition(terminal, 3).unwrap();

            let snapshot = offer.clone();

            for next in [
                OfferStatus::Pending,
                OfferStatus::Countered,
                OfferStatus::Accepted,
                OfferStatus::Rejected,
                OfferStatus::Expired,
                OfferStatus::Cancelled,
            ] {
                assert_eq!(
                    offer.transition(next, 4),
                    Err(TransferError::InvalidTransition {
                        id: 1,
                        from: terminal,
                        to: next
                    })
                );
            }

            assert_eq!(offer, snapshot);
        }
    }

    #[test]
    fn expiry_is_strictly_after_expiry_round() {
        let offer = offer();

        assert!(!offer.is_expired_at(5));
        assert!(offer.is_expired_at(6));
    }
}
