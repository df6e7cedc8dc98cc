use crate::club::{CashLedger, LedgerKind, World};
use crate::reference::EconomyRules;
use crate::shared::{Money, percent_of};
use crate::transfers::{
    OfferDecision, OfferDirection, OfferEvaluator, OfferStatus, TransferError, TransferHistory,
    TransferOffer, TransferWindow,
};
use crate::utils::IntegerUtils;
use log::{debug, info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Probabilities of zero, one and two incoming offers per round.
const INCOMING_OFFER_WEIGHTS: [f64; 3] = [0.5, 0.35, 0.15];
const INCOMING_FEE_PERCENT: (i32, i32) = (80, 131);
const INCOMING_WAGE_PERCENT: (i32, i32) = (100, 121);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferState {
    #[serde(default)]
    pub outbox: Vec<TransferOffer>,
    #[serde(default)]
    pub inbox: Vec<TransferOffer>,
    #[serde(default)]
    pub history: TransferHistory,
    #[serde(default = "first_offer_id")]
    pub next_offer_id: u32,
    #[serde(default)]
    pub last_processed_round: Option<u32>,
}

fn first_offer_id() -> u32 {
    1
}

impl Default for TransferState {
    fn default() -> Self {
        TransferState::new(crate::transfers::DEFAULT_HISTORY_LIMIT)
    }
}

impl TransferState {
    pub fn new(history_limit: usize) -> Self {
        TransferState {
            outbox: Vec::new(),
            inbox: Vec::new(),
            history: TransferHistory::new(history_limit),
            next_offer_id: first_offer_id(),
            last_processed_round: None,
        }
    }

    pub fn offer(&self, offer_id: u32) -> Option<&TransferOffer> {
        self.outbox
            .iter()
            .chain(self.inbox.iter())
            .find(|o| o.id == offer_id)
    }

    fn offer_mut(&mut self, offer_id: u32) -> Option<&mut TransferOffer> {
        self.outbox
            .iter_mut()
            .chain(self.inbox.iter_mut())
            .find(|o| o.id == offer_id)
    }

    fn has_open_offer(&self, direction: OfferDirection, player_id: u32) -> bool {
        let offers = match direction {
            OfferDirection::Outgoing => &self.outbox,
            OfferDirection::Incoming => &self.inbox,
        };

        offers.iter().any(|o| o.player_id == player_id && o.is_open())
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_offer_id;
        self.next_offer_id += 1;
        id
    }

    /// Moves finished offers into the history; accepted purchases still
    /// waiting for money stay in the outbox.
    fn archive(&mut self) {
        let keep = |o: &TransferOffer| o.is_open() || o.awaits_settlement();

        let (kept, done): (Vec<_>, Vec<_>) = self.outbox.drain(..).partition(keep);
        self.outbox = kept;

        let (kept_in, done_in): (Vec<_>, Vec<_>) = self.inbox.drain(..).partition(keep);
        self.inbox = kept_in;

        for offer in done.into_iter().chain(done_in) {
            self.history.push(offer);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransferRoundReport {
    pub expired: Vec<u32>,
    pub resolved: Vec<(u32, OfferStatus)>,
    pub generated: Vec<u32>,
}

impl TransferRoundReport {
    pub fn is_empty(&self) -> bool {
        self.expired.is_empty() && self.resolved.is_empty() && self.generated.is_empty()
    }
}

/// The user's club transfer desk: offer state plus the world and cash it acts on.
pub struct TransferPipeline<'a, L: CashLedger + ?Sized> {
    pub state: &'a mut TransferState,
    pub world: &'a mut World,
    pub ledger: &'a mut L,
    pub user_club_id: u32,
    pub rules: &'a EconomyRules,
}

impl<'a, L: CashLedger + ?Sized> TransferPipeline<'a, L> {
    pub fn new(
        state: &'a mut TransferState,
        world: &'a mut World,
        ledger: &'a mut L,
        user_club_id: u32,
        rules: &'a EconomyRules,
    ) -> Self {
        TransferPipeline {
            state,
            world,
            ledger,
            user_club_id,
            rules,
        }
    }

    fn window(&self) -> TransferWindow {
        TransferWindow::new(self.rules.transfer_windows)
    }

    fn ensure_window(&self, round: u32) -> Result<(), TransferError> {
        if self.window().is_open(round) {
            Ok(())
        } else {
            Err(TransferError::WindowClosed { round })
        }
    }

    pub fn make_offer(&mut self, player_id: u32, fee: Money, wage: Money, round: u32) -> Result<u32, TransferError> {
        self.ensure_window(round)?;

        if self.window().closes_at(round) {
            return Err(TransferError::WindowClosing { round });
        }

        if fee <= 0 {
            return Err(TransferError::InvalidFee);
        }

        let player = self
            .world
            .player(player_id)
            .ok_or(TransferError::UnknownPlayer(player_id))?;

        if player.club_id == self.user_club_id {
            return Err(TransferError::OwnPlayer(player_id));
        }

        if self.state.has_open_offer(OfferDirection::Outgoing, player_id) {
            return Err(TransferError::DuplicateOffer(player_id));
        }

        let (player_name, selling_club_id) = (player.name.clone(), player.club_id);
        let id = self.state.allocate_id();

        let offer = TransferOffer {
            id,
            direction: OfferDirection::Outgoing,
            player_id,
            player_name,
            buying_club_id: self.user_club_id,
            buying_club_name: self.world.clubs.name(self.user_club_id),
            selling_club_id,
            selling_club_name: self.world.clubs.name(selling_club_id),
            fee,
            wage,
            status: OfferStatus::Pending,
            created_round: round,
            expiry_round: round + self.rules.offer_lifetime_rounds,
            counter: None,
            settled: false,
            resolved_round: None,
        };

        info!(
            "💼 Offer {}: {} bid {} for {} ({})",
            id, offer.buying_club_name, fee, offer.player_name, offer.selling_club_name
        );

        self.state.outbox.push(offer);

        Ok(id)
    }

    pub fn cancel_offer(&mut self, offer_id: u32, round: u32) -> Result<(), TransferError> {
        let offer = self
            .state
            .outbox
            .iter_mut()
            .find(|o| o.id == offer_id)
            .ok_or(TransferError::UnknownOffer(offer_id))?;

        offer.transition(OfferStatus::Cancelled, round)?;

        info!("💼 Offer {} cancelled", offer_id);

        self.state.archive();

        Ok(())
    }

    /// Accepting a counter settles the purchase straight away.
    pub fn respond_to_counter(&mut self, offer_id: u32, accept: bool, round: u32) -> Result<OfferStatus, TransferError> {
        let offer = self
            .state
            .outbox
            .iter()
            .find(|o| o.id == offer_id)
            .ok_or(TransferError::UnknownOffer(offer_id))?;

        if offer.status != OfferStatus::Countered {
            return Err(TransferError::InvalidTransition {
                id: offer_id,
                from: offer.status,
                to: if accept {
                    OfferStatus::Accepted
                } else {
                    OfferStatus::Rejected
                },
            });
        }

        let status = if accept {
            self.ensure_window(round)?;
            OfferStatus::Accepted
        } else {
            OfferStatus::Rejected
        };

        if let Some(offer) = self.state.offer_mut(offer_id) {
            offer.transition(status, round)?;
        }

        let settlement = if accept { self.settle(offer_id, round) } else { Ok(()) };

        self.state.archive();

        settlement.map(|_| status)
    }

    pub fn respond_to_incoming(&mut self, offer_id: u32, accept: bool, round: u32) -> Result<OfferStatus, TransferError> {
        let offer = self
            .state
            .inbox
            .iter()
            .find(|o| o.id == offer_id)
            .ok_or(TransferError::UnknownOffer(offer_id))?;

        let player_id = offer.player_id;

        if !accept {
            if let Some(offer) = self.state.offer_mut(offer_id) {
                offer.transition(OfferStatus::Rejected, round)?;
            }

            self.state.archive();

            return Ok(OfferStatus::Rejected);
        }

        self.ensure_window(round)?;

        if !offer.is_open() {
            return Err(TransferError::InvalidTransition {
                id: offer_id,
                from: offer.status,
                to: OfferStatus::Accepted,
            });
        }

        if self.world.player(player_id).map(|p| p.club_id) != Some(self.user_club_id) {
            return Err(TransferError::NotInSquad(player_id));
        }

        if let Some(offer) = self.state.offer_mut(offer_id) {
            offer.transition(OfferStatus::Accepted, round)?;
        }

        self.settle(offer_id, round)?;

        // rival bids for a sold player lapse
        for other in self
            .state
            .inbox
            .iter_mut()
            .filter(|o| o.player_id == player_id && o.id != offer_id && o.is_open())
        {
            let _ = other.transition(OfferStatus::Cancelled, round);
        }

        self.state.archive();

        Ok(OfferStatus::Accepted)
    }

    /// Moves money and player for an accepted offer. A purchase the club
    /// cannot afford stays accepted and can be settled later.
    pub fn settle(&mut self, offer_id: u32, round: u32) -> Result<(), TransferError> {
        let offer = self
            .state
            .offer(offer_id)
            .ok_or(TransferError::UnknownOffer(offer_id))?;

        if offer.status != OfferStatus::Accepted {
            return Err(TransferError::NotAccepted(offer_id));
        }

        if offer.settled {
            return Err(TransferError::AlreadySettled(offer_id));
        }

        let terms = offer.agreed_terms();
        let (direction, player_id, buyer) = (offer.direction, offer.player_id, offer.buying_club_id);

        match direction {
            OfferDirection::Outgoing => {
                self.ledger
                    .try_debit(round as usize, LedgerKind::TransferPurchase, terms.fee)
                    .map_err(|available| {
                        warn!("💸 Offer {}: cannot pay {}, cash {}", offer_id, terms.fee, available);
                        TransferError::InsufficientFunds {
                            required: terms.fee,
                            available,
                        }
                    })?;

                self.world.move_player(player_id, self.user_club_id);
            }
            OfferDirection::Incoming => {
                self.ledger
                    .push_income(round as usize, LedgerKind::TransferSale, terms.fee);

                self.world.move_player(player_id, buyer);
            }
        }

        if let Some(player) = self.world.player_mut(player_id) {
            player.wage = terms.wage;
        }

        if let Some(offer) = self.state.offer_mut(offer_id) {
            offer.settled = true;
            info!("✍️ Offer {} settled: {} moves for {}", offer_id, offer.player_name, terms.fee);
        }

        self.state.archive();

        Ok(())
    }

    /// One pass per domestic round; repeated calls for a round already
    /// processed do nothing.
    pub fn process_round<R: Rng + ?Sized>(&mut self, round: u32, rng: &mut R) -> TransferRoundReport {
        let mut report = TransferRoundReport::default();

        if self.state.last_processed_round.is_some_and(|last| last >= round) {
            return report;
        }

        self.expire_offers(round, &mut report);

        if self.window().is_open(round) {
            self.resolve_outgoing(round, &mut report);
            self.generate_incoming(round, rng, &mut report);
        }

        self.state.last_processed_round = Some(round);
        self.state.archive();

        debug!(
            "transfers: round {} processed, {} expired, {} resolved, {} new",
            round,
            report.expired.len(),
            report.resolved.len(),
            report.generated.len()
        );

        report
    }

    fn expire_offers(&mut self, round: u32, report: &mut TransferRoundReport) {
        for offer in self
            .state
            .outbox
            .iter_mut()
            .chain(self.state.inbox.iter_mut())
            .filter(|o| o.is_expired_at(round))
        {
            if offer.transition(OfferStatus::Expired, round).is_ok() {
                report.expired.push(offer.id);
            }
        }
    }

    fn resolve_outgoing(&mut self, round: u32, report: &mut TransferRoundReport) {
        let due: Vec<u32> = self
            .state
            .outbox
            .iter()
            .filter(|o| o.status == OfferStatus::Pending && o.created_round < round)
            .map(|o| o.id)
            .collect();

        for offer_id in due {
            let Some(offer) = self.state.offer(offer_id) else {
                continue;
            };

            let value = self
                .world
                .player(offer.player_id)
                .map(|p| p.value)
                .unwrap_or(offer.fee);

            let decision = OfferEvaluator::evaluate(offer.fee, offer.wage, value);

            let Some(offer) = self.state.offer_mut(offer_id) else {
                continue;
            };

            let status = match decision {
                OfferDecision::Accept => offer.transition(OfferStatus::Accepted, round).map(|_| OfferStatus::Accepted),
                OfferDecision::Counter(terms) => offer.counter_with(terms, round).map(|_| OfferStatus::Countered),
                OfferDecision::Reject => offer.transition(OfferStatus::Rejected, round).map(|_| OfferStatus::Rejected),
            };

            let Ok(status) = status else {
                continue;
            };

            info!("💼 Offer {} for {}: {:?}", offer_id, offer.player_name, status);
            report.resolved.push((offer_id, status));

            if status == OfferStatus::Accepted {
                // an unaffordable purchase waits in the outbox for a manual settle
                let _ = self.settle(offer_id, round);
            }
        }
    }

    fn generate_incoming<R: Rng + ?Sized>(&mut self, round: u32, rng: &mut R, report: &mut TransferRoundReport) {
        let roll: f64 = rng.gen_range(0.0..1.0);
        let count = if roll < INCOMING_OFFER_WEIGHTS[0] {
            0
        } else if roll < INCOMING_OFFER_WEIGHTS[0] + INCOMING_OFFER_WEIGHTS[1] {
            1
        } else {
            2
        };

        for _ in 0..count {
            let candidates: Vec<u32> = self
                .world
                .squad(self.user_club_id)
                .into_iter()
                .filter(|p| !self.state.has_open_offer(OfferDirection::Incoming, p.id))
                .map(|p| p.id)
                .collect();

            let buyers: Vec<u32> = self
                .world
                .clubs
                .iter()
                .filter(|c| c.id != self.user_club_id)
                .map(|c| c.id)
                .collect();

            if candidates.is_empty() || buyers.is_empty() {
                break;
            }

            let player_id = candidates[IntegerUtils::random(rng, 0, candidates.len() as i32) as usize];
            let buyer_id = buyers[IntegerUtils::random(rng, 0, buyers.len() as i32) as usize];

            let Some(player) = self.world.player(player_id) else {
                continue;
            };

            let fee = percent_of(
                player.value,
                IntegerUtils::random(rng, INCOMING_FEE_PERCENT.0, INCOMING_FEE_PERCENT.1) as i64,
            );
            let wage = percent_of(
                player.wage,
                IntegerUtils::random(rng, INCOMING_WAGE_PERCENT.0, INCOMING_WAGE_PERCENT.1) as i64,
            );
            let player_name = player.name.clone();

            let id = self.state.allocate_id();

            let offer = TransferOffer {
                id,
                direction: OfferDirection::Incoming,
                player_id,
                player_name,
                buying_club_id: buyer_id,
                buying_club_name: self.world.clubs.name(buyer_id),
                selling_club_id: self.user_club_id,
                selling_club_name: self.world.clubs.name(self.user_club_id),
                fee,
                wage,
                status: OfferStatus::Pending,
                created_round: round,
                expiry_round: round + self.rules.offer_lifetime_rounds,
                counter: None,
                settled: false,
                resolved_round: None,
            };

            info!(
                "📨 Offer {}: {} bid {} for {}",
                id, offer.buying_club_name, fee, offer.player_name
            );

            self.state.inbox.push(offer);
            report.generated.push(id);
        }
    }

    /// Open offers lapse at the end of a season and the round marker restarts.
    pub fn reset_for_new_season(&mut self) {
        let round = self.state.last_processed_round.unwrap_or(0);

        for offer in self
            .state
            .outbox
            .iter_mut()
            .chain(self.state.inbox.iter_mut())
            .filter(|o| o.is_open())
        {
            let _ = offer.transition(OfferStatus::Expired, round);
        }

        self.state.archive();

        // accepted purchases never paid for lapse with the season
        let unsettled: Vec<TransferOffer> = self.state.outbox.drain(..).collect();

        for offer in unsettled {
            self.state.history.push(offer);
        }

        self.state.last_processed_round = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::{Club, ClubFinances, ClubRegistry, Player};
    use crate::reference::PlayerPosition;
    use crate::shared::Currency;
    use crate::utils::RandomSource;

    const USER: u32 = 1;

    fn player(id: u32, club_id: u32, value: Money) -> Player {
        Player {
            id,
            club_id,
            name: format!("Player {}", id),
            position: PlayerPosition::Forward,
            age: 26,
            rating: 70,
            value,
            wage: 50_000,
            form: 0.0,
        }
    }

    fn world() -> World {
        World {
            clubs: ClubRegistry::new(vec![
                Club::new(1, "Northfield", "ENG", 10, 70.0),
                Club::new(2, "Southport", "ENG", 10, 68.0),
                Club::new(3, "Eastmoor", "ENG", 10, 66.0),
            ]),
            players: vec![
                player(10, 2, 10_000_000),
                player(11, 2, 10_000_000),
                player(12, 3, 10_000_000),
                player(20, USER, 4_000_000),
                player(21, USER, 6_000_000),
            ],
        }
    }

    struct Fixture {
        state: TransferState,
        world: World,
        finances: ClubFinances,
        rules: EconomyRules,
    }

    impl Fixture {
        fn new(cash: Money) -> Self {
            Fixture {
                state: TransferState::default(),
                world: world(),
                finances: ClubFinances::new(cash, Currency::Eur),
                rules: EconomyRules::default(),
            }
        }

        fn pipeline(&mut self) -> TransferPipeline<'_, ClubFinances> {
            TransferPipeline::new(&mut self.state, &mut self.world, &mut self.finances, USER, &self.rules)
        }
    }

    #[test]
    fn offers_need_an_open_window() {
        let mut fixture = Fixture::new(50_000_000);

        assert_eq!(
            fixture.pipeline().make_offer(10, 9_500_000, 50_000, 8),
            Err(TransferError::WindowClosed { round: 8 })
        );
        assert_eq!(
            fixture.pipeline().make_offer(20, 9_500_000, 50_000, 1),
            Err(TransferError::OwnPlayer(20))
        );
        assert_eq!(
            fixture.pipeline().make_offer(99, 9_500_000, 50_000, 1),
            Err(TransferError::UnknownPlayer(99))
        );

        assert!(fixture.pipeline().make_offer(10, 9_500_000, 50_000, 1).is_ok());
        assert_eq!(
            fixture.pipeline().make_offer(10, 9_600_000, 50_000, 1),
            Err(TransferError::DuplicateOffer(10))
        );
    }

    #[test]
    fn last_window_round_refuses_new_bids() {
        let mut fixture = Fixture::new(50_000_000);
        let mut rng = RandomSource::seeded(6);

        assert_eq!(
            fixture.pipeline().make_offer(10, 9_500_000, 50_000, 4),
            Err(TransferError::WindowClosing { round: 4 })
        );
        assert_eq!(
            fixture.pipeline().make_offer(10, 9_500_000, 50_000, 21),
            Err(TransferError::WindowClosing { round: 21 })
        );

        let id = fixture.pipeline().make_offer(10, 9_500_000, 50_000, 20).unwrap();
        let report = fixture.pipeline().process_round(21, &mut rng);

        assert!(report.resolved.contains(&(id, OfferStatus::Accepted)));
    }

    #[test]
    fn oversized_fee_is_evaluated_without_overflow() {
        let mut fixture = Fixture::new(50_000_000);
        let mut rng = RandomSource::seeded(7);
        let fee = Money::MAX / 50;

        let id = fixture.pipeline().make_offer(10, fee, 50_000, 1).unwrap();
        let report = fixture.pipeline().process_round(2, &mut rng);

        assert!(report.resolved.contains(&(id, OfferStatus::Accepted)));
        assert!(fixture.state.offer(id).is_some_and(|o| o.awaits_settlement()));
        assert_eq!(
            fixture.pipeline().settle(id, 3),
            Err(TransferError::InsufficientFunds {
                required: fee,
                available: 50_000_000
            })
        );
        assert_eq!(fixture.world.player(10).map(|p| p.club_id), Some(2));
    }

    #[test]
    fn outgoing_offers_resolve_the_following_round() {
        let mut fixture = Fixture::new(50_000_000);
        let mut rng = RandomSource::seeded(1);

        let accepted = fixture.pipeline().make_offer(10, 9_500_000, 50_000, 1).unwrap();
        let countered = fixture.pipeline().make_offer(11, 7_500_000, 50_000, 1).unwrap();
        let rejected = fixture.pipeline().make_offer(12, 6_000_000, 50_000, 1).unwrap();

        let same_round = fixture.pipeline().process_round(1, &mut rng);
        assert!(same_round.resolved.is_empty());

        let report = fixture.pipeline().process_round(2, &mut rng);

        assert!(report.resolved.contains(&(accepted, OfferStatus::Accepted)));
        assert!(report.resolved.contains(&(countered, OfferStatus::Countered)));
        assert!(report.resolved.contains(&(rejected, OfferStatus::Rejected)));

        assert_eq!(fixture.world.player(10).map(|p| p.club_id), Some(USER));
        assert_eq!(fixture.finances.cash, 40_500_000);

        let counter = fixture.state.offer(countered).and_then(|o| o.counter).unwrap();
        assert_eq!(counter.fee, 9_500_000);
        assert_eq!(counter.wage, 52_500);

        assert_eq!(
            fixture.pipeline().respond_to_counter(countered, true, 3),
            Ok(OfferStatus::Accepted)
        );
        assert_eq!(fixture.world.player(11).map(|p| p.club_id), Some(USER));
        assert_eq!(fixture.world.player(11).map(|p| p.wage), Some(52_500));
        assert_eq!(fixture.finances.cash, 31_000_000);

        assert!(fixture.state.outbox.is_empty());
        assert!(fixture.state.history.iter().any(|o| o.id == rejected));
    }

    #[test]
    fn process_round_is_idempotent() {
        let mut fixture = Fixture::new(50_000_000);
        let mut rng = RandomSource::seeded(5);

        fixture.pipeline().make_offer(10, 9_500_000, 50_000, 0).unwrap();
        fixture.pipeline().process_round(1, &mut rng);

        let snapshot = (fixture.state.clone(), fixture.world.clone(), fixture.finances.clone());

        let again = fixture.pipeline().process_round(1, &mut rng);

        assert!(again.is_empty());
        assert_eq!(snapshot, (fixture.state.clone(), fixture.world.clone(), fixture.finances.clone()));
    }

    #[test]
    fn short_cash_leaves_purchase_waiting() {
        let mut fixture = Fixture::new(1_000_000);
        let mut rng = RandomSource::seeded(2);

        let id = fixture.pipeline().make_offer(10, 9_500_000, 50_000, 1).unwrap();
        fixture.pipeline().process_round(2, &mut rng);

        let offer = fixture.state.offer(id).unwrap();
        assert!(offer.awaits_settlement());
        assert_eq!(fixture.world.player(10).map(|p| p.club_id), Some(2));

        assert_eq!(
            fixture.pipeline().settle(id, 3),
            Err(TransferError::InsufficientFunds {
                required: 9_500_000,
                available: 1_000_000
            })
        );

        fixture.finances.cash = 20_000_000;

        assert!(fixture.pipeline().settle(id, 3).is_ok());
        assert_eq!(fixture.world.player(10).map(|p| p.club_id), Some(USER));
        assert_eq!(fixture.finances.cash, 10_500_000);
        assert_eq!(fixture.pipeline().settle(id, 3), Err(TransferError::UnknownOffer(id)));
    }

    #[test]
    fn pending_offers_expire_even_outside_window() {
        let mut fixture = Fixture::new(50_000_000);
        let mut rng = RandomSource::seeded(3);

        let id = fixture.pipeline().make_offer(10, 9_500_000, 50_000, 3).unwrap();

        let report = fixture.pipeline().process_round(8, &mut rng);

        assert_eq!(report.expired, vec![id]);
        assert!(report.generated.is_empty());
        assert_eq!(fixture.state.history.iter().last().map(|o| o.status), Some(OfferStatus::Expired));
    }

    #[test]
    fn incoming_offers_skip_players_already_bid_for() {
        let mut fixture = Fixture::new(50_000_000);
        let mut rng = RandomSource::seeded(11);

        for round in 0..=4 {
            let report = fixture.pipeline().process_round(round, &mut rng);

            for id in report.generated {
                let offer = fixture.state.offer(id).unwrap();
                assert!(offer.fee >= percent_of(offer_value(&fixture.world, offer.player_id), 80));
                assert!(offer.fee <= percent_of(offer_value(&fixture.world, offer.player_id), 130));
            }

            for player_id in [20, 21] {
                let open = fixture
                    .state
                    .inbox
                    .iter()
                    .filter(|o| o.player_id == player_id && o.is_open())
                    .count();
                assert!(open <= 1);
            }
        }
    }

    fn offer_value(world: &World, player_id: u32) -> Money {
        world.player(player_id).map(|p| p.value).unwrap_or(0)
    }

    #[test]
    fn accepting_incoming_offer_sells_player() {
        let mut fixture = Fixture::new(0);
        let mut rng = RandomSource::seeded(4);

        let mut generated = Vec::new();
        for round in 0..=4 {
            generated.extend(fixture.pipeline().process_round(round, &mut rng).generated);
            if !generated.is_empty() {
                break;
            }
        }

        let Some(&offer_id) = generated.first() else {
            return;
        };

        let round = fixture.state.last_processed_round.unwrap();
        let offer = fixture.state.offer(offer_id).cloned().unwrap();

        assert_eq!(
            fixture.pipeline().respond_to_incoming(offer_id, true, round),
            Ok(OfferStatus::Accepted)
        );
        assert_eq!(fixture.finances.cash, offer.fee);
        assert_eq!(fixture.world.player(offer.player_id).map(|p| p.club_id), Some(offer.buying_club_id));
        assert!(fixture.state.inbox.iter().all(|o| o.player_id != offer.player_id || !o.is_open()));
    }

    #[test]
    fn new_season_clears_open_offers() {
        let mut fixture = Fixture::new(50_000_000);

        fixture.pipeline().make_offer(10, 9_500_000, 50_000, 1).unwrap();
        fixture.state.last_processed_round = Some(30);

        fixture.pipeline().reset_for_new_season();

        assert!(fixture.state.outbox.is_empty());
        assert!(fixture.state.inbox.is_empty());
        assert_eq!(fixture.state.last_processed_round, None);
        assert_eq!(fixture.state.history.iter().last().map(|o| o.status), Some(OfferStatus::Expired));
    }
}
