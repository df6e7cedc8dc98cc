pub mod simulator;
pub use simulator::*;

pub mod career;
pub mod club;
pub mod context;
pub mod continent;
pub mod league;
pub mod r#match;
pub mod reference;
pub mod save;
pub mod transfers;

pub mod shared;
pub mod utils;

pub use career::{BoardObjective, CareerRecord, SeasonRecord, Trophy, TrophyKind};
pub use club::{Club, ClubFinances, ClubRegistry, Player, StaffQuality, Tactics, World};
pub use context::CareerContext;
pub use continent::{ContinentalSeason, MatchdaySummary, PlayedMatch};
pub use league::{LeagueTable, Season, SeasonId, SeasonSummary};
pub use reference::ReferenceData;
pub use save::{CareerSave, SaveError};
pub use transfers::{TransferError, TransferOffer};
pub use utils::*;
