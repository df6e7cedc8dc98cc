use crate::shared::Money;
use crate::transfers::OfferStatus;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error("transfer window is closed in round {round}")]
    WindowClosed { round: u32 },

    #[error("transfer window closes after round {round}, bids need a round to be answered")]
    WindowClosing { round: u32 },

    #[error("player {0} not found")]
    UnknownPlayer(u32),

    #[error("offer {0} not found")]
    UnknownOffer(u32),

    #[error("player {0} already plays for your club")]
    OwnPlayer(u32),

    #[error("player {0} is not in your squad")]
    NotInSquad(u32),

    #[error("an open offer for player {0} already exists")]
    DuplicateOffer(u32),

    #[error("offer fee must be positive")]
    InvalidFee,

    #[error("offer {id} cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        id: u32,
        from: OfferStatus,
        to: OfferStatus,
    },

    #[error("offer {0} has not been accepted")]
    NotAccepted(u32),

    #[error("offer {0} is already settled")]
    AlreadySettled(u32),

    #[error("insufficient funds: {required} required, {available} available")]
    InsufficientFunds { required: Money, available: Money },
}
