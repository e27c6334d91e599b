pub mod game;
pub mod partnership;
pub mod standing;

pub use game::{GameRecord, GameResult};
pub use partnership::{whole_percent, Band, PartnershipRecord};
pub use standing::{round_one_decimal, PlayerAggregate, StandingRow};
