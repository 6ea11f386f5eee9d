//! Error codes for the backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes. All codes
//! are SCREAMING_SNAKE_CASE and map 1:1 to the strings that appear in HTTP
//! responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request validation
    ValidationError,
    InvalidGameId,
    BadRequest,

    // Game rule violations (§5, domain::errors::DomainError)
    NotYourTurn,
    GameNotActive,
    CardNotInHand,
    InvalidCombination,
    CannotBeat,
    MustLeadWithThreeOfDiamonds,
    MustPlayHighestBeatingSingle,
    CannotPassWhenLeading,

    // Resource not found
    GameNotFound,
    NotFound,

    // Concurrency / membership conflicts
    ConcurrentUpdate,
    NotAMember,

    // System errors
    DbError,
    DbUnavailable,
    Internal,
    ConfigError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidGameId => "INVALID_GAME_ID",
            Self::BadRequest => "BAD_REQUEST",
            Self::NotYourTurn => "NOT_YOUR_TURN",
            Self::GameNotActive => "GAME_NOT_ACTIVE",
            Self::CardNotInHand => "CARD_NOT_IN_HAND",
            Self::InvalidCombination => "INVALID_COMBINATION",
            Self::CannotBeat => "CANNOT_BEAT",
            Self::MustLeadWithThreeOfDiamonds => "MUST_LEAD_WITH_THREE_OF_DIAMONDS",
            Self::MustPlayHighestBeatingSingle => "MUST_PLAY_HIGHEST_BEATING_SINGLE",
            Self::CannotPassWhenLeading => "CANNOT_PASS_WHEN_LEADING",
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",
            Self::ConcurrentUpdate => "CONCURRENT_UPDATE",
            Self::NotAMember => "NOT_A_MEMBER",
            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Maps a pure-domain rule violation to the code carried in its HTTP
/// response. Kept here rather than on `DomainError` itself so the domain
/// layer stays free of web-boundary concerns.
impl From<&crate::domain::errors::DomainError> for ErrorCode {
    fn from(err: &crate::domain::errors::DomainError) -> Self {
        use crate::domain::errors::DomainError as D;
        match err {
            D::NotYourTurn => Self::NotYourTurn,
            D::GameNotActive => Self::GameNotActive,
            D::CardNotInHand => Self::CardNotInHand,
            D::InvalidCombination => Self::InvalidCombination,
            D::CannotBeat => Self::CannotBeat,
            D::MustLeadWithThreeOfDiamonds => Self::MustLeadWithThreeOfDiamonds,
            D::MustPlayHighestBeatingSingle => Self::MustPlayHighestBeatingSingle,
            D::CannotPassWhenLeading => Self::CannotPassWhenLeading,
            D::RoomNotFound => Self::GameNotFound,
            D::NotAMember => Self::NotAMember,
            D::ConcurrentUpdate => Self::ConcurrentUpdate,
            D::StoreUnavailable | D::TimeoutExceeded => Self::DbUnavailable,
            D::StateMissing | D::SeatMissing | D::HandCorrupt | D::ParseCard(_) => Self::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_display() {
        assert_eq!(format!("{}", ErrorCode::NotYourTurn), "NOT_YOUR_TURN");
        assert_eq!(ErrorCode::ConcurrentUpdate.as_str(), "CONCURRENT_UPDATE");
    }
}
