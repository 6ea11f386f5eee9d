use std::fmt;

/// Pure-domain error taxonomy (§7). Kept flat and cheap to construct, the
/// way the teacher's `domain/errors.rs` does it; mapped to `AppError`/RFC
/// 7807 problem details at the service boundary, never serialized directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    // Preconditions (player-caused, expected in normal play)
    NotYourTurn,
    GameNotActive,
    CardNotInHand,
    InvalidCombination,
    CannotBeat,
    MustLeadWithThreeOfDiamonds,
    MustPlayHighestBeatingSingle,
    CannotPassWhenLeading,
    RoomNotFound,
    NotAMember,

    // Concurrency
    ConcurrentUpdate,

    // Transient / infra
    StoreUnavailable,
    TimeoutExceeded,

    // Consistency faults (should never happen; indicate corrupted state)
    StateMissing,
    SeatMissing,
    HandCorrupt,
    ParseCard(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::NotYourTurn => write!(f, "it is not this player's turn"),
            DomainError::GameNotActive => write!(f, "the game is not in an active phase"),
            DomainError::CardNotInHand => write!(f, "one or more cards are not in the player's hand"),
            DomainError::InvalidCombination => write!(f, "the submitted cards do not form a legal combination"),
            DomainError::CannotBeat => write!(f, "the submitted combination does not beat the last play"),
            DomainError::MustLeadWithThreeOfDiamonds => {
                write!(f, "the opening play of the first match must include the three of diamonds")
            }
            DomainError::MustPlayHighestBeatingSingle => {
                write!(f, "the player holds the only card that can beat the current play and must play it")
            }
            DomainError::CannotPassWhenLeading => write!(f, "the player leading a trick cannot pass"),
            DomainError::RoomNotFound => write!(f, "the room does not exist"),
            DomainError::NotAMember => write!(f, "the actor is not a seated member of this room"),
            DomainError::ConcurrentUpdate => write!(f, "the room was updated concurrently, retry with a fresh version"),
            DomainError::StoreUnavailable => write!(f, "the persistent store is unavailable"),
            DomainError::TimeoutExceeded => write!(f, "the operation exceeded its allotted time"),
            DomainError::StateMissing => write!(f, "expected game state is missing"),
            DomainError::SeatMissing => write!(f, "expected seat assignment is missing"),
            DomainError::HandCorrupt => write!(f, "persisted hand data failed to deserialize"),
            DomainError::ParseCard(s) => write!(f, "invalid card token: {s:?}"),
        }
    }
}

impl std::error::Error for DomainError {}

impl DomainError {
    /// True for errors that are safe to retry without any other state
    /// change (a fresh load and re-apply is expected to succeed).
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::ConcurrentUpdate | DomainError::StoreUnavailable)
    }
}

/// Adapters return `DbErr` directly (per the teacher's layering: adapters
/// are SeaORM-specific, repos translate to the connection-generic domain
/// error). `optimistic_update_then_fetch` signals a lock mismatch with a
/// `DbErr::Custom("OPTIMISTIC_LOCK:...")` payload; everything else maps to
/// `StoreUnavailable` as a conservative default.
impl From<sea_orm::DbErr> for DomainError {
    fn from(err: sea_orm::DbErr) -> Self {
        match &err {
            sea_orm::DbErr::RecordNotFound(_) => DomainError::RoomNotFound,
            sea_orm::DbErr::Custom(payload) if payload.starts_with("OPTIMISTIC_LOCK:") => DomainError::ConcurrentUpdate,
            sea_orm::DbErr::Custom(payload) if payload == "LEASE_HELD_BY_OTHER" => DomainError::ConcurrentUpdate,
            sea_orm::DbErr::ConnectionAcquire(_) => DomainError::StoreUnavailable,
            _ => DomainError::StoreUnavailable,
        }
    }
}
