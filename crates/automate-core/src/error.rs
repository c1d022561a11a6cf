use crate::id::LocationId;
use crate::tile::TileArea;

/// Errors raised by the automation core.
///
/// Negotiation outcomes (an ingredient that isn't there, a full chest) are
/// not errors; they surface as `Option`, `bool`, or accepted counts. These
/// variants cover caller bugs and per-entity runtime faults.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AutomateError {
    /// An object was constructed or used in a state that indicates a caller bug.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A shared inventory or object is already borrowed elsewhere.
    #[error("{0} is already in use")]
    InventoryBusy(String),

    /// A machine failed while being processed.
    #[error("{machine} at {location} {area} failed: {reason}")]
    MachineFault {
        machine: String,
        location: LocationId,
        area: TileArea,
        reason: String,
    },
}

impl AutomateError {
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }
}
