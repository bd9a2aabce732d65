//! Identity and presentation primitives shared across the nicktag crates.

/// Identifier types for both identity spaces.
pub mod ids;
/// Tag slot placement.
pub mod position;

pub use ids::{ExternalAccountId, IdParseError, PlayerId};
pub use position::TagPosition;
