//! Core data models.

mod club;
mod fixture;
mod ids;
mod league;
mod nation;
mod season;
mod standing;

pub use club::*;
pub use fixture::*;
pub use ids::*;
pub use league::*;
pub use nation::*;
pub use season::*;
pub use standing::*;
