//! Service layer for business logic with dependency injection.
//!
//! This module contains services that encapsulate workflow logic and accept
//! trait-based dependencies, enabling testing with mock implementations.

pub mod cherry;
pub mod gh;
pub mod propose;
pub mod prune;
pub mod stage;

#[cfg(test)]
pub mod test_mocks;

pub use cherry::{CherryService, CherrySummary};
pub use propose::ProposeService;
pub use prune::{PrunePlan, PruneService};
pub use stage::{StageService, StageSelection};
