//! Deterministic particle simulation
//!
//! All animation state lives here:
//! - Seeded RNG only
//! - One fixed step per `update()`
//! - Stable iteration order (layers near → far, pools by index)
//! - No rendering or platform dependencies beyond the `Surface` trait

pub mod field;
pub mod input;
pub mod nebula;
pub mod shooting_star;
pub mod star;

pub use field::ParticleField;
pub use input::{Direction, FieldInput};
pub use nebula::Nebula;
pub use shooting_star::ShootingStar;
pub use star::{LayerKind, STAR_PALETTE, Star, StarLayer};
