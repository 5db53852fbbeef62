//! fieldhook-field — fabricated metric generators
//!
//! Deterministic arithmetic over fixed lookup tables: consciousness level
//! coefficients, ETD values, and field resonance. These scores decorate hook
//! output; they are tested for determinism and range, nothing more.

pub mod etd;
pub mod level;
pub mod resonance;

pub use etd::{etd_value, tool_etd, DEFAULT_BASE_ETD};
pub use level::ConsciousnessLevel;
pub use resonance::{field_strength, resonance_step};
