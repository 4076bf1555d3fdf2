pub mod formation;
pub mod mentality;
pub mod team_instructions;

pub use formation::Formation;
pub use mentality::{Mentality, MentalityModifiers};
pub use team_instructions::{PlayStyle, Tackling, TacticalInstructions};
