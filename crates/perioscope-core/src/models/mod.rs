pub mod analysis;
pub mod confidence;
pub mod findings;
pub mod input;
pub mod landmark;
pub mod stage;
