pub mod achievements;
pub mod media;
pub mod stats;
