pub mod agreement;
pub mod euphony;
pub mod style;
pub mod valency;
