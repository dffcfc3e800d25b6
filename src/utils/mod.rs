pub mod retry;
pub mod segment;
pub mod shuffle;
pub mod validation;
