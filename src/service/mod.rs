pub mod classify;
pub mod marking;
