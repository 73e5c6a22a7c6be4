pub mod index;
pub mod plot;
