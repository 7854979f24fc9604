pub mod fill_field;

pub use fill_field::*;
