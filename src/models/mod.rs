// Models module

pub mod pet;

// Re-export commonly used types
pub use pet::{NewPet, Pet};
