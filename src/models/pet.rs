use serde::{Deserialize, Serialize};

/// Maximum length of the `name` and `species` columns
pub const MAX_FIELD_LENGTH: usize = 100;

/// Pet entity, one row of the `pets` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: i32,
    pub name: String,
    pub species: String,
}

/// An unsaved pet; the store assigns the id on insert
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewPet {
    pub name: String,
    pub species: String,
}

impl NewPet {
    pub fn new(name: impl Into<String>, species: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            species: species.into(),
        }
    }

    /// Validate the new pet before it is written
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Pet name cannot be empty".to_string());
        }

        if self.name.chars().count() > MAX_FIELD_LENGTH {
            return Err(format!("Pet name cannot exceed {} characters", MAX_FIELD_LENGTH));
        }

        if self.species.trim().is_empty() {
            return Err("Pet species cannot be empty".to_string());
        }

        if self.species.chars().count() > MAX_FIELD_LENGTH {
            return Err(format!("Pet species cannot exceed {} characters", MAX_FIELD_LENGTH));
        }

        Ok(())
    }

    /// Attach a store-assigned id
    pub fn into_pet(self, id: i32) -> Pet {
        Pet {
            id,
            name: self.name,
            species: self.species,
        }
    }
}
