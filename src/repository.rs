// Data access interface for pets
// Handlers depend on this trait rather than on a concrete store

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    error::ApiError,
    models::{NewPet, Pet},
};

/// Read-only lookups the HTTP layer needs from the store
#[async_trait]
pub trait PetRepository: Send + Sync {
    /// Fetch a single pet by id, `None` when no row matches
    async fn find_by_id(&self, id: i32) -> Result<Option<Pet>, ApiError>;

    /// Fetch every pet whose species equals `species` exactly, ordered by id
    async fn find_by_species(&self, species: &str) -> Result<Vec<Pet>, ApiError>;
}

/// Bulk writes used to (re)populate the store; never reachable from HTTP
#[async_trait]
pub trait PetWriter: Send + Sync {
    /// Remove every pet, returning how many were deleted. Ids are not reused afterwards.
    async fn delete_all(&self) -> Result<u64, ApiError>;

    /// Store a validated pet and return it with its assigned id
    async fn insert(&self, pet: NewPet) -> Result<Pet, ApiError>;
}

/// Repository handle shared by every handler through router state
pub type SharedPetRepository = Arc<dyn PetRepository>;

/// A process-local store for exercising the router without PostgreSQL.
/// Ids are handed out sequentially starting at 1 and, like a `SERIAL`
/// column, keep counting after rows are deleted.
#[derive(Debug, Default)]
pub struct InMemoryPetRepository {
    table: RwLock<Table>,
}

#[derive(Debug)]
struct Table {
    rows: Vec<Pet>,
    next_id: i32,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

impl InMemoryPetRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository pre-filled with the given pets
    pub fn with_pets(pets: impl IntoIterator<Item = NewPet>) -> Result<Self, ApiError> {
        let mut rows = Vec::new();
        for (index, pet) in pets.into_iter().enumerate() {
            pet.validate().map_err(ApiError::Validation)?;
            let id = i32::try_from(index + 1)
                .map_err(|_| ApiError::validation("Too many pets for an i32 id"))?;
            rows.push(pet.into_pet(id));
        }

        let next_id = rows.len() as i32 + 1;
        Ok(Self {
            table: RwLock::new(Table { rows, next_id }),
        })
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.table.read().await.rows.is_empty()
    }

    /// Snapshot of every stored pet in id order
    pub async fn all(&self) -> Vec<Pet> {
        self.table.read().await.rows.clone()
    }
}

#[async_trait]
impl PetWriter for InMemoryPetRepository {
    async fn delete_all(&self) -> Result<u64, ApiError> {
        let mut table = self.table.write().await;
        let deleted = table.rows.len() as u64;
        table.rows.clear();
        Ok(deleted)
    }

    async fn insert(&self, pet: NewPet) -> Result<Pet, ApiError> {
        pet.validate().map_err(ApiError::Validation)?;

        let mut table = self.table.write().await;
        let id = table.next_id;
        table.next_id = id
            .checked_add(1)
            .ok_or_else(|| ApiError::validation("Pet id sequence exhausted"))?;

        let pet = pet.into_pet(id);
        table.rows.push(pet.clone());
        Ok(pet)
    }
}

#[async_trait]
impl PetRepository for InMemoryPetRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Pet>, ApiError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_species(&self, species: &str) -> Result<Vec<Pet>, ApiError> {
        let table = self.table.read().await;
        Ok(table.rows.iter().filter(|p| p.species == species).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repo = InMemoryPetRepository::new();
        assert!(repo.is_empty().await);

        let first = assert_ok!(repo.insert(NewPet::new("Robin", "Hamster")).await);
        let second = assert_ok!(repo.insert(NewPet::new("Mochi", "Cat")).await);

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_insert_rejects_invalid_pet() {
        let repo = InMemoryPetRepository::new();
        assert!(repo.insert(NewPet::new("", "Cat")).await.is_err());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_all_keeps_id_sequence() {
        let repo = assert_ok!(InMemoryPetRepository::with_pets([
            NewPet::new("Robin", "Hamster"),
            NewPet::new("Mochi", "Cat"),
        ]));

        assert_eq!(assert_ok!(repo.delete_all().await), 2);
        assert!(repo.is_empty().await);
        assert!(assert_ok!(repo.find_by_id(1).await).is_none());

        let next = assert_ok!(repo.insert(NewPet::new("Lee", "Dog")).await);
        assert_eq!(next.id, 3);
        assert_eq!(repo.all().await, vec![next]);
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let repo = assert_ok!(InMemoryPetRepository::with_pets([NewPet::new("Robin", "Hamster")]));

        let found = assert_ok!(repo.find_by_id(1).await);
        assert_eq!(found.map(|p| p.name), Some("Robin".to_string()));

        let missing = assert_ok!(repo.find_by_id(2).await);
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_find_by_species_is_exact_and_ordered() {
        let repo = assert_ok!(InMemoryPetRepository::with_pets([
            NewPet::new("Robin", "Hamster"),
            NewPet::new("Mochi", "Cat"),
            NewPet::new("Pip", "hamster"),
            NewPet::new("Lee", "Hamster"),
        ]));

        let hamsters = assert_ok!(repo.find_by_species("Hamster").await);
        let names: Vec<&str> = hamsters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Robin", "Lee"]);

        let none = assert_ok!(repo.find_by_species("Dragon").await);
        assert!(none.is_empty());
    }
}
