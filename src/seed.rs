//! Sample data for a fresh pet directory.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use crate::{
    error::ApiError,
    models::{NewPet, Pet},
    repository::PetWriter,
};

pub const SPECIES: &[&str] = &["Dog", "Cat", "Chicken", "Hamster", "Turtle"];

pub const FIRST_NAMES: &[&str] = &[
    "Robin", "Mochi", "Biscuit", "Luna", "Milo", "Pepper", "Olive", "Ziggy", "Hazel", "Otis",
    "Clover", "Juniper", "Waffles", "Nori", "Pickles", "Maple", "Rocket", "Tofu", "Sage", "Bean",
    "Ginger", "Pumpkin", "Scout", "Willow", "Button",
];

/// Generate `count` pets with a random first name and species each.
pub fn generate_pets<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<NewPet> {
    (0..count)
        .map(|_| {
            let name = FIRST_NAMES.choose(rng).copied().unwrap_or("Robin");
            let species = SPECIES.choose(rng).copied().unwrap_or("Dog");
            NewPet::new(name, species)
        })
        .collect()
}

/// Replaces the contents of a pet store with generated sample data.
pub struct Seeder<'a, W: PetWriter + ?Sized> {
    store: &'a W,
}

impl<'a, W: PetWriter + ?Sized> Seeder<'a, W> {
    pub fn new(store: &'a W) -> Self {
        Self { store }
    }

    pub async fn run(&self, count: usize) -> Result<Vec<Pet>, ApiError> {
        let new_pets = generate_pets(&mut rand::thread_rng(), count);
        self.replace_with(new_pets).await
    }

    /// Delete every stored pet, then insert `pets` in order
    pub async fn replace_with(&self, pets: Vec<NewPet>) -> Result<Vec<Pet>, ApiError> {
        info!("Seeding {} pets", pets.len());

        let deleted = self.store.delete_all().await?;
        info!("Cleared {} existing pets", deleted);

        let mut created = Vec::with_capacity(pets.len());
        for pet in pets {
            let pet = self.store.insert(pet).await?;
            info!("Seeded pet {}: {} the {}", pet.id, pet.name, pet.species);
            created.push(pet);
        }

        info!("Successfully seeded {} pets", created.len());
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryPetRepository, PetRepository};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tokio_test::assert_ok;

    #[test]
    fn test_generate_pets_count_and_values() {
        let mut rng = StdRng::seed_from_u64(42);
        let pets = generate_pets(&mut rng, 50);

        assert_eq!(pets.len(), 50);
        for pet in &pets {
            assert!(pet.validate().is_ok());
            assert!(FIRST_NAMES.contains(&pet.name.as_str()));
            assert!(SPECIES.contains(&pet.species.as_str()));
        }
    }

    #[test]
    fn test_generate_pets_is_deterministic_for_a_seed() {
        let first = generate_pets(&mut StdRng::seed_from_u64(7), 10);
        let second = generate_pets(&mut StdRng::seed_from_u64(7), 10);
        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_zero_pets() {
        assert!(generate_pets(&mut StdRng::seed_from_u64(1), 0).is_empty());
    }

    #[tokio::test]
    async fn test_run_replaces_existing_pets() {
        let repo = assert_ok!(InMemoryPetRepository::with_pets([
            NewPet::new("Robin", "Hamster"),
            NewPet::new("Mochi", "Cat"),
            NewPet::new("Lee", "Dog"),
        ]));
        let seeder = Seeder::new(&repo);

        let first = assert_ok!(seeder.run(5).await);
        assert_eq!(first.len(), 5);
        assert_eq!(repo.len().await, 5);
        assert_eq!(repo.all().await, first);

        let second = assert_ok!(seeder.run(5).await);
        assert_eq!(repo.len().await, 5);
        assert_eq!(repo.all().await, second);

        // The old rows are gone; ids keep counting like a SERIAL column
        let ids: Vec<i32> = second.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![9, 10, 11, 12, 13]);
        assert!(assert_ok!(repo.find_by_id(1).await).is_none());
    }

    #[tokio::test]
    async fn test_replace_with_inserts_in_order() {
        let repo = InMemoryPetRepository::new();
        let seeder = Seeder::new(&repo);

        let created = assert_ok!(
            seeder
                .replace_with(vec![NewPet::new("Robin", "Hamster"), NewPet::new("Lee", "Hamster")])
                .await
        );
        assert_eq!(created.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2]);

        let hamsters = assert_ok!(repo.find_by_species("Hamster").await);
        assert_eq!(hamsters, created);
    }

    #[tokio::test]
    async fn test_run_with_zero_count_empties_store() {
        let repo = assert_ok!(InMemoryPetRepository::with_pets([NewPet::new("Robin", "Hamster")]));

        let created = assert_ok!(Seeder::new(&repo).run(0).await);
        assert!(created.is_empty());
        assert!(repo.is_empty().await);
    }
}
