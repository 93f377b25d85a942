// Pet handlers
// Read-only lookups against the injected pet repository

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse},
};
use tracing::info;

use crate::{
    error::ApiError,
    repository::SharedPetRepository,
    views,
};

/// Get pet by ID
/// GET /pets/:id
pub async fn get_pet_by_id(
    State(repo): State<SharedPetRepository>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = canonical_id(&raw_id)?;
    info!("Fetching pet with id: {}", id);

    // Ids wider than the SERIAL column cannot exist in the store
    let pet = match id.parse::<i32>() {
        Ok(column_id) => repo.find_by_id(column_id).await?,
        Err(_) => None,
    };
    let pet = pet.ok_or(ApiError::PetNotFound(id))?;

    Ok((StatusCode::OK, Html(views::pet_detail(&pet))))
}

/// List pets of one species
/// GET /species/:species
pub async fn get_pets_by_species(
    State(repo): State<SharedPetRepository>,
    Path(species): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Fetching pets with species: {}", species);

    let pets = repo.find_by_species(&species).await?;

    info!("Retrieved {} pets with species: {}", pets.len(), species);
    Ok((StatusCode::OK, Html(views::species_listing(&species, &pets))))
}

/// Decimal form of an id segment: ASCII digits only, leading zeros dropped.
/// Signs, whitespace and anything else are rejected.
fn canonical_id(raw: &str) -> Result<String, ApiError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::validation(format!("Invalid pet id: {}", raw)));
    }

    let trimmed = raw.trim_start_matches('0');
    if trimmed.is_empty() {
        Ok("0".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_id_accepts_digits() {
        assert_eq!(canonical_id("1").unwrap(), "1");
        assert_eq!(canonical_id("007").unwrap(), "7");
        assert_eq!(canonical_id("000").unwrap(), "0");
        assert_eq!(canonical_id("2147483648").unwrap(), "2147483648");
        assert_eq!(
            canonical_id("99999999999999999999999").unwrap(),
            "99999999999999999999999"
        );
    }

    #[test]
    fn test_canonical_id_rejects_non_digits() {
        for raw in ["", "+1", "-1", " 1", "1.0", "robin", "１"] {
            assert!(canonical_id(raw).is_err(), "{:?} should be rejected", raw);
        }
    }
}
