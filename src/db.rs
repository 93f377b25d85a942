use async_trait::async_trait;
use crate::config::DatabaseConfig;
use crate::error::ApiError;
use crate::migrations;
use crate::models::{NewPet, Pet};
use crate::repository::{PetRepository, PetWriter};
use deadpool_postgres::{Config, Object, Pool, PoolConfig, Runtime, SslMode};
use native_tls::TlsConnector;
use postgres_native_tls::MakeTlsConnector;
use tokio_postgres::Row;
use tracing::{error, info, warn};

/// PostgreSQL-backed pet store.
/// Holds a deadpool `Pool`; each call borrows a connection and returns it on drop.
#[derive(Clone)]
pub struct Database {
    pool: Pool,
}

impl Database {
    /// Build the connection pool and verify it with a round trip.
    pub async fn new(config: DatabaseConfig) -> Result<Self, ApiError> {
        info!("Creating PostgreSQL connection pool for host: {}:{}", config.host, config.port);

        let pool = Self::create_pool(config)?;

        let db = Database { pool };
        db.health_check().await?;

        Ok(db)
    }

    fn create_pool(config: DatabaseConfig) -> Result<Pool, ApiError> {
        let mut pg_config = Config::new();

        pg_config.host = Some(config.host);
        pg_config.port = Some(config.port);
        pg_config.dbname = Some(config.database);
        pg_config.user = Some(config.username);
        if !config.password.is_empty() {
            pg_config.password = Some(config.password);
        }

        pg_config.ssl_mode = Some(match config.ssl_mode.as_str() {
            "disable" => SslMode::Disable,
            "prefer" => SslMode::Prefer,
            "require" => SslMode::Require,
            other => {
                warn!("Unknown SSL mode '{}', defaulting to 'prefer'", other);
                SslMode::Prefer
            }
        });

        pg_config.manager = Some(deadpool_postgres::ManagerConfig {
            recycling_method: deadpool_postgres::RecyclingMethod::Fast,
        });

        let mut pool_config = PoolConfig::new(config.max_connections as usize);
        pool_config.timeouts.wait = Some(config.connection_timeout);
        pool_config.timeouts.create = Some(config.connection_timeout);
        pool_config.timeouts.recycle = Some(config.connection_timeout);
        pg_config.pool = Some(pool_config);

        let tls_connector = TlsConnector::builder()
            .build()
            .map_err(|e| {
                error!("Failed to create TLS connector: {}", e);
                ApiError::Database(format!("TLS connector creation failed: {}", e))
            })?;
        let tls = MakeTlsConnector::new(tls_connector);

        pg_config.create_pool(Some(Runtime::Tokio1), tls)
            .map_err(|e| {
                error!("Failed to create connection pool: {}", e);
                ApiError::Database(format!("Connection pool creation failed: {}", e))
            })
    }

    async fn get_connection(&self) -> Result<Object, ApiError> {
        self.pool.get().await.map_err(ApiError::from)
    }

    /// `SELECT 1` round trip to confirm the database is reachable.
    pub async fn health_check(&self) -> Result<(), ApiError> {
        let client = self.get_connection().await?;

        client.execute("SELECT 1", &[])
            .await
            .map_err(|e| {
                error!("Database health check failed: {}", e);
                ApiError::Database(format!("Health check failed: {}", e))
            })?;

        info!("Database health check successful");
        Ok(())
    }

    /// Bring the schema up to date; returns the number of migrations applied.
    pub async fn migrate(&self) -> Result<usize, ApiError> {
        let mut client = self.get_connection().await?;
        migrations::run(&mut client).await
    }

    pub async fn count_pets(&self) -> Result<i64, ApiError> {
        let client = self.get_connection().await?;

        let row = client.query_one("SELECT COUNT(*) FROM pets", &[])
            .await
            .map_err(ApiError::from)?;

        Ok(row.get(0))
    }
}

#[async_trait]
impl PetRepository for Database {
    async fn find_by_id(&self, id: i32) -> Result<Option<Pet>, ApiError> {
        let client = self.get_connection().await?;
        let query = "SELECT id, name, species FROM pets WHERE id = $1";

        let row = client.query_opt(query, &[&id])
            .await
            .map_err(ApiError::from)?;

        Ok(row.as_ref().map(pet_from_row))
    }

    async fn find_by_species(&self, species: &str) -> Result<Vec<Pet>, ApiError> {
        let client = self.get_connection().await?;
        let query = "SELECT id, name, species FROM pets WHERE species = $1 ORDER BY id";

        let rows = client.query(query, &[&species])
            .await
            .map_err(ApiError::from)?;

        Ok(rows.iter().map(pet_from_row).collect())
    }
}

#[async_trait]
impl PetWriter for Database {
    async fn delete_all(&self) -> Result<u64, ApiError> {
        let client = self.get_connection().await?;

        let deleted = client.execute("DELETE FROM pets", &[])
            .await
            .map_err(ApiError::from)?;

        info!("Deleted {} pets", deleted);
        Ok(deleted)
    }

    async fn insert(&self, pet: NewPet) -> Result<Pet, ApiError> {
        pet.validate().map_err(ApiError::Validation)?;

        let client = self.get_connection().await?;
        let query = "INSERT INTO pets (name, species) VALUES ($1, $2) RETURNING id, name, species";

        let row = client.query_one(query, &[&pet.name, &pet.species])
            .await
            .map_err(ApiError::from)?;

        let created = pet_from_row(&row);
        info!("Created pet with id: {}", created.id);
        Ok(created)
    }
}

fn pet_from_row(row: &Row) -> Pet {
    Pet {
        id: row.get(0),
        name: row.get(1),
        species: row.get(2),
    }
}
