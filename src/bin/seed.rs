// Wipes the pets table and fills it with generated sample pets

use tracing::{error, info};

use pet_directory_api::{
    config::Config,
    db::Database,
    middleware::init_tracing,
    seed::Seeder,
};

#[tokio::main]
async fn main() {
    if let Err(e) = init_tracing() {
        eprintln!("Failed to initialize tracing: {}", e);
        std::process::exit(1);
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    let database = match Database::new(config.database.clone()).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = database.migrate().await {
        error!("Failed to run database migrations: {}", e);
        std::process::exit(1);
    }

    info!("Seeding...");
    if let Err(e) = Seeder::new(&database).run(config.seed_count).await {
        error!("Seeding failed: {}", e);
        std::process::exit(1);
    }

    match database.count_pets().await {
        Ok(count) => info!("Done! The directory now holds {} pets", count),
        Err(e) => {
            error!("Failed to count pets after seeding: {}", e);
            std::process::exit(1);
        }
    }
}
