use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use poem::{listener::TcpListener, EndpointExt, Route, Server};
use poem_openapi::OpenApiService;
use sea_orm::{Database, DatabaseConnection};

use careportal_auth::api::{AuthApi, HealthApi};
use careportal_auth::config::{init_logging, AuthSecrets};
use careportal_auth::services::{PasswordHasher, TokenService};
use careportal_auth::stores::{ActivityStore, CredentialStore, ProfileStore};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let secrets = match AuthSecrets::from_env() {
        Ok(secrets) => Arc::new(secrets),
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://careportal.db?mode=rwc".to_string());

    let db: DatabaseConnection = Database::connect(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Connected to database: {}", database_url);

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    tracing::info!("Database migrations completed");

    let token_service = Arc::new(TokenService::new(secrets.clone()));
    let credential_store = Arc::new(CredentialStore::new(
        db.clone(),
        PasswordHasher::new(secrets.password_pepper().to_string()),
    ));
    let profile_store = Arc::new(ProfileStore::new(db.clone()));
    let activity_store = Arc::new(ActivityStore::new(db.clone()));

    let auth_api = AuthApi::new(
        credential_store,
        profile_store,
        activity_store,
        token_service.clone(),
    );

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let bind_addr = format!("0.0.0.0:{}", port);

    let api_service = OpenApiService::new((HealthApi, auth_api), "CarePortal Auth", "1.0.0")
        .server(format!("http://localhost:{}/api", port));
    let ui = api_service.swagger_ui();

    // The bearer checker pulls the TokenService out of request data
    let app = Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui)
        .data(token_service);

    tracing::info!("Starting server on http://{}", bind_addr);
    tracing::info!("Swagger UI available at http://localhost:{}/swagger", port);

    Server::new(TcpListener::bind(bind_addr)).run(app).await
}
