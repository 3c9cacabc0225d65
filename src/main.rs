use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use demo_auth_server::auth::handlers::{check_cookie, login_cookie, logout_cookie, register};
use demo_auth_server::products::handlers::{create_product, get_product, list_products};
use demo_auth_server::{health_check, items, AppError, AppState, Settings};
use dotenv::dotenv;
use std::net::TcpListener;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[actix_web::main]
async fn main() -> demo_auth_server::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    // Load configuration
    let config = Settings::new()?;
    info!("Configuration loaded successfully");

    // Initialize application state; connections are lazy
    let state = AppState::new(config.clone())?;

    // Product schema lives in the relational database; the session
    // store needs no migrations. Auth stays usable when the database
    // is down, so a failure here only disables the product endpoints.
    if let Err(e) = sqlx::migrate!().run(&state.db_pool).await {
        warn!("Database migrations failed, product endpoints unavailable: {}", e);
    }

    let workers = config.server.workers as usize;
    let listener = TcpListener::bind(format!("{}:{}", config.server.host, config.server.port))?;
    info!(
        "Starting server at {}:{}",
        config.server.host, config.server.port
    );

    let state = web::Data::new(state);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = if config.cors.enabled {
            let mut cors_config = Cors::default();

            if config.cors.allow_any_origin {
                cors_config = cors_config
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header();
            } else {
                for origin in &config.cors.allowed_origins {
                    cors_config = cors_config.allowed_origin(origin);
                }
                cors_config = cors_config
                    .allowed_methods(vec!["GET", "POST"])
                    .allowed_headers(vec!["Content-Type"])
                    // Cookies only flow cross-origin with credentials enabled
                    .supports_credentials();
            }

            cors_config.max_age(config.cors.max_age as usize)
        } else {
            // CORS disabled - use most restrictive settings
            Cors::default()
        };

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .route("/health", web::get().to(health_check))
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(register))
                    .route("/login-cookie/", web::post().to(login_cookie))
                    .route("/check-cookie/", web::get().to(check_cookie))
                    .route("/logout-cookie/", web::get().to(logout_cookie)),
            )
            .service(
                web::scope("/api/v1/products")
                    .route("/", web::get().to(list_products))
                    .route("/", web::post().to(create_product))
                    .route("/{id}/", web::get().to(get_product)),
            )
            .service(
                web::scope("/items")
                    .route("/", web::get().to(items::list_items))
                    .route("/{id}/", web::get().to(items::get_item)),
            )
    })
    .listen(listener)?
    .workers(workers)
    .run()
    .await
    .map_err(|e| AppError::InternalError(e.to_string()))?;

    Ok(())
}
