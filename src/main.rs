use std::env;

use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use pushkind_common::db::establish_connection_pool;
use pushkind_common::models::config::CommonServerConfig;
use tera::Tera;

use pushkind_blog::models::config::ServerConfig;
use pushkind_blog::repository::DieselRepository;
use pushkind_blog::routes::categories::{
    create_category, edit_category, new_category, show_categories, update_category,
};
use pushkind_blog::routes::main::{index, not_assigned};

/// Log a startup failure and turn it into an I/O error for `main`.
fn setup_error(context: &str, e: impl std::fmt::Display) -> std::io::Error {
    log::error!("{context}: {e}");
    std::io::Error::other(format!("{context}: {e}"))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
    let server_config = ServerConfig::load("config", &app_env)
        .map_err(|e| setup_error("Failed to load config", e))?;

    let secret_key = Key::try_from(server_config.secret.as_bytes())
        .map_err(|e| setup_error("Invalid session secret", e))?;

    let pool = establish_connection_pool(&server_config.database_url)
        .map_err(|e| setup_error("Failed to establish database connection pool", e))?;
    let repo = DieselRepository::new(pool);

    let tera = Tera::new(&format!("{}/**/*", server_config.templates_dir))
        .map_err(|e| setup_error("Failed to parse templates", e))?;

    let common_config = web::Data::new(CommonServerConfig {
        auth_service_url: server_config.auth_service_url.clone(),
        secret: server_config.secret.clone(),
    });

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Starting server on {}:{} ({app_env})",
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .service(Files::new("/assets", &server_config.assets_dir))
            .service(index)
            .service(not_assigned)
            .service(show_categories)
            .service(new_category)
            .service(create_category)
            .service(edit_category)
            .service(update_category)
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(tera.clone()))
            .app_data(common_config.clone())
    })
    .bind(bind_address)?
    .run()
    .await
}
