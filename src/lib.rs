pub mod api;
pub mod cache;
pub mod carousel;
pub mod config;
pub mod models;
pub mod preloader;
pub mod routes;
pub mod session;
pub mod state;
pub mod status;
pub mod templates;

use actix_files::Files;
use actix_web::{middleware, web, App, HttpServer};

use crate::config::AppConfig;
use crate::state::AppState;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    let config = AppConfig::from_env();
    let state = AppState::new(config.clone())?;

    tokio::spawn(state.carousel.clone().run());

    let address = format!("0.0.0.0:{}", config.port);
    log::info!(
        "Starting Metasoft site on http://{address}, content API at {}",
        config.api_base_url
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(middleware::Logger::default())
            .service(Files::new("/static", "./static").prefer_utf8(true))
            .configure(routes::public::configure)
            .configure(routes::admin::configure)
            .configure(routes::events::configure)
    })
    .bind(address)?
    .run()
    .await?;

    Ok(())
}
