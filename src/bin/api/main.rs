use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use pressroom::auth_api::AuthClient;
use pressroom::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env()?;
    pressroom::db::init_db(&config.database_url).await?;
    let auth = AuthClient::new(&config)?;

    log::info!("Starting HTTP server on {}", config.bind_addr);

    let bind_addr = config.bind_addr.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(auth.clone()))
            .wrap(Logger::new("%a %{User-Agent}i"))
            .configure(pressroom::web::configure)
            .default_service(web::route().to(pressroom::web::index::not_found))
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    Ok(())
}
