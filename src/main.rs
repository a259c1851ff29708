use std::io;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use mongodb::Client;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use expense_splitter::{config::Config, routes, store::GroupStore};

fn cors(allowed_origin: Option<&str>) -> Cors {
    match allowed_origin {
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allow_any_method()
            .allow_any_header(),
        None => Cors::permissive(),
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env().map_err(|err| {
        error!("invalid configuration: {}", err);
        io::Error::new(io::ErrorKind::InvalidInput, err)
    })?;
    info!(database = %config.database, "using MongoDB");

    let client = Client::with_uri_str(&config.mongodb_uri)
        .await
        .map_err(|err| {
            error!("failed to connect: {}", err);
            io::Error::new(io::ErrorKind::ConnectionRefused, err)
        })?;
    let store = GroupStore::new(&client, &config.database);
    info!("Connected");

    let allowed_origin = config.allowed_origin.clone();
    info!(address = %config.bind_address, port = config.port, "starting server");
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors(allowed_origin.as_deref()))
            .app_data(web::Data::new(store.clone()))
            .configure(routes::configure)
    })
    .bind((config.bind_address.as_str(), config.port))?
    .run()
    .await
}
