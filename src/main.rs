use std::sync::Arc;

mod config;
mod handler;
mod http;
mod logger;
mod routing;
mod server;
mod store;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;

    // One request at a time; a single-threaded runtime is all this server needs
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;

    let store = store::Store::open(&cfg.database.path);
    store.bootstrap().await?;

    let listener = server::create_reusable_listener(addr)?;

    logger::log_server_start(&addr, &cfg);
    handler::resources::log_registry();

    let state = Arc::new(config::AppState::new(cfg, store));
    server::run(listener, state).await
}
