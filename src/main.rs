use minimax_bot::uci::UciHandler;
use minimax_bot::{Engine, EngineConfig};
use std::io;

fn main() {
    // Logs go to stderr; stdout belongs to the UCI protocol
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    log::info!("starting {}", minimax_bot::uci::ENGINE_NAME);

    let mut handler = UciHandler::stdout(Engine::new(EngineConfig::default()));
    if let Err(e) = handler.run(io::stdin().lock()) {
        log::error!("uci loop failed: {}", e);
        std::process::exit(1);
    }
}
