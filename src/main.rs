use clap::Parser;
use fixture_rpc_server::{Cli, Server, ServerConfig, logging};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from(Cli::parse());
    logging::init(config.log_level);

    let server = Server::new(config);
    server.run_stdio().await?;

    Ok(())
}
