use std::sync::Arc;

use wirehttp::config::Config;
use wirehttp::http::response::{StatusCode, default_headers};
use wirehttp::server::{Handler, Server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load();

    let handler: Handler = Arc::new(|writer, req| {
        let body = format!(
            "Hello from wirehttp! You requested {}\n",
            req.request_line.request_target
        );
        writer.write_status_line(StatusCode::OK)?;
        writer.write_headers(&default_headers(body.len()))?;
        writer.write_body(body.as_bytes())?;
        Ok(())
    });

    let server = Server::serve(&cfg.listen_addr, handler).await?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");
    server.close();

    Ok(())
}
