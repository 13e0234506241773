//! Debug listener: accepts one connection at a time, parses a single
//! request off the raw socket, and prints its request line.

use tokio::net::TcpListener;

use wirehttp::config::Config;
use wirehttp::http::parser::read_request;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Config::load();
    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    println!("listening on {}", cfg.listen_addr);

    loop {
        let (mut socket, peer) = listener.accept().await?;
        println!("connection from {peer}");

        match read_request(&mut socket).await {
            Ok(request) => {
                println!("Request line:");
                println!(" - Method: {}", request.request_line.method);
                println!(" - Target: {}", request.request_line.request_target);
                println!(" - Version: {}", request.request_line.http_version);
            }
            Err(e) => eprintln!("error reading request from {peer}: {e}"),
        }

        println!("connection closed from {peer}");
    }
}
