//! Sends stdin lines as UDP datagrams. Shares no logic with the HTTP core;
//! handy for poking at raw sockets from a terminal.

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UdpSocket;

const TARGET: &str = "127.0.0.1:42069";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let socket = UdpSocket::bind("127.0.0.1:0").await?;
    socket.connect(TARGET).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    eprint!("> ");
    while let Some(line) = lines.next_line().await? {
        socket.send(line.as_bytes()).await?;
        eprint!("> ");
    }

    Ok(())
}
