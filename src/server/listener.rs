use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::http::parser::read_request;
use crate::http::request::Request;
use crate::http::response::{StatusCode, default_headers};
use crate::http::writer::{ResponseWriter, WriteError};

/// Application callback invoked with every successfully parsed request.
///
/// The handler drives the writer through its status/headers/body phases (or
/// stages nothing, in which case the connection closes without a response).
pub type Handler =
    Arc<dyn Fn(&mut ResponseWriter, &Request) -> Result<(), WriteError> + Send + Sync>;

/// Handle to a running server.
///
/// Owns the accept-loop task and the shared shutdown flag. Each accepted
/// connection is handled by its own task with no state shared across
/// connections.
pub struct Server {
    closing: Arc<AtomicBool>,
    local_addr: SocketAddr,
    accept_task: JoinHandle<()>,
}

impl Server {
    /// Binds `addr` and starts accepting connections in the background.
    ///
    /// Bind failure is the only fatal error; everything after this point is
    /// confined to individual connections.
    pub async fn serve(addr: &str, handler: Handler) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("cannot listen on {addr}"))?;
        let local_addr = listener.local_addr()?;
        info!("listening on {local_addr}");

        let closing = Arc::new(AtomicBool::new(false));
        let accept_task = tokio::spawn(accept_loop(listener, handler, Arc::clone(&closing)));

        Ok(Self {
            closing,
            local_addr,
            accept_task,
        })
    }

    /// The address the listener is bound to. Useful when binding port 0.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stops accepting connections and releases the listening socket.
    ///
    /// In-flight connections are not cancelled; they run to completion on
    /// their own tasks. Calling this more than once is harmless.
    pub fn close(&self) {
        info!("closing server listener");
        self.closing.store(true, Ordering::SeqCst);
        self.accept_task.abort();
    }
}

async fn accept_loop(listener: TcpListener, handler: Handler, closing: Arc<AtomicBool>) {
    loop {
        let accepted = listener.accept().await;

        if closing.load(Ordering::SeqCst) {
            // Whatever was accepted during shutdown is dropped unserved.
            info!("listener closed, stopping accept loop");
            return;
        }

        match accepted {
            Ok((socket, peer)) => {
                info!("accepted connection from {peer}");
                let handler = Arc::clone(&handler);
                tokio::spawn(handle_connection(socket, handler, peer));
            }
            Err(e) => {
                // Accept errors are transient; the loop keeps going.
                error!("cannot accept connection: {e}");
            }
        }
    }
}

/// One full exchange: parse, hand off to the application, flush, close.
async fn handle_connection(mut stream: TcpStream, handler: Handler, peer: SocketAddr) {
    let request = match read_request(&mut stream).await {
        Ok(request) => request,
        Err(e) => {
            error!("cannot read request from {peer}: {e}");
            send_bad_request(&mut stream, peer, &e.to_string()).await;
            return;
        }
    };

    let mut writer = ResponseWriter::new();
    if let Err(e) = handler(&mut writer, &request) {
        error!("handler error for {peer}: {e}");
    }

    match writer.flush_to(&mut stream).await {
        Ok(()) => info!("sent response to {peer}"),
        Err(e) => error!("cannot write response to {peer}: {e}"),
    }
    // The stream drops here; every connection carries exactly one exchange.
}

/// Best-effort 400 for requests that never reached the handler.
async fn send_bad_request(stream: &mut TcpStream, peer: SocketAddr, message: &str) {
    let body = format!("Bad Request: {message}\n");

    let mut writer = ResponseWriter::new();
    let staged = writer
        .write_status_line(StatusCode::BAD_REQUEST)
        .and_then(|_| writer.write_headers(&default_headers(body.len())))
        .and_then(|_| writer.write_body(body.as_bytes()).map(|_| ()));

    let sent = match staged {
        Ok(()) => writer.flush_to(stream).await,
        Err(e) => Err(e),
    };
    if let Err(e) = sent {
        error!("cannot send 400 response to {peer}: {e}");
    }
}
