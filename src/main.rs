use std::{io, net::SocketAddr};

use apphost::{build_app, config::Config, logging};
use tokio::net::{TcpListener, TcpSocket};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let config = Config::from_env();
    let app = build_app(&config);
    let listener = bind_listener(config.socket_addr())?;

    info!(
        port = config.port,
        mode = config.mode.as_str(),
        "server listening"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

/// Binds the listener with address and port reuse enabled, so a restarting
/// process can take over the port without waiting out TIME_WAIT.
fn bind_listener(addr: SocketAddr) -> io::Result<TcpListener> {
    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()?
    } else {
        TcpSocket::new_v6()?
    };
    socket.set_reuseaddr(true)?;
    #[cfg(unix)]
    socket.set_reuseport(true)?;
    socket.bind(addr)?;
    socket.listen(1024)
}
