#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Setting up error reporting failed")]
    InstallingColorEyre(#[source] color_eyre::Report),

    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    #[error("DDP error")]
    Ddp(#[from] ddp_rs::error::DDPError),

    #[error("Failed to bind UDP socket")]
    UDPBind(#[source] std::io::Error),

    #[error("Failed to bind HTTP listener on '{}'", .addr)]
    HttpBind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP server failed")]
    HttpServe(#[source] std::io::Error),
}
