mod cli;
mod clock;
mod color;
mod config;
mod error;
mod frame;
mod http;
mod konst;
mod logging;
mod ntp;
mod programs;
mod render;
mod state;
mod systemd;
mod writer;

#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::eyre::Result<()> {
    setup_panic();
    color_eyre::install().map_err(crate::error::Error::InstallingColorEyre)?;
    let cli = <crate::cli::Cli as clap::Parser>::parse();
    crate::logging::setup(cli.verbosity);
    let cfg = crate::config::Config::load(&cli.config).await?;

    match cli.command {
        cli::Command::Run => {
            run(cli, cfg).await?;
        }
        cli::Command::VerifyConfig => {
            tracing::info!("Configuration verified");
        }
    }

    Ok(())
}

fn setup_panic() {
    human_panic::setup_panic!(human_panic::Metadata::new(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    ));
}

async fn run(
    _cli: crate::cli::Cli,
    config: crate::config::Config,
) -> Result<(), crate::error::Error> {
    let process_state = systemd::ProcessState::new();
    process_state.set_starting();

    let ddp_connection = ddp_rs::connection::DDPConnection::try_new(
        format!("{}:{}", config.ring.host, config.ring.port),
        ddp_rs::protocol::PixelConfig::default(), // Default is RGB, 8 bits per channel
        ddp_rs::protocol::ID::Default,
        std::net::UdpSocket::bind(format!("0.0.0.0:{}", config.ring.udp_port))
            .map_err(crate::error::Error::UDPBind)?,
    )?;
    let writer = writer::Writer::new(ddp_connection);

    let state = crate::state::StateHandle::new();
    let wall_clock = crate::clock::WallClock::new();
    let cancellation_token = tokio_util::sync::CancellationToken::new();

    tokio::task::spawn({
        let http_config = config.http.clone();
        let cancellation_token = cancellation_token.clone();
        let state = state.clone();
        let wall_clock = wall_clock.clone();
        async move {
            if let Err(error) = http::run(http_config, cancellation_token, state, wall_clock).await
            {
                tracing::error!(?error, "Control page server failed");
            }
        }
    });

    tokio::task::spawn({
        let ntp_task = ntp::NtpTask::new(
            config.ntp.clone(),
            wall_clock.clone(),
            cancellation_token.clone(),
        );
        async move {
            if let Err(error) = ntp_task.run().await {
                tracing::error!(?error, "Time synchronisation failed");
            }
        }
    });

    let render_task = render::RenderTask::new(
        cancellation_token.clone(),
        state,
        wall_clock,
        writer,
        &config,
    );

    process_state.set_running();

    tokio::select! {
        _ = render_task.run() => {
            tracing::error!("Render loop ended unexpectedly");
            process_state.set_failed();
        }

        _ctrl_c = tokio::signal::ctrl_c() => {
            tracing::info!("Ctrl-C received, shutting down");
            cancellation_token.cancel();
        }
    }

    process_state.set_finished();
    Ok(())
}
