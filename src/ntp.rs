use std::net::SocketAddr;

use sntpc::NtpContext;
use sntpc::NtpTimestampGenerator;
use tokio_util::sync::CancellationToken;

/// SNTP needs a local transmit timestamp to compute the offset; we only use
/// the server time, so zero is good enough.
#[derive(Debug, Clone, Copy, Default)]
struct Timestamp;

impl NtpTimestampGenerator for Timestamp {
    fn init(&mut self) {}

    fn timestamp_sec(&self) -> u64 {
        0
    }

    fn timestamp_subsec_micros(&self) -> u32 {
        0
    }
}

struct Socket(tokio::net::UdpSocket);

impl sntpc::NtpUdpSocket for Socket {
    async fn send_to(&self, buf: &[u8], addr: SocketAddr) -> Result<usize, sntpc::Error> {
        self.0
            .send_to(buf, addr)
            .await
            .map_err(|_| sntpc::Error::Network)
    }

    async fn recv_from(&self, buf: &mut [u8]) -> Result<(usize, SocketAddr), sntpc::Error> {
        self.0
            .recv_from(buf)
            .await
            .map_err(|_| sntpc::Error::Network)
    }
}

/// Periodically refreshes the shared [`WallClock`](crate::clock::WallClock)
/// from an SNTP server.
///
/// Failures are expected, the daemon usually comes up before the network
/// does. Every failed attempt backs off by half of the current wait, capped
/// by the configured maximum.
pub struct NtpTask {
    config: crate::config::NtpConfig,
    clock: crate::clock::WallClock,
    cancellation_token: CancellationToken,
}

impl NtpTask {
    pub fn new(
        config: crate::config::NtpConfig,
        clock: crate::clock::WallClock,
        cancellation_token: CancellationToken,
    ) -> Self {
        Self {
            config,
            clock,
            cancellation_token,
        }
    }

    pub async fn run(self) -> Result<(), NtpError> {
        let socket = tokio::net::UdpSocket::bind(("0.0.0.0", 0))
            .await
            .map_err(NtpError::Bind)?;
        let socket = Socket(socket);
        let context = NtpContext::new(Timestamp);

        let mut backoff = self.config.retry_start;

        loop {
            let sleep_for = match self.sync_once(&socket, context).await {
                Ok(result) => {
                    tracing::info!(seconds = result.sec(), "Synchronised system time");
                    self.clock.set_system_time(result);
                    backoff = self.config.retry_start;
                    self.config.sync_interval
                }
                Err(error) => {
                    tracing::warn!(%error, wait = ?backoff, "Could not get time, waiting before checking again");
                    let wait = backoff;
                    backoff = next_backoff(backoff, self.config.retry_max);
                    wait
                }
            };

            let Some(()) = self
                .cancellation_token
                .run_until_cancelled(tokio::time::sleep(sleep_for))
                .await
            else {
                tracing::info!("Ending time synchronisation");
                return Ok(());
            };
        }
    }

    async fn sync_once(
        &self,
        socket: &Socket,
        context: NtpContext<Timestamp>,
    ) -> Result<sntpc::NtpResult, NtpError> {
        let server = self.config.server.as_str();
        let addr = tokio::net::lookup_host((server, 123))
            .await
            .map_err(|source| NtpError::Lookup {
                server: server.to_string(),
                source,
            })?
            .next()
            .ok_or_else(|| NtpError::ResolveDns {
                server: server.to_string(),
            })?;

        sntpc::get_time(addr, socket, context)
            .await
            .map_err(NtpError::GetTimeFailed)
    }
}

fn next_backoff(current: std::time::Duration, max: std::time::Duration) -> std::time::Duration {
    std::cmp::min(current * 3 / 2, max)
}

#[derive(Debug, thiserror::Error)]
pub enum NtpError {
    #[error("Failed to bind UDP socket for SNTP")]
    Bind(#[source] std::io::Error),

    #[error("Failed to look up NTP server '{}'", .server)]
    Lookup {
        server: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to resolve DNS for NTP server '{}'", .server)]
    ResolveDns { server: String },

    #[error("Failed to get time: {:?}", .0)]
    GetTimeFailed(sntpc::Error),
}
