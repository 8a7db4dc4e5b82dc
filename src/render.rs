use rgb::RGB8;
use smart_leds_trait::SmartLedsWrite;
use tokio_util::sync::CancellationToken;

use crate::color::Correction;
use crate::frame::Frame;
use crate::programs::ActiveProgram;

/// Owns the frame buffer and the active program and drives the
/// tick-render-flush cycle at a fixed interval.
///
/// This task is the only writer of the ring: the control page only ever
/// touches the shared [`StateHandle`](crate::state::StateHandle), and the
/// task picks pending changes up at its next wakeup. A pending change swaps
/// the program and renders immediately, so the ring never lags a full
/// interval behind a button press.
pub struct RenderTask<W>
where
    W: SmartLedsWrite,
    <W as SmartLedsWrite>::Color: From<RGB8>,
{
    interval: std::time::Duration,
    cancellation_token: CancellationToken,
    state: crate::state::StateHandle,
    clock: crate::clock::WallClock,
    writer: W,
    correction: Correction,
    frame: Frame,
    wakeup: crate::config::WakeupConfig,
}

impl<W> RenderTask<W>
where
    W: SmartLedsWrite,
    <W as SmartLedsWrite>::Color: From<RGB8>,
    <W as SmartLedsWrite>::Error: std::fmt::Debug,
{
    pub fn new(
        cancellation_token: CancellationToken,
        state: crate::state::StateHandle,
        clock: crate::clock::WallClock,
        writer: W,
        config: &crate::config::Config,
    ) -> Self {
        Self {
            interval: config.ring.interval,
            cancellation_token,
            state,
            clock,
            writer,
            correction: Correction::new(
                config.ring.brightness,
                config.ring.red_factor,
                config.ring.green_factor,
                config.ring.blue_factor,
            ),
            frame: Frame::new(config.ring.num_leds),
            wakeup: config.wakeup,
        }
    }

    pub async fn run(mut self) {
        let mut render_interval = tokio::time::interval(self.interval);
        let mut active = ActiveProgram::Null;

        // The ring keeps showing whatever the previous process left on it,
        // so start from a known dark state.
        self.frame.clear();
        self.flush();

        loop {
            let Some(_tick) = self
                .cancellation_token
                .run_until_cancelled(render_interval.tick())
                .await
            else {
                tracing::info!("Ending render loop");
                break;
            };

            let now = self.clock.now_utc();

            if let Some(state) = self.state.consume_change() {
                active = ActiveProgram::from_state(state, &self.wakeup);
                tracing::debug!(
                    light_on = state.light_on,
                    program = active.name(),
                    "State changed, switching program"
                );

                self.frame.clear();
                // Flush even when the new program wrote nothing, switching
                // to off has to reach the ring too.
                let _ = active.tick(now, &mut self.frame, &self.correction);
                self.flush();
            } else if active.tick(now, &mut self.frame, &self.correction) {
                self.flush();
            }
        }
    }

    /// Hands the frame to the driver. A failed flush only costs this frame,
    /// the next tick renders and flushes again.
    fn flush(&mut self) {
        if let Err(error) = self.writer.write(self.frame.iter_hardware()) {
            tracing::error!(?error, "Failed to flush frame to the LED driver");
        }
    }
}
