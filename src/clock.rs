use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::time::Instant;

/// Shared wall clock, fed by the SNTP task.
///
/// The board has no RTC, so the current time is always "last SNTP result
/// plus the monotonic time elapsed since". Until the first successful sync
/// the clock reports the Unix epoch; time-driven programs then render as if
/// it were midnight instead of failing.
#[derive(Clone, Default)]
pub struct WallClock {
    inner: Arc<Mutex<Option<Synced>>>,
}

#[derive(Clone, Copy)]
struct Synced {
    ntp: sntpc::NtpResult,
    synced_at: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_system_time(&self, ntp: sntpc::NtpResult) {
        let mut inner = self.lock();
        *inner = Some(Synced {
            ntp,
            synced_at: Instant::now(),
        });
    }

    pub fn is_synced(&self) -> bool {
        self.lock().is_some()
    }

    pub fn now_utc(&self) -> time::OffsetDateTime {
        let Some(synced) = *self.lock() else {
            return time::OffsetDateTime::UNIX_EPOCH;
        };

        time::OffsetDateTime::UNIX_EPOCH
            + time::Duration::seconds(i64::from(synced.ntp.sec()))
            + synced.synced_at.elapsed()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Synced>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::WallClock;

    #[test]
    fn unsynced_clock_reports_midnight() {
        let clock = WallClock::new();
        assert!(!clock.is_synced());

        let now = clock.now_utc();
        assert_eq!(now, time::OffsetDateTime::UNIX_EPOCH);
        assert_eq!((now.hour(), now.minute(), now.second()), (0, 0, 0));
    }

    #[test]
    fn synced_clock_extrapolates_from_the_ntp_result() {
        let clock = WallClock::new();
        clock.set_system_time(sntpc::NtpResult::new(3600, 0, 0, 0, 1, 0));

        assert!(clock.is_synced());
        let now = clock.now_utc();
        assert_eq!(now.hour(), 1);
        assert_eq!(now.minute(), 0);
    }
}
