#[derive(Debug, serde::Deserialize)]
pub struct Config {
    pub ring: RingConfig,
    pub http: HttpConfig,
    pub ntp: NtpConfig,

    #[serde(default)]
    pub wakeup: WakeupConfig,
}

#[derive(Debug, serde::Deserialize)]
pub struct RingConfig {
    /// DDP sink driving the physical ring, usually a WLED device.
    pub host: std::net::IpAddr,
    pub port: u16,
    pub udp_port: u16,

    #[serde(default = "default_num_leds")]
    pub num_leds: usize,

    #[serde(default = "default_brightness")]
    pub brightness: f64,

    #[serde(default = "default_red_factor")]
    pub red_factor: f64,

    #[serde(default = "default_green_factor")]
    pub green_factor: f64,

    #[serde(default = "default_blue_factor")]
    pub blue_factor: f64,

    #[serde(with = "humantime_serde", default = "default_interval")]
    pub interval: std::time::Duration,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct HttpConfig {
    pub bind: std::net::SocketAddr,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct NtpConfig {
    pub server: String,

    #[serde(with = "humantime_serde", default = "default_sync_interval")]
    pub sync_interval: std::time::Duration,

    #[serde(with = "humantime_serde", default = "default_retry_start")]
    pub retry_start: std::time::Duration,

    #[serde(with = "humantime_serde", default = "default_retry_max")]
    pub retry_max: std::time::Duration,
}

#[derive(Debug, Clone, Copy, serde::Deserialize)]
#[serde(default)]
pub struct WakeupConfig {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl Default for WakeupConfig {
    fn default() -> Self {
        Self {
            start: TimeOfDay {
                hour: 5,
                minute: 30,
            },
            end: TimeOfDay {
                hour: 6,
                minute: 15,
            },
        }
    }
}

/// A wall clock time in `HH:MM` notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    pub fn seconds_of_day(self) -> u32 {
        u32::from(self.hour) * 3600 + u32::from(self.minute) * 60
    }
}

impl std::str::FromStr for TimeOfDay {
    type Err = InvalidTimeOfDay;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidTimeOfDay(input.to_string());

        let (hour, minute) = input.split_once(':').ok_or_else(invalid)?;
        let hour = hour.parse().map_err(|_| invalid())?;
        let minute = minute.parse().map_err(|_| invalid())?;

        if hour > 23 || minute > 59 {
            return Err(invalid());
        }

        Ok(Self { hour, minute })
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl<'de> serde::Deserialize<'de> for TimeOfDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid time of day '{}', expected HH:MM", .0)]
pub struct InvalidTimeOfDay(String);

impl Config {
    pub async fn load(path: &camino::Utf8Path) -> Result<Self, ConfigError> {
        let config_str =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::ReadingFile {
                    path: path.to_path_buf(),
                    source,
                })?;

        let config: Config = toml::from_str(&config_str).map_err(ConfigError::ParsingConfig)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.ring.num_leds == 0 {
            return Err(ConfigError::EmptyRing);
        }

        if !(0.0..=1.0).contains(&self.ring.brightness) {
            return Err(ConfigError::BrightnessOutOfRange(self.ring.brightness));
        }

        for (channel, factor) in [
            ("red", self.ring.red_factor),
            ("green", self.ring.green_factor),
            ("blue", self.ring.blue_factor),
        ] {
            if !(0.0..=1.0).contains(&factor) {
                return Err(ConfigError::FactorOutOfRange {
                    channel,
                    value: factor,
                });
            }
        }

        if self.wakeup.start == self.wakeup.end {
            return Err(ConfigError::EmptyWakeupWindow(self.wakeup.start));
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file from path '{}'", .path)]
    ReadingFile {
        path: camino::Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    ParsingConfig(#[from] toml::de::Error),

    #[error("The ring must have at least one LED")]
    EmptyRing,

    #[error("Brightness {} is outside 0.0..=1.0", .0)]
    BrightnessOutOfRange(f64),

    #[error("Balance factor {} for the {} channel is outside 0.0..=1.0", .value, .channel)]
    FactorOutOfRange { channel: &'static str, value: f64 },

    #[error("Wakeup start and end are both {}, the window must not be empty", .0)]
    EmptyWakeupWindow(TimeOfDay),
}

fn default_num_leds() -> usize {
    crate::konst::DEFAULT_NUM_LEDS
}

fn default_brightness() -> f64 {
    1.0
}

fn default_red_factor() -> f64 {
    1.0
}

fn default_green_factor() -> f64 {
    0.8
}

fn default_blue_factor() -> f64 {
    0.8
}

fn default_interval() -> std::time::Duration {
    std::time::Duration::from_secs(1)
}

fn default_sync_interval() -> std::time::Duration {
    std::time::Duration::from_secs(2 * 60 * 60)
}

fn default_retry_start() -> std::time::Duration {
    std::time::Duration::from_secs(5)
}

fn default_retry_max() -> std::time::Duration {
    std::time::Duration::from_secs(600)
}

#[cfg(test)]
mod tests {
    use super::Config;
    use super::TimeOfDay;

    const MINIMAL: &str = r#"
        [ring]
        host = "192.168.1.50"
        port = 4048
        udp_port = 4049

        [http]
        bind = "0.0.0.0:8080"

        [ntp]
        server = "pool.ntp.org"
    "#;

    #[test]
    fn minimal_config_fills_in_defaults() {
        let config: Config = toml::from_str(MINIMAL).unwrap();

        assert_eq!(config.ring.num_leds, 24);
        assert_eq!(config.ring.brightness, 1.0);
        assert_eq!(config.ring.red_factor, 1.0);
        assert_eq!(config.ring.green_factor, 0.8);
        assert_eq!(config.ring.blue_factor, 0.8);
        assert_eq!(config.ring.interval, std::time::Duration::from_secs(1));
        assert_eq!(
            config.ntp.sync_interval,
            std::time::Duration::from_secs(2 * 60 * 60)
        );
        assert_eq!(config.wakeup.start.seconds_of_day(), 5 * 3600 + 30 * 60);
        assert_eq!(config.wakeup.end.seconds_of_day(), 6 * 3600 + 15 * 60);
    }

    #[test]
    fn minimal_config_validates() {
        let config: Config = toml::from_str(MINIMAL).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_wakeup_window_is_rejected() {
        let config_str = format!("{MINIMAL}\n[wakeup]\nstart = \"06:00\"\nend = \"06:00\"\n");
        let config: Config = toml::from_str(&config_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(super::ConfigError::EmptyWakeupWindow(_))
        ));
    }

    #[test]
    fn overdriven_brightness_is_rejected() {
        let config_str = MINIMAL.replace("udp_port = 4049", "udp_port = 4049\nbrightness = 1.5");
        let config: Config = toml::from_str(&config_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(super::ConfigError::BrightnessOutOfRange(_))
        ));
    }

    #[test]
    fn time_of_day_parses_and_rejects() {
        let time: TimeOfDay = "05:30".parse().unwrap();
        assert_eq!(time.seconds_of_day(), 19800);
        assert_eq!(time.to_string(), "05:30");

        assert!("5".parse::<TimeOfDay>().is_err());
        assert!("24:00".parse::<TimeOfDay>().is_err());
        assert!("12:60".parse::<TimeOfDay>().is_err());
        assert!("ab:cd".parse::<TimeOfDay>().is_err());
    }
}
