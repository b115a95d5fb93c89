use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use activity_state::{RIDING_THRESHOLD_KMPHR, Thresholds, WALKING_THRESHOLD_KMPHR};
use sliding_window::DEFAULT_CAPACITY;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, clap::Parser)]
#[command(name = "gateway", about = "Wearable IMU/GPS telemetry ingestion server")]
pub struct Config {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
    /// Interface to bind
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,
    /// Number of points kept per live chart series
    #[arg(long, env = "WINDOW_CAPACITY", default_value_t = DEFAULT_CAPACITY)]
    pub window_capacity: usize,
    /// Speed in km/h from which movement counts as walking
    #[arg(long, env = "WALKING_KMH", default_value_t = WALKING_THRESHOLD_KMPHR)]
    pub walking_kmphr: f64,
    /// Speed in km/h from which movement counts as riding
    #[arg(long, env = "RIDING_KMH", default_value_t = RIDING_THRESHOLD_KMPHR)]
    pub riding_kmphr: f64,
}

impl Config {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds::new()
            .set_walking_kmphr(self.walking_kmphr)
            .set_riding_kmphr(self.riding_kmphr)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            window_capacity: DEFAULT_CAPACITY,
            walking_kmphr: WALKING_THRESHOLD_KMPHR,
            riding_kmphr: RIDING_THRESHOLD_KMPHR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::Parser;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.socket_addr(), "0.0.0.0:3000".parse::<SocketAddr>().expect("valid addr"));
        assert_eq!(config.window_capacity, 60);
        assert_eq!(config.thresholds(), Thresholds::default());
    }

    #[test]
    fn test_flags() {
        let config = Config::try_parse_from([
            "gateway",
            "--port",
            "8080",
            "--host",
            "127.0.0.1",
            "--window-capacity",
            "10",
            "--walking-kmphr",
            "2",
            "--riding-kmphr",
            "15.5",
        ])
        .expect("valid flags");

        assert_eq!(config.socket_addr(), "127.0.0.1:8080".parse::<SocketAddr>().expect("valid addr"));
        assert_eq!(config.window_capacity, 10);
        assert_eq!(
            config.thresholds(),
            Thresholds::new().set_walking_kmphr(2.0).set_riding_kmphr(15.5)
        );
    }

    #[test]
    fn test_invalid_port() {
        assert!(Config::try_parse_from(["gateway", "--port", "70000"]).is_err());
    }
}
