use crate::infrastructure::emailjs::EmailJsConfig;
use crate::infrastructure::paystack::DEFAULT_BASE_URL;
use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Process configuration. Every option can also come from the environment.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Delayed fund-splitting webhook service", long_about = None)]
pub struct Config {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Address to bind
    #[arg(long, env = "BIND_ADDR", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub bind_addr: IpAddr,

    /// Shared webhook secret, also used as the payment rail bearer credential
    #[arg(long, env = "PAYSTACK_SECRET", hide_env_values = true)]
    pub paystack_secret: Option<String>,

    /// Payment rail base URL
    #[arg(long, env = "PAYSTACK_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub paystack_base_url: String,

    /// Seconds between accepting a payment and disbursing it
    #[arg(long, env = "SPLIT_DELAY_SECS", default_value_t = 240)]
    pub split_delay_secs: u64,

    /// JSON file of payer records used to seed the in-memory store
    #[arg(long, env = "SPLITS_FILE")]
    pub splits_file: Option<PathBuf>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, env = "DB_PATH")]
    pub db_path: Option<PathBuf>,

    #[arg(long, env = "EMAILJS_SERVICE_ID")]
    pub emailjs_service_id: Option<String>,

    #[arg(long, env = "EMAILJS_TEMPLATE_ID")]
    pub emailjs_template_id: Option<String>,

    #[arg(long, env = "EMAILJS_PUBLIC_KEY")]
    pub emailjs_public_key: Option<String>,

    #[arg(long, env = "EMAILJS_PRIVATE_KEY", hide_env_values = true)]
    pub emailjs_private_key: Option<String>,

    /// Bearer token for listing and cancelling pending runs
    #[arg(long, env = "ADMIN_TOKEN", hide_env_values = true)]
    pub admin_token: Option<String>,

    /// Currency for recipients and messages
    #[arg(long, env = "CURRENCY", default_value = "NGN")]
    pub currency: String,

    /// Display name given to registered payout recipients
    #[arg(long, env = "RECIPIENT_DISPLAY_NAME", default_value = "Split Beneficiary")]
    pub recipient_display_name: String,
}

impl Config {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    /// The shared secret, with an empty value treated as unset.
    pub fn secret(&self) -> Option<String> {
        self.paystack_secret.clone().filter(|s| !s.is_empty())
    }

    pub fn split_delay(&self) -> Duration {
        Duration::from_secs(self.split_delay_secs)
    }

    /// Email is enabled only when all four EmailJS settings are present.
    pub fn emailjs(&self) -> Option<EmailJsConfig> {
        Some(EmailJsConfig {
            service_id: self.emailjs_service_id.clone()?,
            template_id: self.emailjs_template_id.clone()?,
            public_key: self.emailjs_public_key.clone()?,
            private_key: self.emailjs_private_key.clone()?,
        })
    }
}
