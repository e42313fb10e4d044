//! Payment Gateway Config

use std::time::Duration;

use clap::Args;
use zeroize::Zeroizing;

use virtuele_app::domain::payments::gateway::MidtransConfig;

/// Midtrans settings.
#[derive(Debug, Args)]
pub struct GatewayConfig {
    /// Midtrans server key
    #[arg(long, env = "MIDTRANS_SERVER_KEY", hide_env_values = true)]
    pub midtrans_server_key: String,

    /// Use the Midtrans production environment instead of the sandbox.
    #[arg(long, env = "MIDTRANS_PRODUCTION", default_value_t = false)]
    pub midtrans_production: bool,

    /// Override for the notification URL registered in the Midtrans dashboard.
    #[arg(long, env = "MIDTRANS_NOTIFICATION_URL")]
    pub midtrans_notification_url: Option<String>,

    /// Gateway request timeout in seconds.
    #[arg(long, env = "MIDTRANS_TIMEOUT_SECONDS", default_value_t = 30_u64)]
    pub midtrans_timeout_seconds: u64,
}

impl GatewayConfig {
    /// Client configuration for the Midtrans gateway.
    #[must_use]
    pub fn midtrans_config(&self) -> MidtransConfig {
        MidtransConfig {
            server_key: Zeroizing::new(self.midtrans_server_key.clone()),
            production: self.midtrans_production,
            notification_url: self.midtrans_notification_url.clone(),
            timeout: Duration::from_secs(self.midtrans_timeout_seconds),
        }
    }
}
