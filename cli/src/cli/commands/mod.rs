pub mod auth;
pub mod billing;
pub mod convert;
pub mod invoices;
pub mod payments;
pub mod status;
pub mod user;

use invoice_desk_core::config::{expand_path, Config, ConfigSource, LoadedConfig};
use invoice_desk_core::notice::{Level, Notice};
use invoice_desk_core::{Gateway, Session};
use serde_json::Value;

/// Application shell state: the loaded config and the gateway that owns the session
pub struct Context {
    pub config: Config,
    pub config_source: ConfigSource,
    pub skipped_local: Option<String>,
    pub gateway: Gateway,
}

impl Context {
    pub fn new(loaded: LoadedConfig) -> anyhow::Result<Self> {
        let LoadedConfig {
            config,
            source: config_source,
            skipped_local,
        } = loaded;

        let session_dir = expand_path(&config.session.directory);
        tracing::debug!("Session directory: {:?}", session_dir);

        let session = Session::on_disk(session_dir);
        let gateway = Gateway::new(config.api.base_url.clone(), session, config.api.timeout())?;

        Ok(Self {
            config,
            config_source,
            skipped_local,
            gateway,
        })
    }
}

pub fn render_notice(notice: &Notice) {
    let color = match notice.level {
        Level::Info => "36",
        Level::Success => "32",
        Level::Warning => "33",
        Level::Error => "31",
    };
    eprintln!("\x1b[{}m{}\x1b[0m", color, notice);
}

pub fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Render a server message field as a success notice, falling back to `default`
pub fn report(data: &Value, default: &str) {
    let message = data
        .get("message")
        .and_then(|v| v.as_str())
        .unwrap_or(default);
    render_notice(&Notice::success(message));
}
