use invoice_desk_core::auth;
use invoice_desk_core::config::expand_path;

use super::Context;

pub fn run(ctx: &Context) -> anyhow::Result<()> {
    let config = &ctx.config;

    println!("Invoice Desk Status");
    println!("===================");
    println!();
    println!("Configuration:");
    println!("  Config source: {}", ctx.config_source);
    if let Some(reason) = &ctx.skipped_local {
        println!("  Skipped ./config.toml: {}", reason);
    }
    println!("  API base URL: {}", ctx.gateway.base_url());
    match config.api.timeout_secs {
        Some(secs) => println!("  Request timeout: {}s", secs),
        None => println!("  Request timeout: none"),
    }
    println!("  Session dir: {:?}", expand_path(&config.session.directory));
    println!();

    println!("Session:");
    if auth::is_authenticated(&ctx.gateway) {
        let email = auth::current_user(&ctx.gateway)?
            .and_then(|u| u.get("email").and_then(|v| v.as_str()).map(str::to_string))
            .unwrap_or_else(|| "-".to_string());
        println!("  Logged in: yes ({})", email);
    } else {
        println!("  Logged in: no");
    }

    Ok(())
}
