use invoice_desk_core::auth;
use invoice_desk_core::notice::Notice;

use super::{print_json, render_notice, Context};

pub async fn login(ctx: &Context, email: &str, password: &str) -> anyhow::Result<()> {
    auth::login(&ctx.gateway, email, password).await?;
    render_notice(&Notice::success(format!("Logged in as {}", email)));
    Ok(())
}

pub async fn register(ctx: &Context, company_name: &str, email: &str, password: &str) -> anyhow::Result<()> {
    auth::register(&ctx.gateway, company_name, email, password).await?;
    render_notice(&Notice::success(format!("Registered {} ({})", company_name, email)));
    Ok(())
}

pub fn logout(ctx: &Context) -> anyhow::Result<()> {
    auth::logout(&ctx.gateway)?;
    render_notice(&Notice::info("Logged out. Run `invoice-desk login` to sign in again."));
    Ok(())
}

pub fn whoami(ctx: &Context) -> anyhow::Result<()> {
    match auth::current_user(&ctx.gateway)? {
        Some(user) if auth::is_authenticated(&ctx.gateway) => print_json(&user)?,
        _ => render_notice(&Notice::info("Not logged in.")),
    }
    Ok(())
}
