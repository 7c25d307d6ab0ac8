use invoice_desk_core::billing;
use invoice_desk_core::format::{format_currency, DEFAULT_CURRENCY};

use super::{print_json, report, Context};
use crate::cli::BillingCommands;

pub async fn run(ctx: &Context, command: BillingCommands) -> anyhow::Result<()> {
    match command {
        BillingCommands::AddFunds { amount } => {
            let data = billing::add_funds(&ctx.gateway, amount).await?;
            report(&data, &format!("Added {}", format_currency(amount, DEFAULT_CURRENCY)));
            print_json(&data)?;
        }
        BillingCommands::Upgrade => {
            let data = billing::upgrade_premium(&ctx.gateway).await?;
            report(&data, "Upgraded to premium");
        }
    }
    Ok(())
}
