use invoice_desk_core::currency::convert_currency;
use invoice_desk_core::format::format_currency;

use super::{print_json, Context};

pub async fn run(ctx: &Context, amount: f64, from: &str, to: &str) -> anyhow::Result<()> {
    let from = from.to_uppercase();
    let to = to.to_uppercase();
    let data = convert_currency(&ctx.gateway, amount, &from, &to).await?;

    match data.get("converted_amount").and_then(|v| v.as_f64()) {
        Some(converted) => println!(
            "{} = {}",
            format_currency(amount, &from),
            format_currency(converted, &to)
        ),
        None => print_json(&data)?,
    }
    Ok(())
}
