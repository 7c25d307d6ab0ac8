use invoice_desk_core::payments::{self, PaymentConfirmation};

use super::{print_json, report, Context};
use crate::cli::PaymentCommands;

pub async fn run(ctx: &Context, command: PaymentCommands) -> anyhow::Result<()> {
    match command {
        PaymentCommands::CreateOrder { amount, payment_type } => {
            let data = payments::create_payment_order(&ctx.gateway, amount, &payment_type).await?;
            print_json(&data)?;
        }
        PaymentCommands::Verify {
            order_id,
            payment_id,
            signature,
            payment_type,
            amount,
        } => {
            let confirmation = PaymentConfirmation {
                razorpay_order_id: order_id,
                razorpay_payment_id: payment_id,
                razorpay_signature: signature,
                payment_type,
                amount,
            };
            let data = payments::verify_payment(&ctx.gateway, &confirmation).await?;
            report(&data, "Payment verified");
        }
    }
    Ok(())
}
