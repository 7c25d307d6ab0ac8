use invoice_desk_core::user;

use super::{print_json, report, Context};
use crate::cli::UserCommands;

pub async fn run(ctx: &Context, command: UserCommands) -> anyhow::Result<()> {
    match command {
        UserCommands::Show => {
            print_json(&user::get_user(&ctx.gateway).await?)?;
        }
        UserCommands::Settings { json } => {
            let data = user::update_user_settings(&ctx.gateway, json).await?;
            report(&data, "Settings updated");
        }
    }
    Ok(())
}
