use invoice_desk_core::format::{format_currency, format_date, DEFAULT_CURRENCY};
use invoice_desk_core::invoices;
use invoice_desk_core::notice::Notice;
use serde_json::Value;

use super::{print_json, render_notice, report, Context};
use crate::cli::InvoiceCommands;

pub async fn run(ctx: &Context, command: InvoiceCommands) -> anyhow::Result<()> {
    let gw = &ctx.gateway;
    match command {
        InvoiceCommands::List => {
            let data = invoices::list_invoices(gw).await?;
            print_table(&data);
        }
        InvoiceCommands::Get { id } => {
            print_json(&invoices::get_invoice(gw, &id).await?)?;
        }
        InvoiceCommands::Create { path } => {
            if !path.exists() {
                anyhow::bail!("File not found: {:?}", path);
            }
            // Sent as-is; the server validates the document
            let raw = std::fs::read_to_string(&path)?;
            let data = invoices::create_invoice(gw, raw).await?;
            report(&data, "Invoice created");
            print_json(&data)?;
        }
        InvoiceCommands::Delete { id } => {
            let data = invoices::delete_invoice(gw, &id).await?;
            report(&data, "Invoice deleted");
        }
        InvoiceCommands::Status { id, status } => {
            let data = invoices::update_invoice_status(gw, &id, &status).await?;
            report(&data, &format!("Invoice {} marked {}", id, status));
        }
        InvoiceCommands::Send { id, email } => {
            let data = invoices::send_invoice(gw, &id, email.as_deref()).await?;
            report(&data, "Invoice sent");
        }
        InvoiceCommands::Stats => {
            print_json(&invoices::invoice_statistics(gw).await?)?;
        }
        InvoiceCommands::Pdf { id, out } => {
            let doc = invoices::download_invoice_pdf(gw, &id).await?;
            let path = doc.save_to(&out)?;
            render_notice(&Notice::success(format!("Saved {:?}", path)));
        }
    }
    Ok(())
}

fn field<'a>(invoice: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| invoice.get(*k).filter(|v| !v.is_null()))
}

fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "-".to_string(),
    }
}

fn amount(invoice: &Value) -> String {
    let currency = field(invoice, &["currency"])
        .and_then(|v| v.as_str())
        .unwrap_or(DEFAULT_CURRENCY);
    let value = field(invoice, &["total_amount", "total", "amount"]).and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    });
    value
        .map(|v| format_currency(v, currency))
        .unwrap_or_else(|| "-".to_string())
}

fn date(invoice: &Value) -> String {
    field(invoice, &["due_date", "created_at"])
        .and_then(|v| v.as_str())
        .and_then(|s| format_date(s).ok())
        .unwrap_or_else(|| "-".to_string())
}

fn print_table(data: &Value) {
    let rows = match data.as_array().or_else(|| data.get("invoices").and_then(|v| v.as_array())) {
        Some(rows) => rows,
        None => {
            // Unknown shape; show it untouched
            println!("{}", data);
            return;
        }
    };

    if rows.is_empty() {
        println!("No invoices found.");
        return;
    }

    println!("{:<10} {:<30} {:>14} {:<10} {:<20}", "ID", "CLIENT", "AMOUNT", "STATUS", "DUE");
    println!("{}", "-".repeat(88));

    for invoice in rows {
        println!(
            "{:<10} {:<30} {:>14} {:<10} {:<20}",
            text(field(invoice, &["invoice_number", "id"])),
            text(field(invoice, &["client_name", "client_email"])),
            amount(invoice),
            text(field(invoice, &["status"])),
            date(invoice),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn amount_reads_numbers_and_strings() {
        assert_eq!(amount(&json!({"total_amount": 12.5, "currency": "EUR"})), "€12.50");
        assert_eq!(amount(&json!({"amount": "99.9"})), "$99.90");
        assert_eq!(amount(&json!({"id": 1})), "-");
    }

    #[test]
    fn date_prefers_due_date() {
        let invoice = json!({"due_date": "2024-03-01", "created_at": "2024-02-01T09:00:00"});
        assert_eq!(date(&invoice), "March 1, 2024");
        assert_eq!(date(&json!({"due_date": null, "created_at": "2024-02-01T09:00:00"})), "February 1, 2024");
    }
}
