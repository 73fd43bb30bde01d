use billing_administration_system::api::SalesAnalysisKind;
use billing_administration_system::infrastructure::config::load_config;
use billing_administration_system::infrastructure::telemetry::initialize_telemetry;
use billing_administration_system::BillingAdmin;
use domain_billing::exception::BillingException;

#[tokio::main]
async fn main() {
    let config = match load_config(std::env::var("BILLING_CONFIG").ok().as_deref()) {
        Ok(x) => x,
        Err(e) => {
            eprintln!("Failed to build config: {e}");
            return;
        }
    };

    if let Err(e) = initialize_telemetry(&config.telemetry) {
        eprintln!("Failed to initialize logger: {e}");
        return;
    }

    let admin = BillingAdmin::new(&config);
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(&admin, &args).await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

async fn run(admin: &BillingAdmin, args: &[String]) -> anyhow::Result<()> {
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match args.as_slice() {
        ["reset"] => admin.reset_system().await?,
        ["ingest-config", path] => {
            let payload = tokio::fs::read_to_string(path).await?;
            let outcome = admin.ingest_configuration(&payload).await;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        ["ingest-consumption", path] => {
            let payload = tokio::fs::read_to_string(path).await?;
            let outcome = admin.ingest_consumption(&payload).await;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        ["invoice-run", start, end] => {
            let run = admin.generate_invoices(start, end).await?;
            println!("{}", serde_json::to_string_pretty(&run)?);
        }
        ["invoice-report", number] => match admin.invoice_report(number).await? {
            Some(document) => println!("{}", document.path.display()),
            None => {
                return Err(BillingException::UnknownInvoice {
                    number: (*number).to_owned(),
                }
                .into())
            }
        },
        ["sales", kind, start, end] => {
            let kind = match *kind {
                "categories" => SalesAnalysisKind::Category,
                "resources" => SalesAnalysisKind::Resource,
                other => anyhow::bail!("unknown analysis kind {other}"),
            };
            let document = admin.sales_analysis(kind, start, end).await?;
            println!("{}", document.path.display());
        }
        ["list", "resources"] => print_json(&admin.query_resources().await?)?,
        ["list", "categories"] => print_json(&admin.query_categories().await?)?,
        ["list", "clients"] => print_json(&admin.query_clients().await?)?,
        ["list", "consumptions"] => print_json(&admin.query_consumptions().await?)?,
        ["list", "invoices"] => print_json(&admin.query_invoices().await?)?,
        _ => anyhow::bail!(
            "usage: reset | ingest-config <file> | ingest-consumption <file> | \
             invoice-run <start> <end> | invoice-report <number> | \
             sales <categories|resources> <start> <end> | list <collection>"
        ),
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(items: &[T]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(items)?);
    Ok(())
}
