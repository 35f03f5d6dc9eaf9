use clap::Parser;
use jjxcapital::application::form::FormDraft;
use jjxcapital::application::upgrade::UpgradeOutcome;
use jjxcapital::cli::commands::{Cli, Commands};
use jjxcapital::domain::ports::operation_repository::OperationFilter;
use jjxcapital::domain::values::payment_method::PaymentMethod;
use jjxcapital::domain::values::session_state::SessionState;
use jjxcapital::JjxCapital;

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let db_path = std::env::var("JJX_DB").unwrap_or_else(|_| "./jjxcapital.db".into());

    let app = match JjxCapital::new(&db_path) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error initializing JJXCAPITAL: {e}");
            std::process::exit(1);
        }
    };

    // Resolve Unknown -> Anonymous/Authenticated before any command runs,
    // so no command ever acts on an unresolved session.
    app.restore_session().await;

    if let Err(e) = run_command(app, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(app: JjxCapital, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Register {
            email,
            password,
            name,
        } => {
            let session = app.register(&email, &password, name).await?;
            println!("{}", serde_json::to_string_pretty(&session)?);
        }
        Commands::Login { email, password } => {
            let session = app.login(&email, &password).await?;
            println!("{}", serde_json::to_string_pretty(&session)?);
        }
        Commands::Logout => {
            app.logout().await;
            println!("Signed out");
        }
        Commands::Whoami => match app.session() {
            SessionState::Authenticated(session) => {
                println!("{}", serde_json::to_string_pretty(&session)?);
            }
            _ => println!("Not signed in"),
        },
        Commands::Save {
            base,
            quote,
            price_buy,
            price_sell,
            exchange,
            note,
            date,
        } => {
            let trade_date = date
                .map(|d| {
                    chrono::NaiveDate::parse_from_str(&d, "%Y-%m-%d")
                        .map_err(|_| format!("Invalid date: {d}. Use YYYY-MM-DD"))
                })
                .transpose()?;
            let draft = FormDraft {
                base,
                quote,
                price_buy,
                price_sell,
                exchange,
                note,
                trade_date,
            }
            .parse()?;
            let op = app.save_operation(&draft).await?;
            println!("{}", serde_json::to_string_pretty(&op)?);
        }
        Commands::Ops { limit, since } => {
            let filter = OperationFilter {
                limit: Some(limit),
                since: parse_date(&since)?,
            };
            let ops = app.list_operations(&filter).await?;
            println!("{}", serde_json::to_string_pretty(&ops)?);
        }
        Commands::Watch => {
            let mut rx = app.watch_operations().await?;
            println!("{}", serde_json::to_string_pretty(&*rx.borrow_and_update())?);
            while rx.changed().await.is_ok() {
                println!("{}", serde_json::to_string_pretty(&*rx.borrow_and_update())?);
            }
        }
        Commands::Summary => {
            let summary = app.summary().await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Upgrade { method } => {
            let method: PaymentMethod = method.parse().map_err(|e: String| e)?;
            match app.upgrade(method).await? {
                UpgradeOutcome::Completed(confirmation) => {
                    println!("Welcome to PREMIUM, {}!", confirmation.payer_name);
                }
                UpgradeOutcome::Pending {
                    order_id,
                    approval_url,
                } => {
                    println!("Approve the payment at:\n  {approval_url}");
                    println!("Then run: jjxcapital confirm {order_id}");
                }
            }
        }
        Commands::Confirm { order_id } => {
            let confirmation = app.confirm_upgrade(&order_id).await?;
            println!("Welcome to PREMIUM, {}!", confirmation.payer_name);
        }
    }
    Ok(())
}

fn parse_date(s: &Option<String>) -> Result<Option<chrono::DateTime<chrono::Utc>>, String> {
    match s {
        None => Ok(None),
        Some(s) => {
            if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
                return Ok(Some(dt.with_timezone(&chrono::Utc)));
            }
            if let Ok(date) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                    return Ok(Some(chrono::DateTime::from_naive_utc_and_offset(
                        dt,
                        chrono::Utc,
                    )));
                }
            }
            Err(format!(
                "Invalid date format: {s}. Use YYYY-MM-DD or RFC3339"
            ))
        }
    }
}
