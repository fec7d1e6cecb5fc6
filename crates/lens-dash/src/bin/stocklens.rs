//! Stock lookup dashboard CLI
//!
//! An interactive command-line front to the dashboard core.
//!
//! # Usage
//!
//! ```bash
//! # Point at the analytics backend
//! export STOCKLENS_API_BASE="http://localhost:8000/api"
//!
//! cargo run --bin stocklens -p lens-dash
//! ```

use clap::Parser;
use lens_dash::app::Dashboard;
use lens_dash::config::DashConfig;
use lens_dash::model::{SearchStatus, SecondaryStatus};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(Parser, Debug)]
#[command(name = "stocklens")]
#[command(about = "Interactive stock lookup dashboard", long_about = None)]
struct Args {
    /// Base URL of the analytics backend
    #[arg(long)]
    api_base: Option<String>,

    /// History window for the OHLCV fetch (e.g. 6mo, 1y)
    #[arg(long, default_value = "6mo")]
    period: String,

    /// Bar interval for the OHLCV fetch (e.g. 1d, 1wk)
    #[arg(long, default_value = "1d")]
    interval: String,

    /// Username to log in with
    #[arg(long)]
    username: Option<String>,

    /// Password to log in with
    #[arg(long)]
    password: Option<String>,
}

fn print_banner() {
    println!(
        r"
╔══════════════════════════════════════════════════════════╗
║                       stocklens                          ║
║                                                          ║
║  Commands:                                               ║
║    /search <symbol>  - Search directly                   ║
║    /auto <symbol>    - Search via the scripted sequence  ║
║    /context          - Dump the assistant context        ║
║    /actions          - List assistant actions            ║
║    /help             - Show this help                    ║
║    /exit             - Quit                              ║
╚══════════════════════════════════════════════════════════╝
"
    );
}

async fn print_session(dashboard: &Dashboard) {
    let Some(session) = dashboard.store().session().await else {
        println!("No search yet.");
        return;
    };

    match session.status {
        SearchStatus::Loading => println!("{}: loading...", session.ticker),
        SearchStatus::Failed => {
            let message = session.error.as_deref().unwrap_or("unknown failure");
            println!("{}: failed - {message}", session.ticker);
        },
        SearchStatus::Ready => {
            println!("{}: {} rows loaded", session.ticker, session.ohlcv.len());
            if let Some(last) = session.ohlcv.last() {
                println!("  last close: {} ({})", last.close, last.date);
            }
            if let Some(info) = &session.info {
                if let Some(name) = &info.profile.long_name {
                    println!("  company: {name}");
                }
                if let Some(price) = info.price.current_price {
                    println!("  current price: {price}");
                }
            }
            match session.insights_status {
                SecondaryStatus::Pending => println!("  insights: loading..."),
                SecondaryStatus::Ready => {
                    if let Some(report) = &session.insights {
                        println!(
                            "  insights: {}/100 ({})",
                            report.overall_score, report.overall_label
                        );
                    }
                },
                SecondaryStatus::Failed => println!("  insights: unavailable"),
                SecondaryStatus::Idle => {},
            }
            match session.forecast_status {
                SecondaryStatus::Ready => {
                    if let Some(forecast) = &session.forecast {
                        if let Some(point) = forecast.forecast.last() {
                            println!(
                                "  forecast ({}): {} by {}",
                                forecast.model, point.price, point.date
                            );
                        }
                    }
                },
                SecondaryStatus::Pending => println!("  forecast: loading..."),
                SecondaryStatus::Failed => println!("  forecast: unavailable"),
                SecondaryStatus::Idle => {},
            }
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            env::var("RUST_LOG").unwrap_or_else(|_| "warn,lens_dash=info".to_string()),
        )
        .init();

    let args = Args::parse();

    let mut builder = DashConfig::builder()
        .period(args.period)
        .interval(args.interval);
    if let Some(api_base) = args.api_base {
        builder = builder.api_base(api_base);
    }
    let config = builder.build()?.with_env_api_base();

    print_banner();
    println!("Backend: {}", config.api_base);

    let dashboard = Dashboard::new(&config)?;

    if let (Some(username), Some(password)) = (args.username, args.password) {
        match dashboard.gateway() {
            Some(gateway) => match gateway.login(&username, &password).await {
                Ok(()) => println!("Logged in as {username}"),
                Err(err) => eprintln!("Login failed: {err}"),
            },
            None => eprintln!("No gateway configured; skipping login"),
        }
    }

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        match line.split_once(' ').map_or((line, ""), |(c, r)| (c, r.trim())) {
            ("/exit" | "/quit", _) => break,
            ("/help", _) => print_banner(),
            ("/search", symbol) => {
                if symbol.is_empty() {
                    println!("Usage: /search <symbol>");
                    continue;
                }
                dashboard.search(symbol).await;
                print_session(&dashboard).await;
            },
            ("/auto", symbol) => {
                if symbol.is_empty() {
                    println!("Usage: /auto <symbol>");
                    continue;
                }
                match dashboard.automate_search(symbol).await {
                    Ok(message) => {
                        println!("{message}");
                        print_session(&dashboard).await;
                    },
                    Err(err) => eprintln!("Automation failed: {err}"),
                }
            },
            ("/context", _) => {
                let snapshot = dashboard.surface().snapshot_all().await;
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            },
            ("/actions", _) => {
                for spec in dashboard.surface().describe_actions() {
                    println!("{} - {}", spec.name, spec.description);
                }
            },
            ("", _) => {},
            (other, _) => println!("Unknown command: {other} (try /help)"),
        }
    }

    println!("Bye.");
    Ok(())
}
