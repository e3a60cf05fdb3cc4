use clap::{Parser, Subcommand, ValueEnum};
use dnsprobe_api::dto::{render_text, SimpleResult};
use dnsprobe_domain::{CliOverrides, ServerQueryResult};
use std::net::SocketAddr;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser, Debug)]
#[command(name = "dnsprobe")]
#[command(version)]
#[command(about = "dnsprobe - multi-transport DNS tester and DoH gateway")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Web server port
    #[arg(short = 'w', long, global = true)]
    web_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long, global = true)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Per-query timeout in milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API and the DoH endpoint (default)
    Serve,

    /// Query one domain against several servers and print the results
    Query {
        domain: String,

        /// Server spec (udp://, dot://, doh://, local); repeatable
        #[arg(short = 's', long = "server")]
        servers: Vec<String>,

        /// Record type: A, AAAA, CNAME, MX, TXT, NS, SOA, BOTH or ALL
        #[arg(short = 't', long = "type", default_value = "A")]
        record_type: String,

        /// HTTP proxy for DoH servers
        #[arg(long)]
        proxy: Option<String>,

        #[arg(short = 'f', long, value_enum, default_value_t = PrintFormat::Text)]
        format: PrintFormat,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum PrintFormat {
    Json,
    Simple,
    Text,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        web_port: cli.web_port,
        bind_address: cli.bind.clone(),
        log_level: cli.log_level.clone(),
        timeout_ms: cli.timeout_ms,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    let use_cases = di::UseCases::new(&config);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            info!("Starting dnsprobe v{}", env!("CARGO_PKG_VERSION"));

            let web_addr: SocketAddr =
                format!("{}:{}", config.server.bind_address, config.server.web_port).parse()?;

            server::start_web_server(web_addr, use_cases.into_app_state()).await?;

            info!("Server shutdown complete");
        }
        Command::Query {
            domain,
            servers,
            record_type,
            proxy,
            format,
        } => {
            let servers = (!servers.is_empty()).then_some(servers);
            let results = use_cases
                .run_queries
                .execute(&domain, servers, &record_type, proxy.as_deref())
                .await;
            print!("{}", render(&results, format)?);
        }
    }

    Ok(())
}

fn render(results: &[ServerQueryResult], format: PrintFormat) -> anyhow::Result<String> {
    let out = match format {
        PrintFormat::Json => serde_json::to_string_pretty(results)? + "\n",
        PrintFormat::Simple => {
            let simple: Vec<SimpleResult> = results.iter().map(SimpleResult::from).collect();
            serde_json::to_string_pretty(&simple)? + "\n"
        }
        PrintFormat::Text => render_text(results),
    };
    Ok(out)
}
