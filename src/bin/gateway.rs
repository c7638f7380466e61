//! Todoist gateway binary.

use std::net::IpAddr;

use clap::Parser;
use todoist_gateway::api::{self, Config, ErrorFormat};

#[derive(Parser)]
#[command(name = "todoist-gateway")]
#[command(author, version, about = "HTTP gateway to the Todoist REST API", long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Todoist REST base URL (defaults to TODOIST_API_URL or https://api.todoist.com/rest/v2)
    #[arg(long)]
    api_url: Option<String>,

    /// Error body format (defaults to GATEWAY_ERROR_FORMAT or plain)
    #[arg(long, value_enum)]
    error_format: Option<ErrorFormat>,

    /// Access-Control-Allow-Origin for /sse (defaults to GATEWAY_SSE_ORIGIN)
    #[arg(long)]
    sse_origin: Option<String>,
}

impl Cli {
    /// Flags override the environment, which overrides the defaults.
    fn into_config(self) -> Config {
        let mut config = Config::new().with_host(self.host).with_port(self.port);
        if let Some(url) = self.api_url {
            config = config.with_api_base_url(url);
        }
        if let Some(format) = self.error_format {
            config = config.with_error_format(format);
        }
        if let Some(origin) = self.sse_origin {
            config = config.with_sse_allow_origin(origin);
        }
        config
    }
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    let _ = rustls::crypto::ring::default_provider().install_default();

    api::run(cli.into_config()).await?;
    Ok(())
}
