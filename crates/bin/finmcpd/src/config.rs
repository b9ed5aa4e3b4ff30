use clap::{Parser, builder::BoolishValueParser};
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_PROVIDER_BASE_URL: &str = "https://query2.finance.yahoo.com";
const DEFAULT_MCP_HTTP_ADDR: &str = "127.0.0.1:4030";
const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 10;
const DEFAULT_USER_AGENT: &str = concat!("finmcp/", env!("CARGO_PKG_VERSION"));

#[derive(Parser, Debug)]
#[command(name = "finmcpd", version, about = "Finmcp MCP daemon.")]
struct CliArgs {
    #[arg(
        long = "stdio",
        env = "FINMCP_ENABLE_STDIO",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    enable_stdio: bool,

    #[arg(
        long,
        env = "FINMCP_HTTP_SERVE",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    http_serve: bool,

    #[arg(long, env = "FINMCP_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    mcp_http_addr: SocketAddr,

    #[arg(
        long,
        env = "FINMCP_PROVIDER_BASE_URL",
        default_value = DEFAULT_PROVIDER_BASE_URL
    )]
    provider_base_url: String,

    #[arg(
        long,
        env = "FINMCP_PROVIDER_TIMEOUT_SECS",
        default_value_t = DEFAULT_PROVIDER_TIMEOUT_SECS
    )]
    provider_timeout_secs: u64,

    #[arg(long, env = "FINMCP_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Clone)]
pub struct FinmcpConfig {
    pub enable_stdio: bool,
    pub http_serve: bool,
    pub mcp_http_addr: SocketAddr,
    pub provider_base_url: String,
    pub provider_timeout: Duration,
    pub user_agent: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidSetting { name: &'static str, value: String },
    NothingToServe,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
            Self::NothingToServe => {
                write!(f, "no transport enabled: set --stdio or --http-serve")
            }
        }
    }
}

impl Error for ConfigError {}

impl FinmcpConfig {
    /// Parses CLI arguments and environment variables into a validated config.
    ///
    /// # Errors
    /// Returns a `ConfigError` when no transport is enabled or a setting fails
    /// validation.
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }
}

impl TryFrom<CliArgs> for FinmcpConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if !args.enable_stdio && !args.http_serve {
            return Err(ConfigError::NothingToServe);
        }

        let provider_base_url = args.provider_base_url.trim().trim_end_matches('/');
        if provider_base_url.is_empty() {
            return Err(ConfigError::InvalidSetting {
                name: "FINMCP_PROVIDER_BASE_URL",
                value: args.provider_base_url,
            });
        }

        if args.provider_timeout_secs == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "FINMCP_PROVIDER_TIMEOUT_SECS",
                value: args.provider_timeout_secs.to_string(),
            });
        }

        let user_agent = args.user_agent.trim();
        if user_agent.is_empty() {
            return Err(ConfigError::InvalidSetting {
                name: "FINMCP_USER_AGENT",
                value: args.user_agent,
            });
        }

        Ok(Self {
            enable_stdio: args.enable_stdio,
            http_serve: args.http_serve,
            mcp_http_addr: args.mcp_http_addr,
            provider_base_url: provider_base_url.to_string(),
            provider_timeout: Duration::from_secs(args.provider_timeout_secs),
            user_agent: user_agent.to_string(),
        })
    }
}
