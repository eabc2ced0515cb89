use clap::Parser;
use std::path::PathBuf;

/// ETL Studio - turn SQL Lab query results into ETL data sources
#[derive(Parser, Debug, Clone)]
#[command(name = "etl-studio", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "ETL_STUDIO_CONFIG", default_value = "etl-studio.toml")]
    pub config: PathBuf,

    /// Server host address
    #[arg(long, env = "ETL_STUDIO_HOST")]
    pub host: Option<String>,

    /// Server port
    #[arg(long, env = "ETL_STUDIO_PORT")]
    pub port: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["etl-studio"]);
        assert_eq!(cli.config, PathBuf::from("etl-studio.toml"));
        assert!(cli.host.is_none());
        assert!(cli.port.is_none());
    }

    #[test]
    fn test_cli_with_args() {
        let cli = Cli::parse_from([
            "etl-studio",
            "--config",
            "custom.toml",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
        ]);
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
        assert_eq!(cli.host, Some("0.0.0.0".to_string()));
        assert_eq!(cli.port, Some(8080));
    }
}
