//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::client::{append_query, CcClient, Client};
use crate::config::ClientConfig;
use crate::error::Error;
use crate::template::cc_routes;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> anyhow::Result<()> {
        let config = self.build_config()?;
        let client = CcClient::from_config(&config).context("Failed to create client")?;
        debug!("Using {:?}", client);

        self.dispatch(&client).await
    }

    /// Execute the command against any client
    pub async fn dispatch(&self, client: &dyn Client) -> anyhow::Result<()> {
        let result = match &self.cli.command {
            Commands::Apps { query, limit } => {
                if *limit == 0 {
                    client.list_applications(query).await
                } else {
                    let path = append_query(&cc_routes().path("apps", &[])?, query);
                    client.list_resources(&path, *limit).await
                }
            }
            Commands::List { path, limit } => client.list_resources(path, *limit).await,
            Commands::Get { path } => client.get_resource(path).await,
            Commands::Refresh => {
                client
                    .refresh_auth_token()
                    .await
                    .context("Token refresh failed")?;
                eprintln!("Token refreshed");
                println!("{}", client.token());
                return Ok(());
            }
        };

        match result {
            Ok(body) => self.print_body(&body),
            Err(err) => {
                if let Some(body) = err.response_body() {
                    eprintln!("{}", String::from_utf8_lossy(body));
                }
                if err.is_unauthorized() {
                    eprintln!("Token rejected; try `ccapi refresh` with a refresh token");
                }
                Err(err.into())
            }
        }
    }

    /// Merge config file, environment and flags
    fn build_config(&self) -> anyhow::Result<ClientConfig> {
        let mut config = match (&self.cli.config, &self.cli.endpoint) {
            (Some(path), _) => ClientConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            (None, Some(endpoint)) => ClientConfig::new(endpoint),
            (None, None) => ClientConfig::from_env().context(
                "No endpoint given (use --endpoint, --config, or CCAPI_ENDPOINT)",
            )?,
        };

        if let Some(endpoint) = &self.cli.endpoint {
            config.cc_endpoint.clone_from(endpoint);
        }
        if let Some(uaa) = &self.cli.uaa_endpoint {
            config.uaa_endpoint = Some(uaa.clone());
        }
        if let Some(token) = &self.cli.token {
            config.token = Some(token.clone());
        }
        if let Some(refresh_token) = &self.cli.refresh_token {
            config.refresh_token = Some(refresh_token.clone());
        }

        config.validate()?;
        Ok(config)
    }

    fn print_body(&self, body: &Bytes) -> anyhow::Result<()> {
        let mut stdout = std::io::stdout().lock();

        if self.cli.pretty {
            if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
                serde_json::to_writer_pretty(&mut stdout, &value)
                    .map_err(|e| Error::encode(e.to_string()))?;
                writeln!(stdout)?;
                return Ok(());
            }
        }

        stdout.write_all(body)?;
        writeln!(stdout)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use async_trait::async_trait;
    use clap::Parser;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingClient {
        token: Mutex<String>,
        calls: Mutex<Vec<&'static str>>,
    }

    impl RecordingClient {
        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Client for RecordingClient {
        async fn list_applications(&self, _query: &[(String, String)]) -> Result<Bytes> {
            self.calls.lock().unwrap().push("list_applications");
            Ok(Bytes::from_static(b"[]"))
        }

        async fn get_resource(&self, _path: &str) -> Result<Bytes> {
            self.calls.lock().unwrap().push("get_resource");
            Err(Error::unexpected_status(404, r#"{"errors": []}"#))
        }

        async fn list_resources(&self, _path: &str, _limit: usize) -> Result<Bytes> {
            self.calls.lock().unwrap().push("list_resources");
            Ok(Bytes::from_static(b"[]"))
        }

        async fn refresh_auth_token(&self) -> Result<()> {
            self.calls.lock().unwrap().push("refresh_auth_token");
            *self.token.lock().unwrap() = "bearer refreshed".to_string();
            Ok(())
        }

        fn set_token(&self, token: String) {
            *self.token.lock().unwrap() = token;
        }

        fn token(&self) -> String {
            self.calls.lock().unwrap().push("token");
            self.token.lock().unwrap().clone()
        }
    }

    fn runner(args: &[&str]) -> Runner {
        let mut argv = vec!["ccapi", "--endpoint", "https://api.example.com"];
        argv.extend_from_slice(args);
        Runner::new(Cli::parse_from(argv))
    }

    #[tokio::test]
    async fn test_refresh_reads_new_token() {
        let client = RecordingClient::default();

        runner(&["refresh"]).dispatch(&client).await.unwrap();

        assert_eq!(client.calls(), vec!["refresh_auth_token", "token"]);
        assert_eq!(*client.token.lock().unwrap(), "bearer refreshed");
    }

    #[tokio::test]
    async fn test_apps_with_limit_walks_collection() {
        let client = RecordingClient::default();

        runner(&["apps", "--limit", "5"]).dispatch(&client).await.unwrap();
        runner(&["apps"]).dispatch(&client).await.unwrap();

        assert_eq!(client.calls(), vec!["list_resources", "list_applications"]);
    }

    #[tokio::test]
    async fn test_get_error_is_returned() {
        let client = RecordingClient::default();

        let err = runner(&["get", "/v3/apps/missing"])
            .dispatch(&client)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("404"));
    }
}
