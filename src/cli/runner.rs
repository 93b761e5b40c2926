//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::client::{verify_server, RouteClient, RouteClientConfig};
use crate::config::{ConfigOverrides, ServiceConfig};
use crate::error::{Error, Result, ResultExt};
use crate::routing::{route, RouteResponse, RouteTable};
use crate::types::Tier;
use crate::validate::RequestSchema;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

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
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Serve {
                host,
                port,
                banner,
                echo_message,
            } => {
                let overrides = ConfigOverrides {
                    host: *host,
                    port: *port,
                    banner: banner.clone(),
                    echo_message: *echo_message,
                };
                let config = self.load_config()?.with_overrides(&overrides);
                crate::cli::serve(config).await
            }
            Commands::Route {
                payload,
                payload_json,
            } => self.route(payload.as_deref(), payload_json.as_deref()),
            Commands::Verify {
                url,
                count,
                message,
                expect_message,
                timeout,
            } => {
                let config = RouteClientConfig::new(url.as_str())
                    .with_timeout(Duration::from_secs(*timeout));
                self.verify(config, *count, message, expect_message.as_deref())
                    .await
            }
            Commands::Tiers => self.tiers(),
        }
    }

    /// Load service config from the `--config` file, or defaults
    fn load_config(&self) -> Result<ServiceConfig> {
        match &self.cli.config {
            Some(path) => ServiceConfig::from_file(path),
            None => Ok(ServiceConfig::default()),
        }
    }

    /// Compute and print a route table
    fn route(&self, payload: Option<&Path>, payload_json: Option<&str>) -> Result<()> {
        let body = match (payload, payload_json) {
            (Some(path), _) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read payload '{}'", path.display()))?,
            (None, Some(inline)) => inline.to_string(),
            (None, None) => {
                return Err(Error::config(
                    "No payload given (use --payload or --payload-json)",
                ))
            }
        };

        let config = self.load_config()?;
        let request = RequestSchema::new().decode(body.as_bytes())?;

        let start = Instant::now();
        let routes = route(&request.recipients);
        tracing::debug!(
            "Routed {} recipients in {:?}",
            request.recipients.len(),
            start.elapsed()
        );

        let response = RouteResponse {
            message: config
                .message_mode
                .select(&config.banner, &request.message)
                .to_string(),
            routes,
        };

        match self.cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(&response)?),
            OutputFormat::Pretty => {
                println!("Message: {}", response.message);
                print_route_table(&response.routes);
            }
        }
        Ok(())
    }

    /// Verify a running server
    async fn verify(
        &self,
        config: RouteClientConfig,
        count: usize,
        message: &str,
        expect_message: Option<&str>,
    ) -> Result<()> {
        let client = RouteClient::with_config(config)?;
        let url = client.base_url().to_string();

        if !client.health().await.unwrap_or(false) {
            tracing::warn!("Health check failed for {url}, verifying anyway");
        }

        let start = Instant::now();
        let outcomes = verify_server(&client, message, count, expect_message).await?;

        match self.cli.format {
            OutputFormat::Json => {
                let results: Vec<Value> = outcomes
                    .iter()
                    .map(|o| json!({ "recipients": o.recipients, "routes": o.counts }))
                    .collect();
                println!(
                    "{}",
                    json!({
                        "type": "VERIFY",
                        "status": "PASSED",
                        "url": url,
                        "results": results
                    })
                );
            }
            OutputFormat::Pretty => {
                println!("Verifying {url}");
                for o in &outcomes {
                    println!(
                        "  {:>4} recipients: {} super, {} large, {} medium, {} small  PASS",
                        o.recipients,
                        o.counts.tier25,
                        o.counts.tier10,
                        o.counts.tier5,
                        o.counts.tier1
                    );
                }
                println!(
                    "{} requests verified in {:.2}s",
                    outcomes.len(),
                    start.elapsed().as_secs_f64()
                );
            }
        }
        Ok(())
    }

    /// Print the tier plan
    fn tiers(&self) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => {
                let tiers: Vec<Value> = Tier::ALL
                    .into_iter()
                    .map(|t| {
                        json!({
                            "name": t.label(),
                            "capacity": t.capacity(),
                            "subnet": t.subnet(),
                            "prefix": t.prefix()
                        })
                    })
                    .collect();
                println!("{}", json!({ "type": "TIERS", "tiers": tiers }));
            }
            OutputFormat::Pretty => {
                println!("{:<8} {:>8}  PREFIX", "TIER", "CAPACITY");
                for t in Tier::ALL {
                    println!("{:<8} {:>8}  {}x", t.label(), t.capacity(), t.prefix());
                }
            }
        }
        Ok(())
    }
}

fn print_route_table(routes: &RouteTable) {
    if routes.is_empty() {
        println!("No routes");
        return;
    }
    for r in routes {
        println!("{:<12} {}", r.address, r.recipients.join(", "));
    }
    println!("{} routes", routes.len());
}
