//! Veridia CLI — produce, decode and verify land verification links.

mod config;
mod output;

use anyhow::{anyhow, Context};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

use veridia_registry::{GatewayClient, RegistryReader, ViewClient};
use veridia_types::{AccountAddress, LandId, Network, SystemClock};
use veridia_utils::{init_logging, LogFormat};
use veridia_verification::link::{explorer_txn_url, extract_token, verification_url};
use veridia_verification::qr::{render_svg, render_terminal, DEFAULT_SVG_SIZE};
use veridia_verification::{decode, ClaimBuilder, Confirmer, LandClaim};

use config::VeridiaConfig;
use output::{
    exit, render_record, render_verdict, verdict_exit_code, EXIT_FAILURE, EXIT_INVALID_DATA,
    EXIT_NOT_VERIFIED,
};

#[derive(Parser)]
#[command(name = "veridia", about = "Land registry verification links")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, global = true, env = "VERIDIA_CONFIG")]
    config: Option<PathBuf>,

    /// Network the registry lives on: "mainnet", "testnet", "devnet" or "local".
    #[arg(long, global = true, env = "VERIDIA_NETWORK")]
    network: Option<Network>,

    /// Fullnode REST endpoint (defaults to the network's public fullnode).
    #[arg(long, global = true, env = "VERIDIA_NODE_URL")]
    node_url: Option<String>,

    /// Account the registry module is published under.
    #[arg(long, global = true, env = "VERIDIA_REGISTRY_ADDRESS")]
    registry_address: Option<AccountAddress>,

    /// Name of the registry Move module.
    #[arg(long, global = true, env = "VERIDIA_MODULE_NAME")]
    module_name: Option<String>,

    /// IPFS gateway for document bundles.
    #[arg(long, global = true, env = "VERIDIA_GATEWAY_URL")]
    gateway_url: Option<String>,

    /// Origin of the verification page.
    #[arg(long, global = true, env = "VERIDIA_VERIFY_BASE_URL")]
    verify_base_url: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, global = true, env = "VERIDIA_REQUEST_TIMEOUT_SECS")]
    timeout: Option<u64>,

    /// Log format: "human" or "json".
    #[arg(long, global = true, env = "VERIDIA_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, global = true, env = "VERIDIA_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum QrFormat {
    Svg,
    Terminal,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Build a verification link for a parcel.
    Link {
        #[arg(long)]
        land_id: u64,

        /// Claimed owner (required unless --from-chain).
        #[arg(long)]
        owner: Option<String>,

        /// Claimed jurisdiction (required unless --from-chain).
        #[arg(long)]
        jurisdiction: Option<String>,

        /// Content address of the document bundle (required unless --from-chain).
        #[arg(long)]
        metadata_hash: Option<String>,

        /// Transaction that produced the claimed state.
        #[arg(long)]
        tx: Option<String>,

        /// Claim the record as the registry holds it now.
        #[arg(long, conflicts_with_all = ["owner", "jurisdiction", "metadata_hash"])]
        from_chain: bool,

        /// Also render the link as a QR code.
        #[arg(long, value_enum)]
        qr: Option<QrFormat>,

        /// Write the QR code here instead of stdout.
        #[arg(long, requires = "qr")]
        out: Option<PathBuf>,
    },

    /// Print the claim inside a token or link as JSON.
    Decode {
        /// Token or full verification link.
        input: String,
    },

    /// Confirm a token or link against the registry.
    ///
    /// Exit status: 0 verified, 1 mismatch or not found, 2 could not
    /// verify, 3 invalid token.
    Verify {
        /// Token or full verification link.
        input: String,

        /// Print the verdict as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the live record of a parcel.
    Land {
        id: u64,

        /// Also fetch the metadata bundle from the gateway.
        #[arg(long)]
        documents: bool,
    },

    /// Print the id the registry will assign next.
    NextId,
}

impl Cli {
    /// Layer flags and env vars over the config file (or the defaults).
    fn resolve_config(&self) -> anyhow::Result<VeridiaConfig> {
        let mut config = match &self.config {
            Some(path) => VeridiaConfig::from_toml_file(path)?,
            None => VeridiaConfig::default(),
        };

        if let Some(network) = self.network {
            config.registry.network = network;
        }
        if let Some(url) = &self.node_url {
            config.registry.node_url = Some(url.clone());
        }
        if let Some(address) = &self.registry_address {
            config.registry.registry_address = address.clone();
        }
        if let Some(module) = &self.module_name {
            config.registry.module_name = module.clone();
        }
        if let Some(url) = &self.gateway_url {
            config.registry.gateway_url = url.clone();
        }
        if let Some(url) = &self.verify_base_url {
            config.verify_base_url = url.clone();
        }
        if let Some(secs) = self.timeout {
            config.registry.request_timeout_secs = secs;
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e:#}");
            return exit(EXIT_FAILURE);
        }
    };
    init_logging(config.log_format, &config.log_level);
    tracing::debug!(
        network = %config.registry.network,
        node = %config.registry.resolved_node_url(),
        registry = %config.registry.registry_address,
        "configuration loaded"
    );

    match run(cli.command, &config).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            exit(EXIT_FAILURE)
        }
    }
}

async fn run(command: Command, config: &VeridiaConfig) -> anyhow::Result<ExitCode> {
    let contract = config.registry.registry_address.as_str();

    match command {
        Command::Link {
            land_id,
            owner,
            jurisdiction,
            metadata_hash,
            tx,
            from_chain,
            qr,
            out,
        } => {
            let land_id = LandId::new(land_id)?;
            let mut builder = ClaimBuilder::new(contract, config.registry.network);
            if let Some(hash) = &tx {
                builder = builder.transaction_hash(hash.as_str());
            }

            let claim = if from_chain {
                let reader = ViewClient::new(&config.registry)?;
                let record = reader
                    .get_land(contract, land_id)
                    .await?
                    .ok_or_else(|| anyhow!("land {land_id} not found in registry {contract}"))?;
                builder.for_record(&record, &SystemClock)
            } else {
                let required = |value: Option<String>, flag: &str| {
                    value.with_context(|| {
                        format!("--{flag} is required unless --from-chain is set")
                    })
                };
                builder.for_parts(
                    land_id,
                    &required(owner, "owner")?,
                    &required(jurisdiction, "jurisdiction")?,
                    &required(metadata_hash, "metadata-hash")?,
                    &SystemClock,
                )
            };

            let url = verification_url(&config.verify_base_url, &claim)?;
            tracing::info!(%land_id, "verification link created");
            println!("{url}");
            if let Some(hash) = &claim.transaction_hash {
                eprintln!("transaction: {}", explorer_txn_url(claim.network, hash));
            }

            match qr {
                Some(QrFormat::Svg) => {
                    let svg = render_svg(url.as_str(), DEFAULT_SVG_SIZE)?;
                    match &out {
                        Some(path) => std::fs::write(path, svg)
                            .with_context(|| format!("failed to write {}", path.display()))?,
                        None => println!("{svg}"),
                    }
                }
                Some(QrFormat::Terminal) => {
                    let text = render_terminal(url.as_str())?;
                    match &out {
                        Some(path) => std::fs::write(path, text)
                            .with_context(|| format!("failed to write {}", path.display()))?,
                        None => println!("{text}"),
                    }
                }
                None => {}
            }
            Ok(ExitCode::SUCCESS)
        }

        Command::Decode { input } => {
            let claim = match decode_input(&input) {
                Ok(claim) => claim,
                Err(e) => {
                    eprintln!("invalid verification data: {e}");
                    return Ok(exit(EXIT_INVALID_DATA));
                }
            };
            println!("{}", serde_json::to_string_pretty(&claim)?);
            Ok(ExitCode::SUCCESS)
        }

        Command::Verify { input, json } => {
            let claim = match decode_input(&input) {
                Ok(claim) => claim,
                Err(e) => {
                    eprintln!("invalid verification data: {e}");
                    return Ok(exit(EXIT_INVALID_DATA));
                }
            };
            if claim.network != config.registry.network {
                tracing::warn!(
                    claimed = %claim.network,
                    configured = %config.registry.network,
                    "claim names a different network than the configured node"
                );
            }

            let confirmer = Confirmer::new(ViewClient::new(&config.registry)?);
            let verdict = confirmer.confirm(&claim).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&verdict)?);
            } else {
                print!("{}", render_verdict(&claim, &verdict));
            }
            Ok(exit(verdict_exit_code(verdict.outcome())))
        }

        Command::Land { id, documents } => {
            let land_id = LandId::new(id)?;
            let reader = ViewClient::new(&config.registry)?;
            let Some(record) = reader.get_land(contract, land_id).await? else {
                eprintln!("land {land_id} not found in registry {contract}");
                return Ok(exit(EXIT_NOT_VERIFIED));
            };
            print!("{}", render_record(&record));

            if documents {
                let gateway = GatewayClient::new(&config.registry)?;
                match gateway.fetch_metadata(&record.metadata_hash).await {
                    Ok(metadata) => {
                        println!("{}", serde_json::to_string_pretty(&metadata)?);
                        for (kind, cid) in metadata.documents.iter() {
                            println!("{kind}: {}", gateway.file_url(cid));
                        }
                    }
                    Err(e) => {
                        tracing::warn!(
                            cid = %record.metadata_hash,
                            error = %e,
                            "metadata unavailable"
                        );
                        println!("metadata:       {}", gateway.file_url(&record.metadata_hash));
                    }
                }
            }
            Ok(ExitCode::SUCCESS)
        }

        Command::NextId => {
            let reader = ViewClient::new(&config.registry)?;
            let next = reader.next_land_id(contract).await?;
            println!("{next}");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn decode_input(input: &str) -> Result<LandClaim, veridia_verification::DecodeError> {
    decode(&extract_token(input)?)
}
