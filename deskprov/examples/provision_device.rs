//! Provision a phone from the HTTP request it sent.
//!
//! This example identifies a device from a request path and `User-Agent`,
//! picks the best plugin for it and writes its configuration file under a
//! provisioning root.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example provision_device -- \
//!     --path /cfg000b82aabbcc.xml \
//!     --user-agent "Grandstream Model HW GXP2160 SW 1.0.11.3 DevId 000b82aabbcc" \
//!     --config device.json --root /tmp/tftpboot
//! ```

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use deskprov::host::{SyncAction, SyncNotifier};
use deskprov::ident::HttpRequest;
use deskprov::{ConfigRecord, DeviceFingerprint, PluginRegistry, ProvisionerBuilder};

/// Prints sync events instead of sending SIP NOTIFYs.
struct PrintNotifier;

#[async_trait]
impl SyncNotifier for PrintNotifier {
    async fn notify(&self, device: &DeviceFingerprint, action: &SyncAction) -> deskprov::Result<()> {
        let mac = device.mac().map(|m| m.to_string()).unwrap_or_default();
        println!("NOTIFY {} -> {}", action.event, mac);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (set RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut request = HttpRequest::new(args.path.as_str());
    if let Some(user_agent) = &args.user_agent {
        request = request.with_header(&b"User-Agent"[..], user_agent.as_bytes().to_vec());
    }

    let registry = PluginRegistry::global();
    let Some(device) = registry.extract(&request.into()) else {
        eprintln!("No plugin recognizes this request");
        std::process::exit(1);
    };
    println!("Identified: {:?}", device);

    let Some((plugin, score)) = registry.best_match(&device) else {
        eprintln!("No plugin supports this device");
        std::process::exit(1);
    };
    println!("Best plugin: {} (score {})", plugin.name, score);

    let config = match &args.config {
        Some(path) => ConfigRecord::from_json(&tokio::fs::read_to_string(path).await?)?,
        None => ConfigRecord::from_json(
            r#"{"http_port": 8667, "tftp_port": 69, "sip_lines": {"1": {"username": "1001", "proxy_ip": "127.0.0.1"}}}"#,
        )?,
    };

    let provisioner = ProvisionerBuilder::new()
        .plugin(plugin.name.as_str())
        .root_dir(&args.root)
        .notifier(Arc::new(PrintNotifier))
        .build()?;

    let path = provisioner.configure(&device, &config).await?;
    println!("Wrote {}", path.display());

    match provisioner.synchronize(&device, &config).await {
        Ok(outcome) => println!("{} in {:?}", outcome, outcome.elapsed),
        Err(e) => eprintln!("Synchronize failed: {}", e),
    }

    Ok(())
}

/// Simple argument parser
struct Args {
    path: String,
    user_agent: Option<String>,
    config: Option<PathBuf>,
    root: PathBuf,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut path = "/".to_string();
        let mut user_agent = None;
        let mut config = None;
        let mut root = PathBuf::from("tftpboot");

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--path" => {
                    i += 1;
                    if i < args.len() {
                        path = args[i].clone();
                    }
                }
                "--user-agent" | "-a" => {
                    i += 1;
                    if i < args.len() {
                        user_agent = Some(args[i].clone());
                    }
                }
                "--config" | "-c" => {
                    i += 1;
                    if i < args.len() {
                        config = Some(PathBuf::from(&args[i]));
                    }
                }
                "--root" | "-r" => {
                    i += 1;
                    if i < args.len() {
                        root = PathBuf::from(&args[i]);
                    }
                }
                "--help" => {
                    println!(
                        "USAGE:\n    cargo run --example provision_device -- --path <PATH> [--user-agent <UA>] [--config <JSON>] [--root <DIR>]"
                    );
                    std::process::exit(0);
                }
                _ => {
                    eprintln!("Unknown argument: {}", args[i]);
                }
            }
            i += 1;
        }

        Self {
            path,
            user_agent,
            config,
            root,
        }
    }
}
