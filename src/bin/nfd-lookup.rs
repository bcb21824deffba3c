#![forbid(unsafe_code)]
//! Derive NFD registry lookup accounts and convert Algorand identifiers

use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use nfdlookup::cli::{init_from_config, parse_hex32, resolve_app_id};
use nfdlookup::config::Network;
use nfdlookup::{Address, LookupKind, LookupLogicSig, TxId};
use serde_json::json;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Registry application ID (overrides --network and the config file)
    #[arg(long, global = true)]
    app_id: Option<u64>,
    /// Registry network
    #[arg(long, global = true, value_enum)]
    network: Option<NetworkArg>,
    /// Config file (defaults to ./nfd.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    /// Also print the lookup program as hex
    #[arg(long, global = true)]
    show_program: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum NetworkArg {
    Mainnet,
    Testnet,
}

impl From<NetworkArg> for Network {
    fn from(arg: NetworkArg) -> Self {
        match arg {
            NetworkArg::Mainnet => Network::Mainnet,
            NetworkArg::Testnet => Network::Testnet,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Forward lookup account for an NFD name
    Name {
        /// The .algo name; invalid names are accepted but can never be minted
        name: String,
    },
    /// Reverse lookup account for an Algorand address
    Reverse { address: Address },
    /// Reverse lookup account for a hex-encoded 32-byte public key
    ReverseHex { public_key: String },
    /// Text address to hex public key
    Decode { address: Address },
    /// Hex public key to text address
    Encode { public_key: String },
    /// Text transaction ID to hex
    TxidDecode { txid: TxId },
    /// Hex transaction ID to text
    TxidEncode { digest: String },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = init_from_config(cli.config.as_deref())?;
    let app_id = resolve_app_id(cli.app_id, cli.network.map(Network::from), &config);
    let json_output = cli.json || config.output.json;

    match &cli.command {
        Commands::Name { name } => {
            let lsig = LookupLogicSig::new(LookupKind::Name, name, app_id)?;
            print_lookup(&lsig, name, app_id, json_output, cli.show_program);
        }
        Commands::Reverse { address } => {
            let key = address.encode();
            let lsig = LookupLogicSig::new(LookupKind::Address, &key, app_id)?;
            print_lookup(&lsig, &key, app_id, json_output, cli.show_program);
        }
        Commands::ReverseHex { public_key } => {
            let address = Address::from_slice(&parse_hex32(public_key)?)?;
            let key = address.encode();
            let lsig = LookupLogicSig::new(LookupKind::Address, &key, app_id)?;
            print_lookup(&lsig, &key, app_id, json_output, cli.show_program);
        }
        Commands::Decode { address } => {
            print_pair(
                "address",
                &address.encode(),
                "public_key",
                &hex::encode(address.as_bytes()),
                json_output,
            );
        }
        Commands::Encode { public_key } => {
            let address = Address::from_slice(&parse_hex32(public_key)?)?;
            print_pair(
                "public_key",
                public_key,
                "address",
                &address.encode(),
                json_output,
            );
        }
        Commands::TxidDecode { txid } => {
            print_pair(
                "txid",
                &txid.encode(),
                "digest",
                &hex::encode(txid.0),
                json_output,
            );
        }
        Commands::TxidEncode { digest } => {
            let txid = TxId::from_slice(&parse_hex32(digest)?)?;
            print_pair("digest", digest, "txid", &txid.encode(), json_output);
        }
    }

    Ok(())
}

fn print_lookup(
    lsig: &LookupLogicSig,
    key: &str,
    app_id: u64,
    json_output: bool,
    show_program: bool,
) {
    let account = lsig.address();
    log::info!("{:?} lookup for {} resolved to {}", lsig.kind(), key, account);

    if json_output {
        let mut out = json!({
            "kind": lsig.kind(),
            "key": key,
            "registry_app_id": app_id,
            "account": account,
            "public_key": hex::encode(account.as_bytes()),
        });
        if show_program {
            out["program"] = json!(hex::encode(lsig.program()));
        }
        println!("{}", out);
        return;
    }

    println!(
        "{} {}",
        "Lookup key:".bright_cyan(),
        String::from_utf8_lossy(lsig.lookup_key())
    );
    println!("{} {}", "Registry app:".bright_cyan(), app_id);
    println!(
        "{} {}",
        "Registration account:".bright_green().bold(),
        account.to_string().bright_white()
    );
    if show_program {
        println!(
            "{} {}",
            "Program:".bright_cyan(),
            hex::encode(lsig.program()).dimmed()
        );
    }
}

fn print_pair(from_label: &str, from: &str, to_label: &str, to: &str, json_output: bool) {
    if json_output {
        let mut out = serde_json::Map::new();
        out.insert(from_label.to_string(), json!(from));
        out.insert(to_label.to_string(), json!(to));
        println!("{}", serde_json::Value::Object(out));
    } else {
        println!("{}", to);
    }
}
