//! Allowlist proof tooling
//!
//! You can run this script using the following command:
//! ```shell
//! RUST_LOG=info cargo run --release -- prove --allowlist allowlist.json --address 0x...
//! ```
//! or
//! ```shell
//! RUST_LOG=info cargo run --release -- root --allowlist allowlist.json
//! ```

use std::fs;
use std::path::PathBuf;

use allowlist_lib::{
    encode_hash, load_allowlist, parse_address, parse_hash, public_mint_request,
    verify_membership, whitelist_mint_request, MintAmount, MintRequest, ProofOutput, H256,
};
use allowlist_script::logging::setup_logger;
use allowlist_script::{build_checked_tree, write_file_atomic};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "allowlist", author, version, about = "Allowlist Merkle proof tooling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the Merkle root of an allowlist
    Root {
        #[arg(short, long, env = "ALLOWLIST_PATH")]
        allowlist: PathBuf,
    },
    /// Produce the inclusion proof for one address
    Prove {
        #[arg(short, long, env = "ALLOWLIST_PATH")]
        allowlist: PathBuf,

        #[arg(short = 'a', long)]
        address: String,

        /// Root the contract was deployed with
        #[arg(short = 'r', long, env = "EXPECTED_ROOT")]
        expected_root: Option<String>,

        /// Output JSON file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check a proof file against a root
    Verify {
        #[arg(short, long)]
        root: String,

        #[arg(short = 'a', long)]
        address: String,

        /// Proof JSON written by `prove`
        #[arg(short, long)]
        proof: PathBuf,
    },
    /// Print calldata and payment for a mint call
    Calldata {
        #[command(subcommand)]
        kind: CalldataKind,
    },
}

#[derive(Subcommand, Debug)]
enum CalldataKind {
    /// `whitelistMint(proof)` for an allowlisted address
    Whitelist {
        #[arg(short, long, env = "ALLOWLIST_PATH")]
        allowlist: PathBuf,

        #[arg(short = 'a', long)]
        address: String,

        #[arg(short = 'r', long, env = "EXPECTED_ROOT")]
        expected_root: Option<String>,
    },
    /// `publicMint(amount)`
    Public {
        #[arg(short = 'n', long, default_value_t = 1)]
        amount: u64,
    },
}

fn main() -> Result<()> {
    setup_logger();
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Root { allowlist } => {
            let tree = build_checked_tree(&load_allowlist(&allowlist)?, None)?;
            println!("{}", encode_hash(&tree.root()));
        }
        Commands::Prove {
            allowlist,
            address,
            expected_root,
            output,
        } => prove(allowlist, &address, expected_root.as_deref(), output)?,
        Commands::Verify {
            root,
            address,
            proof,
        } => verify(&root, &address, proof)?,
        Commands::Calldata { kind } => calldata(kind)?,
    }

    Ok(())
}

fn parse_root(root: Option<&str>) -> Result<Option<H256>> {
    root.map(parse_hash)
        .transpose()
        .context("Invalid expected root")
}

fn prove(
    allowlist: PathBuf,
    address: &str,
    expected_root: Option<&str>,
    output: Option<PathBuf>,
) -> Result<()> {
    let expected_root = parse_root(expected_root)?;
    let tree = build_checked_tree(&load_allowlist(&allowlist)?, expected_root.as_ref())?;
    let address = parse_address(address)?;
    let proof = tree.prove_membership(&address)?;

    info!(leaf_index = proof.leaf_index, nodes = proof.siblings.len(), "proof generated");

    let json = serde_json::to_string_pretty(&ProofOutput::new(&tree.root(), &proof))
        .context("Failed to serialize proof")?;
    match output {
        Some(path) => {
            write_file_atomic(&path, &json).context("Failed to write proof file")?;
            info!("proof written to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn verify(root: &str, address: &str, proof: PathBuf) -> Result<()> {
    let root = parse_hash(root).context("Invalid root")?;
    let address = parse_address(address)?;

    let content = fs::read_to_string(&proof).context("Failed to read proof file")?;
    let output: ProofOutput =
        serde_json::from_str(&content).context("Failed to parse proof JSON")?;
    let siblings = output
        .proof
        .iter()
        .map(|s| parse_hash(s))
        .collect::<Result<Vec<_>, _>>()
        .context("Invalid proof entry")?;

    if !verify_membership(&address, &siblings, &root) {
        bail!("Proof does not verify against root {}", encode_hash(&root));
    }

    println!("Proof verified!");
    Ok(())
}

fn calldata(kind: CalldataKind) -> Result<()> {
    let request = match kind {
        CalldataKind::Whitelist {
            allowlist,
            address,
            expected_root,
        } => {
            let expected_root = parse_root(expected_root.as_deref())?;
            let tree = build_checked_tree(&load_allowlist(&allowlist)?, expected_root.as_ref())?;
            let proof = tree.prove_membership(&parse_address(&address)?)?;
            whitelist_mint_request(&proof)
        }
        CalldataKind::Public { amount } => public_mint_request(MintAmount::new(amount)?),
    };
    print_request(&request);
    Ok(())
}

fn print_request(request: &MintRequest) {
    println!("calldata: 0x{}", hex::encode(&request.calldata));
    println!("value (wei): {}", request.value);
}
