use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use allowlist_lib::{encode_hash, AllowlistTree, Address, H256};
use anyhow::{bail, Context, Result};
use tracing::info;

/// Build the tree and, when the deployed root is known, refuse to continue
/// if the local allowlist disagrees with it.
pub fn build_checked_tree(
    addresses: &[Address],
    expected_root: Option<&H256>,
) -> Result<AllowlistTree> {
    let tree = AllowlistTree::new(addresses).context("Failed to build allowlist tree")?;
    let root = tree.root();

    if let Some(expected) = expected_root {
        if root != *expected {
            bail!(
                "Allowlist root {} does not match deployed root {}",
                encode_hash(&root),
                encode_hash(expected)
            );
        }
    }

    info!(root = %encode_hash(&root), leaves = tree.len(), "allowlist tree ready");
    Ok(tree)
}

/// Write through a temp file and rename, so readers never see a partial file
pub fn write_file_atomic(path: &Path, contents: &str) -> Result<()> {
    let temp_path = path.with_extension("tmp");
    let mut file = File::create(&temp_path).context("Failed to create temp file")?;
    file.write_all(contents.as_bytes())
        .context("Failed to write to temp file")?;
    file.flush().context("Failed to flush temp file")?;
    fs::rename(&temp_path, path).context("Failed to move temp file to output")?;
    Ok(())
}
