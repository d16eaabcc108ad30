//! Reading the allowlist from configuration files.
//!
//! Two layouts are accepted: a JSON array of address strings, or plain text
//! with one address per line (blank lines and `#` comments are skipped).

use std::fs;
use std::path::Path;

use tracing::info;

use crate::address::parse_address;
use crate::error::{AllowlistError, AllowlistResult};
use crate::types::Address;

/// Parse allowlist text in either supported layout
pub fn parse_allowlist(text: &str) -> AllowlistResult<Vec<Address>> {
    let addresses = if text.trim_start().starts_with('[') {
        parse_json(text)?
    } else {
        parse_lines(text)?
    };

    if addresses.is_empty() {
        return Err(AllowlistError::Configuration(
            "allowlist is empty".to_string(),
        ));
    }

    Ok(addresses)
}

/// Read and parse an allowlist file
pub fn load_allowlist(path: &Path) -> AllowlistResult<Vec<Address>> {
    let text = fs::read_to_string(path).map_err(|e| {
        AllowlistError::Configuration(format!("failed to read {}: {}", path.display(), e))
    })?;
    let addresses = parse_allowlist(&text)?;
    info!(path = %path.display(), count = addresses.len(), "loaded allowlist");
    Ok(addresses)
}

fn parse_json(text: &str) -> AllowlistResult<Vec<Address>> {
    let entries: Vec<String> = serde_json::from_str(text).map_err(|e| {
        AllowlistError::Configuration(format!("allowlist is not a JSON string array: {}", e))
    })?;

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            parse_address(entry).map_err(|e| {
                AllowlistError::Configuration(format!("entry {}: {}", i, e))
            })
        })
        .collect()
}

fn parse_lines(text: &str) -> AllowlistResult<Vec<Address>> {
    text.lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                None
            } else {
                Some((i, trimmed))
            }
        })
        .map(|(i, trimmed)| {
            parse_address(trimmed).map_err(|e| {
                AllowlistError::Configuration(format!("line {}: {}", i + 1, e))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: &str = "0x5B38Da6a701c568545dCfcB03FcB875f56beddC4";
    const B: &str = "0xAb8483F64d9C6d1EcF9b849Ae677dD3315835cb2";

    #[test]
    fn test_parse_json_array() {
        let text = format!(r#"["{}", "{}"]"#, A, B);
        let list = parse_allowlist(&text).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0], parse_address(A).unwrap());
        assert_eq!(list[1], parse_address(B).unwrap());
    }

    #[test]
    fn test_parse_lines_with_comments() {
        let text = format!("# presale\n{}\n\n  {}  \n", A, B);
        let list = parse_allowlist(&text).unwrap();
        assert_eq!(list, vec![parse_address(A).unwrap(), parse_address(B).unwrap()]);
    }

    #[test]
    fn test_parse_keeps_order_and_duplicates() {
        let text = format!("{}\n{}\n{}\n", B, A, B);
        let list = parse_allowlist(&text).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[0], list[2]);
    }

    #[test]
    fn test_empty_allowlist_rejected() {
        assert!(matches!(
            parse_allowlist("# nothing here\n"),
            Err(AllowlistError::Configuration(_))
        ));
        assert!(matches!(
            parse_allowlist("[]"),
            Err(AllowlistError::Configuration(_))
        ));
    }

    #[test]
    fn test_malformed_line_names_position() {
        let text = format!("{}\n0x1234\n", A);
        match parse_allowlist(&text) {
            Err(AllowlistError::Configuration(message)) => assert!(message.contains("line 2")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            parse_allowlist("[1, 2]"),
            Err(AllowlistError::Configuration(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_allowlist(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, AllowlistError::Configuration(_)));
    }
}
