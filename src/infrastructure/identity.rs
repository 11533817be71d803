//! Payer loading from a local key file (JSON array of secret-key bytes)

use solana_sdk::signature::Keypair;
use std::{fs, path::Path};

use crate::shared::errors::ConfigError;

/// Load the payer keypair. Every failure is a configuration error.
pub fn load_payer<P: AsRef<Path>>(path: P) -> Result<Keypair, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::KeypairNotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|e| ConfigError::KeypairUnreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let bytes: Vec<u8> =
        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidKeypair {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    Keypair::from_bytes(&bytes).map_err(|e| ConfigError::InvalidKeypair {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::signature::Signer;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn key_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_payer() {
        let keypair = Keypair::new();
        let json = serde_json::to_string(&keypair.to_bytes().to_vec()).unwrap();
        let file = key_file(&json);

        let loaded = load_payer(file.path()).unwrap();
        assert_eq!(loaded.pubkey(), keypair.pubkey());
    }

    #[test]
    fn test_missing_file() {
        let err = load_payer("/definitely/not/here/id.json").unwrap_err();
        assert!(matches!(err, ConfigError::KeypairNotFound(_)));
    }

    #[test]
    fn test_not_json() {
        let file = key_file("not a key file");
        let err = load_payer(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidKeypair { .. }));
    }

    #[test]
    fn test_wrong_length() {
        let file = key_file("[1, 2, 3]");
        let err = load_payer(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidKeypair { .. }));
    }
}
