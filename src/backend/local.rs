//! Local stand-in for the remote save endpoints
//!
//! Sign-in is simulated with a fixed delay. Products are appended as JSON
//! lines to `products.jsonl` in the data directory.

use crate::submit::{Payload, SaveCollaborator, Submission};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;

const PRODUCTS_FILE: &str = "products.jsonl";

/// Default simulated sign-in round trip
pub const DEFAULT_SIGN_IN_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone)]
pub struct LocalBackend {
    data_dir: PathBuf,
    sign_in_delay: Duration,
}

impl LocalBackend {
    pub fn new(data_dir: impl Into<PathBuf>, sign_in_delay: Duration) -> Self {
        Self {
            data_dir: data_dir.into(),
            sign_in_delay,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn products_path(&self) -> PathBuf {
        self.data_dir.join(PRODUCTS_FILE)
    }

    async fn append_product(&self, submission: &Submission) -> Result<()> {
        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .with_context(|| format!("Failed to create {}", self.data_dir.display()))?;

        let mut line = serde_json::to_string(submission)?;
        line.push('\n');

        let path = self.products_path();
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .with_context(|| format!("Failed to open {}", path.display()))?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        tracing::info!(path = %path.display(), key = %submission.idempotency_key, "product saved");
        Ok(())
    }
}

#[async_trait]
impl SaveCollaborator for LocalBackend {
    async fn save(&self, submission: &Submission) -> Result<()> {
        match &submission.payload {
            Payload::SignIn(credentials) => {
                tokio::time::sleep(self.sign_in_delay).await;
                tracing::info!(
                    account = %credentials.account,
                    remember = credentials.remember,
                    "signed in"
                );
                Ok(())
            }
            Payload::Product(_) => self.append_product(submission).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ImageRef;
    use crate::submit::{Credentials, ProductPayload};
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn temp_backend() -> LocalBackend {
        let dir = std::env::temp_dir().join(format!("shopform-test-{}", Uuid::new_v4()));
        LocalBackend::new(dir, Duration::from_millis(1))
    }

    fn product(name: &str) -> Submission {
        Submission::new(Payload::Product(ProductPayload {
            product_name: name.into(),
            sku: "SKU-1".into(),
            category: "Quần".into(),
            description: "Denim".into(),
            images: vec![ImageRef::new("https://img/1")],
            tags: vec!["Giảm giá".into()],
            price: 120_000.0,
            stock_quantity: 4,
        }))
    }

    #[tokio::test]
    async fn test_products_are_appended_as_lines() {
        let backend = temp_backend();
        let first = product("Jeans");
        backend.save(&first).await.unwrap();
        backend.save(&product("Shorts")).await.unwrap();

        let content = tokio::fs::read_to_string(backend.products_path())
            .await
            .unwrap();
        let saved: Vec<Submission> = content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0], first);

        tokio::fs::remove_dir_all(backend.data_dir()).await.unwrap();
    }

    #[tokio::test]
    async fn test_sign_in_writes_nothing() {
        let backend = temp_backend();
        let submission = Submission::new(Payload::SignIn(Credentials {
            account: "me@example.com".into(),
            password: "longenough".into(),
            remember: false,
        }));
        backend.save(&submission).await.unwrap();
        assert!(!backend.products_path().exists());
    }

    #[tokio::test]
    async fn test_unwritable_dir_is_an_error() {
        let file = std::env::temp_dir().join(format!("shopform-file-{}", Uuid::new_v4()));
        tokio::fs::write(&file, b"not a dir").await.unwrap();
        let backend = LocalBackend::new(&file, Duration::ZERO);
        assert!(backend.save(&product("Cap")).await.is_err());
        tokio::fs::remove_file(&file).await.unwrap();
    }
}
