use std::{io::ErrorKind, path::PathBuf};

use crate::{Error, Res, types::AccessToken};

/// Plaintext handoff file between the receiver and the pipeline.
///
/// The file holds the raw token string only and is overwritten on every
/// successful authorization. It is not locked.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TokenStore { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub async fn load(&self) -> Res<AccessToken> {
        let content = match async_fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::TokenNotFound(self.path.clone()));
            }
            Err(e) => {
                return Err(Error::Persistence {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        AccessToken::new(&content).ok_or_else(|| Error::TokenEmpty(self.path.clone()))
    }

    pub async fn persist(&self, token: &AccessToken) -> Res<()> {
        let to_err = |source| Error::Persistence {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            async_fs::create_dir_all(parent).await.map_err(to_err)?;
        }

        async_fs::write(&self.path, token.as_str())
            .await
            .map_err(to_err)
    }
}
