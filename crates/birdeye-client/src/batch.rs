//! Multi-key requests split into fixed-size chunks

use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::client::Client;
use crate::error::{Error, Result};

/// Most keys Birdeye accepts in one multi-key request
pub const MAX_BATCH_SIZE: usize = 100;

/// Split `keys` into comma-joined groups of at most `size` keys
pub(crate) fn chunk_keys<S: AsRef<str>>(keys: &[S], size: usize) -> Vec<String> {
    keys.chunks(size.max(1))
        .map(|chunk| {
            chunk
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .join(",")
        })
        .collect()
}

impl Client {
    /// Fetch a keyed map for any number of keys.
    ///
    /// Keys are sent as `list_param=k1,k2,...` in chunks of
    /// [`MAX_BATCH_SIZE`], one request at a time. Chunk results are merged in
    /// order, later chunks overwriting earlier ones. A chunk whose `data` is
    /// null adds nothing. The first failing chunk fails the whole call.
    pub async fn get_multiple<V, S>(
        &self,
        cancel: &CancellationToken,
        path: &str,
        list_param: &str,
        keys: &[S],
    ) -> Result<HashMap<String, V>>
    where
        V: DeserializeOwned,
        S: AsRef<str>,
    {
        if keys.is_empty() {
            return Ok(HashMap::new());
        }

        if keys.iter().any(|k| k.as_ref().is_empty()) {
            return Err(Error::validation(format!(
                "{path}: key list contains empty string"
            )));
        }

        let chunks = chunk_keys(keys, MAX_BATCH_SIZE);
        let mut result = HashMap::with_capacity(keys.len());

        for (i, chunk) in chunks.iter().enumerate() {
            debug!("Requesting chunk {}/{} from {}", i + 1, chunks.len(), path);
            let part: Option<HashMap<String, V>> = self
                .get_json(cancel, path, &[(list_param, chunk.as_str())])
                .await?;
            result.extend(part.unwrap_or_default());
        }

        self.logger().debug(
            "fetched batch",
            &[
                ("path", &path),
                ("requested", &keys.len()),
                ("received", &result.len()),
                ("chunks", &chunks.len()),
            ],
        );

        Ok(result)
    }
}
