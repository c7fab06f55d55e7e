//! Process-wide client instance.
//!
//! The shared client is built at most once, either from the environment on
//! first use or from an explicitly installed client, and never changes
//! afterwards.

use once_cell::sync::OnceCell;
use tracing::info;

use crate::client::ApiClient;
use crate::error::ApiError;

static SHARED: OnceCell<ApiClient> = OnceCell::new();

/// The shared client, initialised from `API_URL` on first access.
///
/// A failed initialisation is not cached; the next call tries again.
pub fn shared() -> Result<&'static ApiClient, ApiError> {
    SHARED.get_or_try_init(|| {
        let client = ApiClient::from_env()?;
        info!(base_url = client.config().base_url(), "initialised shared API client");
        Ok(client)
    })
}

/// Install `client` as the shared instance.
///
/// Returns the client back if the shared instance already exists.
pub fn install_shared(client: ApiClient) -> Result<&'static ApiClient, ApiClient> {
    SHARED.try_insert(client).map_err(|(_, rejected)| rejected)
}
