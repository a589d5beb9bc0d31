//! CLI command implementations.

pub mod badges;
pub mod product;
pub mod session;
pub mod vote;

use shelfscan_client::config::ClientConfig;
use shelfscan_client::state::DataLayer;

/// Build a data layer from the environment.
///
/// The notification receiver is dropped: CLI failures surface as command
/// errors on stderr, not as toasts.
pub(crate) async fn data_layer() -> Result<DataLayer, Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    let (data, _notifications) = DataLayer::new(config).await?;
    Ok(data)
}
