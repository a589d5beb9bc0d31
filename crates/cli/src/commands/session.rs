//! Session token commands.

use secrecy::SecretString;

/// Store a bearer token for subsequent authenticated requests.
///
/// # Errors
///
/// Returns an error if the token file cannot be written.
pub async fn set(token: String) -> Result<(), Box<dyn std::error::Error>> {
    let data = super::data_layer().await?;

    data.session().store(&SecretString::from(token)).await?;
    tracing::info!("session token stored");
    Ok(())
}

/// Remove the stored bearer token.
///
/// # Errors
///
/// Returns an error if the token file cannot be removed.
pub async fn clear() -> Result<(), Box<dyn std::error::Error>> {
    let data = super::data_layer().await?;

    data.session().clear().await?;
    tracing::info!("session token cleared");
    Ok(())
}
