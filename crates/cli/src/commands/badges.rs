//! Badge commands.

#![allow(clippy::print_stdout)] // command output goes to stdout by design of the CLI

/// Print all earned badges, one per line.
///
/// # Errors
///
/// Returns an error if the badge store cannot be loaded.
pub async fn list() -> Result<(), Box<dyn std::error::Error>> {
    let data = super::data_layer().await?;

    for badge in data.badges().badges().await {
        println!("{badge}");
    }
    Ok(())
}

/// Record a badge as earned.
///
/// # Errors
///
/// Returns an error if the badge store cannot be loaded or persisted.
pub async fn add(id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let data = super::data_layer().await?;

    if data.badges().add(id).await? {
        tracing::info!(badge = id, "badge added");
    } else {
        tracing::info!(badge = id, "badge already earned");
    }
    Ok(())
}
