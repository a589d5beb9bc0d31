//! Product lookup and search commands.

#![allow(clippy::print_stdout)] // command output goes to stdout by design of the CLI

use shelfscan_core::Ean;

/// Fetch one product and print it as JSON.
///
/// # Errors
///
/// Returns an error on an invalid barcode or a failed fetch.
pub async fn lookup(ean: &str, external: bool) -> Result<(), Box<dyn std::error::Error>> {
    let ean: Ean = ean.parse()?;
    let data = super::data_layer().await?;

    if external {
        let record = data.catalog().external_product(&ean).await?;
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        let product = data.catalog().product(&ean).await?;
        println!("{}", serde_json::to_string_pretty(&product)?);
    }

    Ok(())
}

/// Search a catalog and print the raw result list.
///
/// # Errors
///
/// Returns an error if the search fails.
pub async fn search(query: &str, external: bool) -> Result<(), Box<dyn std::error::Error>> {
    let data = super::data_layer().await?;

    let results = if external {
        data.catalog().external_search(query).await?
    } else {
        data.catalog().search(query).await?
    };

    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}
