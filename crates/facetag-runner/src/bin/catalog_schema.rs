//! Print the JSON schema of a content catalog document.

fn main() -> anyhow::Result<()> {
    let schema = facetag_models::catalog_schema();
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
