use anyhow::Result;

/// Prints the JSON schema of `config.toml`, for editor completion and validation.
fn main() -> Result<()> {
    let schema = gesturepad::Config::json_schema();
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
