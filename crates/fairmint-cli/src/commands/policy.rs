//! Policy command implementation.

use std::path::PathBuf;

use super::load_policy;

pub fn run(path: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let policy = load_policy(path.as_deref())?;
    println!("{}", serde_json::to_string_pretty(&policy)?);
    Ok(())
}
