//! Validate every content file

use anyhow::Result;

use crate::Folio;

/// Report every malformed file and permalink collision
pub fn run(folio: &Folio) -> Result<()> {
    let store = folio.store()?;
    tracing::info!("Checking content in {:?}", store.root());

    let errors = store.validate();
    for error in &errors {
        tracing::warn!("{}", error);
        println!("  {}", error);
    }

    if !errors.is_empty() {
        anyhow::bail!("{} problem(s) found in {:?}", errors.len(), store.root());
    }

    println!("All content is valid.");
    Ok(())
}
