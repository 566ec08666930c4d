//! Input text and artifact commands

use anyhow::{Context, Result};
use colored::*;
use cortext_client::CortextClient;
use std::path::{Path, PathBuf};

/// Send text (inline or from a file) to the server
pub async fn write(client: &CortextClient, text: Option<String>, file: Option<PathBuf>) -> Result<()> {
    let text = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read text file: {}", path.display()))?,
        (None, None) => anyhow::bail!("either TEXT or --file is required"),
    };

    let response = client.write_text(text.as_str()).await?;

    println!("{} {}", "✓".green().bold(), response.message);
    println!("  Bytes: {}", text.len().to_string().dimmed());
    Ok(())
}

/// Save the HTML artifact to `output`
pub async fn download(client: &CortextClient, output: &Path) -> Result<()> {
    let bytes = match client.download_html().await {
        Ok(bytes) => bytes,
        Err(e) if e.is_not_found() => {
            println!("{}", "No HTML artifact has been generated yet.".yellow());
            anyhow::bail!("HTML file not found");
        }
        Err(e) => return Err(e.into()),
    };

    std::fs::write(output, &bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "{} Saved {} bytes to {}",
        "✓".green().bold(),
        bytes.len(),
        output.display().to_string().cyan()
    );
    Ok(())
}
