use anyhow::Result;
use std::env;
use std::fs;

use platform_sankey::{diagram_from_config, SankeyConfig};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    println!("🪢 Platform Evolution Sankey - Layout Pipeline");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // 1. Load configuration
    let config = match args.get(1) {
        Some(path) => {
            println!("\n📂 Loading configuration from {}...", path);
            SankeyConfig::from_json_file(path)?
        }
        None => {
            println!("\n📂 No configuration given, using built-in sample dataset");
            SankeyConfig::sample()
        }
    };
    println!(
        "✓ {} platforms, {} transitions",
        config.platforms.len(),
        config.transitions.len()
    );

    // 2. Close open platforms and compute the layout
    let current = config.current_month();
    println!("\n🔒 Closing open platforms at {}...", current);

    let diagram = diagram_from_config(&config)?;
    println!(
        "✓ Laid out {} nodes and {} links",
        diagram.labels.len(),
        diagram.link_values.len()
    );

    // 3. Hand off to the renderer
    let out_path = args.get(2).map(String::as_str).unwrap_or("diagram.json");
    fs::write(out_path, serde_json::to_string_pretty(&diagram)?)?;

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("💾 Renderer input written to {}", out_path);

    Ok(())
}
