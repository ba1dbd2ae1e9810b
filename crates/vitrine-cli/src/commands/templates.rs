use anyhow::Result;

use vitrine_core::template;

pub fn run(json: bool) -> Result<()> {
    let catalogue = template::catalogue();

    if json {
        println!("{}", serde_json::to_string_pretty(catalogue)?);
        return Ok(());
    }

    println!("Templates ({}):\n", catalogue.len());
    for info in catalogue {
        println!("  {:<14} {}", info.name, info.title);
        println!("    {}", info.tagline);
        println!();
    }
    println!("Preview one with:");
    println!("  vitrine preview --template <name>");

    Ok(())
}
