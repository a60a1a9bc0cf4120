use clap::ArgMatches;

use super::load_config;

pub fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let config = load_config(matches)?;

    println!("✓ Configuration is valid");
    if config.provider.has_credential() {
        println!("→ AI provider: {} (key present)", config.provider.kind);
    } else {
        println!("→ AI provider: none (keyword heuristic only)");
    }
    println!();
    print!("{}", config.to_toml()?);
    Ok(())
}
