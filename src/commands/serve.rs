use anyhow::Context;
use clap::ArgMatches;
use senti_runtime::api::HttpApiServer;

use super::{init_tracing, load_config};

pub async fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let mut config = load_config(matches)?;

    if let Some(port) = matches.get_one::<u16>("port") {
        config.server.port = *port;
    }
    if let Some(host) = matches.get_one::<String>("host") {
        config.server.host = host.clone();
    }
    config.validate().context("invalid configuration")?;

    init_tracing(&config.logging);

    let classifier = senti_runtime::classifier_from_config(&config)?;

    println!("✓ Starting Senti on {}:{}", config.server.host, config.server.port);
    match classifier.provider() {
        Some(provider) => println!(
            "→ AI classification: {} ({})",
            provider.provider_name(),
            provider.model()
        ),
        None => println!("→ AI classification disabled, using keyword heuristic"),
    }
    println!("→ Batch limit: {} texts", config.classifier.max_batch_size);
    println!("\nPress Ctrl+C to stop the server");

    tracing::info!(
        "Starting server: host={} port={} provider={} max_batch_size={} batch_concurrency={}",
        config.server.host,
        config.server.port,
        classifier.provider().map_or("none", |p| p.provider_name()),
        config.classifier.max_batch_size,
        config.classifier.batch_concurrency
    );

    HttpApiServer::new(config.server.clone(), classifier)
        .start()
        .await?;

    Ok(())
}
