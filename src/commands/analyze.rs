use clap::ArgMatches;
use senti_runtime::SentimentClassifier;

use super::{init_tracing, load_config};

pub async fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let config = load_config(matches)?;
    init_tracing(&config.logging);

    let classifier = if matches.get_flag("heuristic-only") {
        SentimentClassifier::new(&config.classifier, None)
    } else {
        senti_runtime::classifier_from_config(&config)?
    };

    let texts: Vec<String> = matches
        .get_many::<String>("texts")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    let output = if let [text] = texts.as_slice() {
        serde_json::to_string_pretty(&classifier.classify(text).await)?
    } else {
        serde_json::to_string_pretty(&classifier.classify_batch(&texts).await?)?
    };

    println!("{}", output);
    Ok(())
}
