use clap::{Arg, ArgAction, Command};

mod commands;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn config_arg() -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .value_name("FILE")
        .help("TOML configuration file (defaults to ./senti.toml when present)")
}

fn cli() -> Command {
    Command::new("senti")
        .version(VERSION)
        .about("Senti - sentiment classification with LLM delegation and keyword fallback")
        .subcommand(
            Command::new("serve")
                .about("Start the HTTP service")
                .arg(config_arg())
                .arg(
                    Arg::new("port")
                        .short('p')
                        .long("port")
                        .value_name("PORT")
                        .value_parser(clap::value_parser!(u16))
                        .help("Port to bind the server to (overrides PORT)"),
                )
                .arg(
                    Arg::new("host")
                        .short('H')
                        .long("host")
                        .value_name("HOST")
                        .help("Host address to bind to (overrides HOST)"),
                ),
        )
        .subcommand(
            Command::new("analyze")
                .about("Classify texts from the command line and print JSON")
                .arg(config_arg())
                .arg(
                    Arg::new("heuristic-only")
                        .long("heuristic-only")
                        .action(ArgAction::SetTrue)
                        .help("Skip the AI provider even when a key is configured"),
                )
                .arg(
                    Arg::new("texts")
                        .value_name("TEXT")
                        .num_args(1..)
                        .required(true)
                        .help("Text to classify; several texts are classified as a batch"),
                ),
        )
        .subcommand(
            Command::new("check-config")
                .about("Validate and print the effective configuration")
                .arg(config_arg()),
        )
}

#[tokio::main]
async fn main() {
    let matches = cli().get_matches();

    let result = match matches.subcommand() {
        Some(("serve", sub_matches)) => commands::serve::run(sub_matches).await,
        Some(("analyze", sub_matches)) => commands::analyze::run(sub_matches).await,
        Some(("check-config", sub_matches)) => commands::check_config::run(sub_matches),
        _ => {
            println!("Senti v{}", VERSION);
            println!("Use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("✗ {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        cli().debug_assert();
    }

    #[test]
    fn test_analyze_collects_texts() {
        let matches = cli()
            .try_get_matches_from(["senti", "analyze", "--heuristic-only", "good", "bad"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "analyze");
        assert!(sub.get_flag("heuristic-only"));
        let texts: Vec<&String> = sub.get_many::<String>("texts").unwrap().collect();
        assert_eq!(texts, ["good", "bad"]);
    }

    #[test]
    fn test_serve_rejects_invalid_port() {
        assert!(cli()
            .try_get_matches_from(["senti", "serve", "--port", "99999"])
            .is_err());
    }

    #[test]
    fn test_load_config_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("senti.toml");
        std::fs::write(
            &path,
            "[classifier]\nmax_batch_size = 10\nheuristic_confidence = \"ratio\"\n",
        )
        .unwrap();

        let matches = cli()
            .try_get_matches_from(["senti", "check-config", "--config", path.to_str().unwrap()])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        let config = commands::load_config(sub).unwrap();
        assert_eq!(config.classifier.max_batch_size, 10);
    }

    #[test]
    fn test_load_config_reports_missing_file() {
        let matches = cli()
            .try_get_matches_from(["senti", "check-config", "-c", "/nonexistent/senti.toml"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        let err = commands::load_config(sub).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/senti.toml"));
    }
}
