use super::*;

#[test]
fn parses_batch_with_defaults() {
    let cli = Cli::try_parse_from(["mapharvest", "batch"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Batch(BatchArgs {
            keywords_file: None,
            max_results: None,
            start_from: 0,
            resume: None,
            output_dir: None,
        })
    ));
}

#[test]
fn parses_batch_with_cap_and_start_index() {
    let cli = Cli::try_parse_from([
        "mapharvest",
        "batch",
        "--max-results",
        "20",
        "--start-from",
        "3",
        "--output-dir",
        "/tmp/out",
    ])
    .unwrap();

    let Commands::Batch(args) = cli.command else {
        panic!("expected batch command");
    };
    assert_eq!(args.max_results, Some(20));
    assert_eq!(args.start_from, 3);
    assert_eq!(args.output_dir, Some(PathBuf::from("/tmp/out")));
}

#[test]
fn resume_conflicts_with_start_from() {
    let result = Cli::try_parse_from([
        "mapharvest",
        "batch",
        "--start-from",
        "3",
        "--resume",
        "run_1/progress.json",
    ]);
    assert!(result.is_err());
}

#[test]
fn parses_single_keyword() {
    let cli = Cli::try_parse_from(["mapharvest", "single", "bakery tirur", "--max-results", "5"])
        .unwrap();

    assert!(matches!(
        cli.command,
        Commands::Single {
            ref keyword,
            max_results: Some(5),
            output_dir: None,
        } if keyword == "bakery tirur"
    ));
}

#[test]
fn single_requires_keyword() {
    assert!(Cli::try_parse_from(["mapharvest", "single"]).is_err());
}

#[test]
fn parses_keywords_with_file() {
    let cli = Cli::try_parse_from(["mapharvest", "keywords", "--keywords-file", "kw.yaml"]).unwrap();

    assert!(matches!(
        cli.command,
        Commands::Keywords { keywords_file: Some(ref p) } if p == &PathBuf::from("kw.yaml")
    ));
}

#[test]
fn missing_subcommand_is_an_error() {
    assert!(Cli::try_parse_from(["mapharvest"]).is_err());
}
