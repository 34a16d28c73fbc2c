use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use ndc::catalog::Features;
use ndc::cli::{Args, Command, CreateArgs};
use ndc::error::Error;
use tempfile::TempDir;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("ndc")];
    res.extend(args.iter().map(OsString::from));
    res
}

fn parse_create(args: &[&str]) -> CreateArgs {
    match Args::try_parse_from(make_args(args)).unwrap().command {
        Command::Create(create) => create,
        other => panic!("expected create, got {other:?}"),
    }
}

#[test]
fn test_list_command() {
    let parsed = Args::try_parse_from(make_args(&["list"])).unwrap();
    assert!(matches!(parsed.command, Command::List));
    assert!(!parsed.verbose);

    let parsed = Args::try_parse_from(make_args(&["list", "--verbose"])).unwrap();
    assert!(parsed.verbose);
}

#[test]
fn test_basic_create() {
    let create = parse_create(&["create", "dotnet-webapp-aws", "--name", "my-api"]);
    assert_eq!(create.template, "dotnet-webapp-aws");
    assert_eq!(create.name.as_deref(), Some("my-api"));
    assert_eq!(create.output, None);
    assert_eq!(create.port, None);
    assert!(!create.cache);
}

#[test]
fn test_all_flags() {
    let create = parse_create(&[
        "create",
        "aspire-webapp-gcp",
        "-n",
        "shop",
        "-o",
        "./out",
        "-f",
        "net8.0",
        "-p",
        "5000",
        "--min-instances",
        "0",
        "--max-instances",
        "3",
        "--cpu",
        "2000m",
        "--memory",
        "4Gi",
        "--database",
        "MySQL",
        "--cache",
        "--storage",
        "--mail",
        "--queue",
        "--jobs",
        "--worker",
        "--services",
        "cache,queue",
        "--template-dir",
        "./templates",
    ]);

    assert_eq!(create.output, Some(PathBuf::from("./out")));
    assert_eq!(create.framework.as_deref(), Some("net8.0"));
    assert_eq!(create.port, Some(5000));
    assert_eq!(create.min_instances, Some(0));
    assert_eq!(create.max_instances, Some(3));
    assert_eq!(create.cpu.as_deref(), Some("2000m"));
    assert_eq!(create.memory.as_deref(), Some("4Gi"));
    assert_eq!(create.database.as_deref(), Some("MySQL"));
    assert!(create.cache && create.storage && create.mail);
    assert!(create.queue && create.jobs && create.worker);
    assert_eq!(create.services.as_deref(), Some("cache,queue"));
    assert_eq!(create.template_dir, Some(PathBuf::from("./templates")));
}

#[test]
fn test_negative_values_reach_validation() {
    let create = parse_create(&["create", "dotnet-webapp-aws", "-n", "x", "-p", "-1"]);
    assert_eq!(create.port, Some(-1));
    let options = create.to_options().unwrap();
    assert!(matches!(options.validate(), Err(Error::ValidationError(_))));
}

#[test]
fn test_missing_template() {
    assert!(Args::try_parse_from(make_args(&["create"])).is_err());
    assert!(Args::try_parse_from(make_args(&[])).is_err());
}

#[test]
fn test_to_options_defaults() {
    let options = parse_create(&["create", "dotnet-webapp-azure", "-n", "inv"])
        .to_options()
        .unwrap();
    assert_eq!(options.name, "inv");
    assert_eq!(options.template, "dotnet-webapp-azure");
    assert_eq!(options.output_dir, PathBuf::from("."));
    assert_eq!(options.port, 8080);
    assert_eq!(options.features, Features::NONE);
}

#[test]
fn test_to_options_merges_feature_sources() {
    let options = parse_create(&[
        "create",
        "dotnet-webapp-aws",
        "-n",
        "inv",
        "--mail",
        "--services",
        "database,queue",
    ])
    .to_options()
    .unwrap();

    assert_eq!(options.features.enabled(), vec!["mail", "queue"]);
}

#[test]
fn test_to_options_rejects_unknown_service() {
    let create = parse_create(&["create", "dotnet-webapp-aws", "--services", "kafka"]);
    assert!(matches!(create.to_options(), Err(Error::ValidationError(_))));
}

#[test]
fn test_flags_override_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("ndc.json");
    std::fs::write(
        &path,
        r#"{"name": "from-file", "port": 9000, "max_instances": 8, "features": {"jobs": true}}"#,
    )
    .unwrap();

    let options = parse_create(&[
        "create",
        "dotnet-webapp-gcp",
        "--config",
        path.to_str().unwrap(),
        "--port",
        "7000",
        "--cache",
    ])
    .to_options()
    .unwrap();

    assert_eq!(options.name, "from-file");
    assert_eq!(options.template, "dotnet-webapp-gcp");
    assert_eq!(options.port, 7000);
    assert_eq!(options.max_instances, 8);
    assert!(options.features.jobs);
    assert!(options.features.cache);
}
