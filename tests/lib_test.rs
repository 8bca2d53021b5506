//! Library integration tests.

use rompr_remote::RemoteError;

#[test]
fn error_types_are_public() {
    let err = RemoteError::UnknownTool {
        name: "shuffle".into(),
    };
    assert!(err.to_string().contains("shuffle"));
    assert!(!err.is_gateway());
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> rompr_remote::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use rompr_remote::cli::{Cli, Commands};

    let cli = Cli::parse_from(["rompr-remote", "play-random", "Jazz", "--count", "3"]);

    if let Commands::PlayRandom(args) = cli.command {
        assert_eq!(args.path.as_deref(), Some("Jazz"));
        assert_eq!(args.count, 3);
    } else {
        panic!("Expected PlayRandom command");
    }
}

#[test]
fn settings_resolve_from_vars() {
    use rompr_remote::config::Settings;
    use std::collections::HashMap;

    let vars = HashMap::from([
        ("ROMPR_API_URL".to_string(), "http://nas.local/rompr/api/".to_string()),
        ("ROMPR_SKIP_SUBSTRING".to_string(), String::new()),
        ("ROMPR_MAX_DEPTH".to_string(), "8".to_string()),
    ]);

    let settings = Settings::default().with_vars(&vars).unwrap();

    assert_eq!(settings.base_url, "http://nas.local/rompr/api");
    assert_eq!(settings.excluded_substring, None);
    assert_eq!(settings.max_depth, 8);
}

#[tokio::test]
async fn toolbox_round_trip_through_mock_gateway() {
    use rompr_remote::config::Settings;
    use rompr_remote::gateway::MockGateway;
    use rompr_remote::library::{Directory, File};
    use rompr_remote::tools::{ToolCall, Toolbox};
    use serde_json::json;
    use std::sync::Arc;

    let gateway = Arc::new(MockGateway::new().with_directory(
        "Jazz",
        Directory {
            files: vec![File::new("Jazz/So%20What.mp3", "So What", "9:22")],
            folders: vec![],
        },
    ));
    let toolbox = Toolbox::from_settings(gateway.clone(), &Settings::default());

    let call = ToolCall::parse("playRandomTracks", json!({"path": "Jazz", "count": 1})).unwrap();
    toolbox.call(call).await.unwrap();

    assert_eq!(
        gateway.command_batches()[0][1],
        vec!["add".to_string(), "Jazz/So What.mp3".to_string()]
    );
}
