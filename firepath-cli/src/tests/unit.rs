//! Focused unit tests covering subcommand configuration resolution.

use super::*;
use rstest::rstest;

fn remote_fields() -> (Option<String>, Option<String>) {
    (
        Some("https://store.example/b/points".to_owned()),
        Some("key".to_owned()),
    )
}

#[rstest]
#[case::missing_url(None, Some("key"), ARG_RESOURCE_URL, ENV_LIST_RESOURCE_URL)]
#[case::missing_key(
    Some("https://store.example/b/points"),
    None,
    ARG_MASTER_KEY,
    ENV_LIST_MASTER_KEY
)]
fn converting_list_without_remote_fields_errors(
    #[case] resource_url: Option<&str>,
    #[case] master_key: Option<&str>,
    #[case] field: &'static str,
    #[case] env_var: &'static str,
) {
    let args = ListArgs {
        resource_url: resource_url.map(str::to_owned),
        master_key: master_key.map(str::to_owned),
        ..ListArgs::default()
    };
    let err = CommandConfig::try_from(args).expect_err("missing field should error");
    match err {
        CliError::MissingArgument {
            field: missing,
            env,
        } => {
            assert_eq!(missing, field);
            assert_eq!(env, env_var);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn converting_remove_without_title_errors() {
    let (resource_url, master_key) = remote_fields();
    let args = RemoveArgs {
        title: None,
        resource_url,
        master_key,
        timeout_secs: None,
    };
    let err = CommandConfig::try_from(args).expect_err("missing title should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_TITLE);
            assert_eq!(env, ENV_REMOVE_TITLE);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn geofences_missing_key_names_its_own_variable() {
    let args = GeofencesArgs {
        resource_url: Some("https://store.example/b/points".to_owned()),
        ..GeofencesArgs::default()
    };
    let err = CommandConfig::try_from(args).expect_err("missing key should error");
    assert!(
        err.to_string().contains(ENV_GEOFENCES_MASTER_KEY),
        "unexpected message: {err}"
    );
}

#[rstest]
fn geofences_defaults_radius_and_timeout() {
    let (resource_url, master_key) = remote_fields();
    let args = GeofencesArgs {
        resource_url,
        master_key,
        ..GeofencesArgs::default()
    };
    let config = CommandConfig::try_from(args).expect("config should build");
    assert_eq!(
        config.action,
        Action::Geofences {
            radius_meters: DEFAULT_AVOIDANCE_RADIUS_METERS,
            exclude_index: None,
        }
    );
    assert_eq!(config.remote.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
}

#[rstest]
fn explicit_timeout_reaches_transport_config() {
    let (resource_url, master_key) = remote_fields();
    let args = ListArgs {
        resource_url,
        master_key,
        timeout_secs: Some(5),
    };
    let config = CommandConfig::try_from(args).expect("config should build");
    let transport = config.remote.transport_config();
    assert_eq!(transport.timeout, Duration::from_secs(5));
    assert_eq!(transport.master_key, "key");
}

#[rstest]
fn remote_config_debug_redacts_master_key() {
    let remote = RemoteConfig::resolve(
        Some("https://store.example/b/points".to_owned()),
        Some("very-secret".to_owned()),
        None,
        (ENV_LIST_RESOURCE_URL, ENV_LIST_MASTER_KEY),
    )
    .expect("config should build");
    let rendered = format!("{remote:?}");
    assert!(!rendered.contains("very-secret"));
    assert!(rendered.contains("store.example"));
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "timeout_secs": "soon" }));

    let err = remove_config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "resource_url": "https://from-file.example/b/points",
            "master_key": "file-key",
            "timeout_secs": 10,
        }),
        None,
    );
    composer.push_environment(json!({
        "master_key": "env-key",
    }));
    composer.push_cli(json!({
        "title": "Fire",
    }));

    let config = remove_config_from_layers_for_test(composer.layers())
        .expect("merged config should build");
    assert_eq!(
        config.action,
        Action::Remove {
            title: "Fire".to_owned()
        }
    );
    assert_eq!(config.remote.resource_url, "https://from-file.example/b/points");
    assert_eq!(config.remote.master_key, "env-key");
    assert_eq!(config.remote.timeout, Duration::from_secs(10));
}
