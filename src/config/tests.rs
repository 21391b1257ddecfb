use clap::Parser;
use serial_test::serial;

use super::*;

fn raw_with_secrets() -> RawSettings {
    let mut raw = RawSettings::default();
    raw.auth.secret_key = Some("test-secret-key".to_string());
    raw.auth.admin_secret = Some("test-admin".to_string());
    raw
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = raw_with_secrets();
    raw.server.port = Some(4000);
    raw.logging.level = Some("info".to_string());

    let overrides = ServeOverrides {
        server_port: Some(4321),
        log_level: Some("debug".to_string()),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.server.addr.port(), 4321);
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = raw_with_secrets();
    let overrides = ServeOverrides {
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn missing_secret_key_is_rejected() {
    let mut raw = RawSettings::default();
    raw.auth.admin_secret = Some("test-admin".to_string());

    let error = Settings::from_raw(raw).expect_err("secret key is required");
    assert!(matches!(
        error,
        LoadError::Invalid {
            key: "auth.secret_key",
            ..
        }
    ));
}

#[test]
fn empty_admin_secret_is_rejected() {
    let mut raw = RawSettings::default();
    raw.auth.secret_key = Some("test-secret-key".to_string());
    raw.auth.admin_secret = Some(String::new());

    let error = Settings::from_raw(raw).expect_err("admin secret is required");
    assert!(matches!(
        error,
        LoadError::Invalid {
            key: "auth.admin_secret",
            ..
        }
    ));
}

#[test]
fn defaults_fill_server_and_database() {
    let settings = Settings::from_raw(raw_with_secrets()).expect("valid settings");

    assert_eq!(settings.server.addr.port(), DEFAULT_PORT);
    assert_eq!(settings.database.url, DEFAULT_DATABASE_URL);
    assert_eq!(
        settings.database.max_connections.get(),
        DEFAULT_DB_MAX_CONNECTIONS
    );
    assert_eq!(
        settings.auth.session_ttl_seconds.get(),
        DEFAULT_SESSION_TTL_SECONDS as i64
    );
}

#[test]
fn oversized_session_ttl_is_rejected() {
    let mut raw = raw_with_secrets();
    raw.auth.session_ttl_seconds = Some(u64::MAX);

    let error = Settings::from_raw(raw).expect_err("ttl exceeds a signed second count");
    assert!(matches!(
        error,
        LoadError::Invalid {
            key: "auth.session_ttl_seconds",
            ..
        }
    ));
}

#[test]
fn zero_session_ttl_is_rejected() {
    let mut raw = raw_with_secrets();
    raw.auth.session_ttl_seconds = Some(0);

    let error = Settings::from_raw(raw).expect_err("ttl must be positive");
    assert!(matches!(
        error,
        LoadError::Invalid {
            key: "auth.session_ttl_seconds",
            ..
        }
    ));
}

#[test]
#[serial]
fn legacy_environment_variables_are_honored() {
    // SAFETY: serialized; no other thread reads the environment here.
    unsafe {
        std::env::set_var("SECRET_KEY", "legacy-secret");
        std::env::set_var("ADMIN", "legacy-admin");
        std::env::set_var("PORT", "8123");
        std::env::set_var("IP", "0.0.0.0");
    }

    let mut raw = RawSettings::default();
    raw.apply_env_fallbacks();

    unsafe {
        std::env::remove_var("SECRET_KEY");
        std::env::remove_var("ADMIN");
        std::env::remove_var("PORT");
        std::env::remove_var("IP");
    }

    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.auth.secret_key, "legacy-secret");
    assert_eq!(settings.auth.admin_secret, "legacy-admin");
    assert_eq!(settings.server.addr.port(), 8123);
    assert!(settings.server.addr.ip().is_unspecified());
}

#[test]
#[serial]
fn prefixed_configuration_wins_over_legacy_fallback() {
    unsafe {
        std::env::set_var("SECRET_KEY", "legacy-secret");
    }

    let mut raw = raw_with_secrets();
    raw.apply_env_fallbacks();

    unsafe {
        std::env::remove_var("SECRET_KEY");
    }

    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.auth.secret_key, "test-secret-key");
}

#[test]
fn default_to_serve_command() {
    let args = CliArgs::parse_from(["foglio"]);
    let command = args
        .command
        .unwrap_or(Command::Serve(Box::<ServeArgs>::default()));
    assert!(matches!(command, Command::Serve(_)));
}

#[test]
fn parse_serve_arguments() {
    let args = CliArgs::parse_from([
        "foglio",
        "serve",
        "--database-url",
        "postgres://example",
        "--server-port",
        "9000",
    ]);

    match args.command.expect("serve command") {
        Command::Serve(serve) => {
            assert_eq!(
                serve.overrides.database_url.as_deref(),
                Some("postgres://example")
            );
            assert_eq!(serve.overrides.server_port, Some(9000));
        }
    }
}
