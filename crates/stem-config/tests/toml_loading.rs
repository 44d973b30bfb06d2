//! Integration tests for TOML configuration loading.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use stem_config::{LOCAL_CONFIG_FILE, StemConfig};

#[test]
fn loads_store_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[store]
endpoint = "https://cloud.example.io/v1"
project_id = "stem-staging"
api_key = "toml-key"
database_id = "staging_db"
not_found_status = 404
conflict_status = 409
timeout_secs = 5
"#,
        )?;

        let config: StemConfig = Figment::from(Serialized::defaults(StemConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.store.endpoint, "https://cloud.example.io/v1");
        assert_eq!(config.store.project_id, "stem-staging");
        assert_eq!(config.store.api_key, "toml-key");
        assert_eq!(config.store.database_id, "staging_db");
        assert_eq!(config.store.timeout_secs, 5);
        assert!(config.store.validate().is_ok());
        Ok(())
    });
}

#[test]
fn partial_section_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[diagram]
path = "schema/model.mmd"
"#,
        )?;

        let config: StemConfig = Figment::from(Serialized::defaults(StemConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.diagram.path, "schema/model.mmd");
        assert_eq!(config.store.database_id, "stem_network_db");
        assert_eq!(config.store.conflict_status, 409);
        Ok(())
    });
}

#[test]
fn local_config_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_file(
            LOCAL_CONFIG_FILE,
            r#"
[store]
database_id = "local_db"
"#,
        )?;

        let config = StemConfig::load().expect("config loads");
        assert_eq!(config.store.database_id, "local_db");
        Ok(())
    });
}

#[test]
fn env_overrides_local_config_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            LOCAL_CONFIG_FILE,
            r#"
[store]
api_key = "toml-key"
"#,
        )?;
        jail.set_env("APPWRITE_API_KEY", "env-key");

        let config = StemConfig::load().expect("config loads");
        assert_eq!(config.store.api_key, "env-key");
        Ok(())
    });
}

#[test]
fn invalid_status_type_is_an_error() {
    Jail::expect_with(|jail| {
        jail.create_file(
            LOCAL_CONFIG_FILE,
            r#"
[store]
conflict_status = "conflict"
"#,
        )?;

        assert!(StemConfig::load().is_err());
        Ok(())
    });
}
