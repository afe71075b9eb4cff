//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed working directory and env var changes.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use drydock_config::DrydockConfig;

#[test]
fn loads_server_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[server]
bind_addr = "127.0.0.1:9100"
api_key = "toml-key"
cors_origins = ["https://repairs.example.com"]
"#,
        )?;

        let config: DrydockConfig = Figment::from(Serialized::defaults(DrydockConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.server.bind_addr, "127.0.0.1:9100");
        assert_eq!(config.server.api_key, "toml-key");
        assert!(config.server.requires_api_key());
        assert!(!config.server.allows_any_origin());
        Ok(())
    });
}

#[test]
fn loads_checklist_seeds_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[[checklist.items]]
code = "SEA_TRIAL"
label = "Sea trial completed"
sort_order = 20

[[checklist.items]]
code = "HULL_INSPECT"
label = "Hull inspected"
sort_order = 10
active = false
"#,
        )?;

        let config: DrydockConfig = Figment::from(Serialized::defaults(DrydockConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.checklist.items.len(), 2);
        assert_eq!(config.checklist.items[0].code, "SEA_TRIAL");
        assert!(config.checklist.items[0].active);
        assert_eq!(config.checklist.items[1].sort_order, 10);
        assert!(!config.checklist.items[1].active);
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "drydock.toml",
            r#"
[database]
path = "fleet.db"

[general]
default_limit = 25
"#,
        )?;

        let config = DrydockConfig::load().expect("config loads");
        assert_eq!(config.database.path, "fleet.db");
        assert_eq!(config.general.default_limit, 25);
        assert_eq!(config.general.max_limit, 500);
        Ok(())
    });
}

#[test]
fn invalid_limits_fail_validation() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "drydock.toml",
            r#"
[general]
default_limit = 900
max_limit = 100
"#,
        )?;

        assert!(DrydockConfig::load().is_err());
        Ok(())
    });
}
