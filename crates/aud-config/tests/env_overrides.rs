use aud_config::AudConfig;
use figment::Jail;

#[test]
fn env_sets_nested_fields() {
    Jail::expect_with(|jail| {
        jail.set_env("AUD_DATABASE__PATH", "/tmp/env.db");
        jail.set_env("AUD_API__MAX_LIMIT", "200");

        let config = AudConfig::load().expect("config loads");
        assert_eq!(config.database.path, "/tmp/env.db");
        assert_eq!(config.api.max_limit, 200);
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_file("aud.toml", "[server]\nurl = \"http://from-file:3000\"\n")?;
        jail.set_env("AUD_SERVER__URL", "http://from-env:4000");

        let config = AudConfig::load().expect("config loads");
        assert_eq!(config.server.url, "http://from-env:4000");
        assert_eq!(config.server.rpc_url(), "http://from-env:4000/rpc");
        Ok(())
    });
}

#[test]
fn env_value_still_validated() {
    Jail::expect_with(|jail| {
        jail.set_env("AUD_SERVER__URL", "ftp://nope");

        assert!(AudConfig::load().is_err());
        Ok(())
    });
}
