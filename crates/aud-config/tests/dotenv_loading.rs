//! `.env` loading lives in its own test binary: dotenvy writes to the process
//! environment, which outlives the jail.

use aud_config::AudConfig;
use figment::Jail;

#[test]
fn dotenv_file_feeds_env_layer() {
    Jail::expect_with(|jail| {
        jail.create_file(".env", "AUD_API__DEFAULT_LIMIT=7\n")?;

        let config = AudConfig::load_with_dotenv().expect("config loads");
        assert_eq!(config.api.default_limit, 7);
        Ok(())
    });
}
