use anyhow::Context;
use i2r_core::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    i2r_server::init_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let mut config = AppConfig::load_from(&path)
                .with_context(|| format!("failed to load config from {path}"))?;
            config.apply_env_overrides(|key| std::env::var(key).ok());
            config
        }
        None => AppConfig::load_with_env().context("failed to load config")?,
    };

    i2r_server::run(config).await.context("server failed")
}
