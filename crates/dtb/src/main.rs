use std::sync::Arc;

use dtb_core::config::Config;

#[tokio::main]
async fn main() -> Result<(), dtb_core::Error> {
    let cfg = Arc::new(Config::load()?);
    dtb_core::logging::init("dtb", &cfg.log_level)?;

    dtb_telegram::router::run_polling(cfg)
        .await
        .map_err(|e| dtb_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
