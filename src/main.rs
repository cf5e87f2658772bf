use anyhow::Result;
use portrait_studio::utils::logging;
use portrait_studio::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载 .env
    dotenvy::dotenv().ok();

    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
