use crate::config::Config;
use crate::startup::Application;
use crate::utils::logger::init_logger;
use anyhow::Context;

mod config;
mod errors;
mod infrastructure;
mod models;
mod services;
mod startup;
mod utils;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志（全局只需调用一次）
    init_logger();

    log_info!("Starting sui payment...");

    // 1. 加载并校验配置
    let config = Config::load().context("Failed to load application configuration")?;
    config
        .validate()
        .context("Invalid application configuration")?;

    // 2. 构建应用实例（RPC / 签名器 / 子服务）
    let application = Application::build(config)
        .await
        .context("Application building failed (provider/signer initialization)")?;

    // 3. 执行一次支付；失败时以非零码退出
    let outcome = application
        .run()
        .await
        .context("Payment pipeline failed")?;

    log_info!("Payment finished, digest={}", outcome.digest());
    Ok(())
}
