use crate::config::DeploymentMode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// トレーシングサブスクライバーを初期化
///
/// ログレベルは RUST_LOG で制御（未設定なら info）。
/// サーバーレスでは CloudWatch 向けに JSON 形式で出力する。
pub fn init_tracing(mode: DeploymentMode) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match mode {
        DeploymentMode::Serverless => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(false).json())
            .try_init()?,
        DeploymentMode::Local => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()?,
    }

    Ok(())
}
