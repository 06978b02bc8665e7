use clap::Parser;
use snake_controller::utils::logger;
use snake_controller::{
    CliConfig, Controller, ControllerError, MqttPublisher, Publisher, Session, TerminalKeys,
};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("🚀 Starting snake-controller");

    match run(&config).await {
        Ok(session) => {
            tracing::info!(
                "✅ Session finished: {} command(s) published, {} key(s) ignored ({:?})",
                session.published,
                session.ignored,
                session.stop_reason
            );
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ snake-controller failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );

            // 輸出用戶友好的錯誤信息
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(e.exit_code());
        }
    }
}

async fn run(config: &CliConfig) -> Result<Session, ControllerError> {
    // 合併並驗證配置
    let settings = config.resolve()?;
    tracing::debug!(
        "Settings: broker={} keep_alive={}s username={} client_id={} grace={}ms",
        settings.broker_url,
        settings.keep_alive_secs,
        settings.username,
        settings.client_id,
        settings.disconnect_grace_ms
    );

    let publisher = MqttPublisher::connect(&settings).await?;
    println!("Connected!");

    let keys = match TerminalKeys::open() {
        Ok(keys) => keys,
        Err(e) => {
            // 終端初始化失敗時先斷線
            let _ = publisher.disconnect().await;
            return Err(e);
        }
    };

    // raw mode 下需要手動換行
    print!("Press the ESC button to quit\r\n");

    let mut controller = Controller::new(publisher, keys);
    let session = controller.run().await;

    // 還原終端後再輸出
    drop(controller);
    session
}
