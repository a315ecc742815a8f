use std::process::ExitCode;

use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn main() -> ExitCode {
    // .env 先于日志加载，使 RUST_LOG / LOG_FORMAT 生效
    dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(service = "cake_api", event = "panic", %service_id, pid, message = %info, "unhandled panic occurred");
    }));

    let cfg = match server::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "cake_api", event = "config_invalid", error = %e, "cannot start without a valid config");
            return ExitCode::FAILURE;
        }
    };

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.server.worker_threads {
        builder.worker_threads(w);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "cake_api", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = "cake_api",
        event = "start",
        %service_id,
        pid,
        version,
        threads = cfg.server.worker_threads.unwrap_or_default(),
        storage = ?cfg.storage.backend,
        "cake api starting"
    );

    match rt.block_on(server::run(cfg, server::shutdown_signal())) {
        Ok(()) => {
            info!(service = "cake_api", event = "stop", %service_id, pid, "cake api stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "cake_api", event = "run_failed", error = %e, "cake api exited with error");
            ExitCode::FAILURE
        }
    }
}
