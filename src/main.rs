use env_logger::{Builder, Env};
use log::error;

fn init_logger() {
    // Уровень из RUST_LOG, иначе warn: stdout остаётся за диалогом с пользователем.
    // Пример: RUST_LOG=debug rabbit
    Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();

    if let Err(e) = rabbit::cli::run() {
        error!("{:?}", e);
        std::process::exit(1);
    }
}
