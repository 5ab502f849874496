use std::env;

use mimalloc::MiMalloc;
use premake::config::LOG_ENV_VAR;
use premake::{HostConfig, Premake};
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn report_error(message: &str, traceback: Option<&str>) {
    // release builds keep it short; debug builds show where it happened
    let text = match traceback {
        Some(traceback) if cfg!(debug_assertions) => traceback,
        _ => message,
    };
    eprintln!("Error: {}", text);
}

fn main() {
    init_logging();

    // Script execution recurses on the native stack; give it room.
    let stack_size = 16 * 1024 * 1024; // 16 MB
    let builder = std::thread::Builder::new()
        .name("premake-main".into())
        .stack_size(stack_size);

    let handler = match builder.spawn(premake_main) {
        Ok(handler) => handler,
        Err(e) => {
            eprintln!("premake: cannot start main thread: {}", e);
            std::process::exit(1);
        }
    };

    match handler.join() {
        Ok(code) => std::process::exit(code),
        Err(_) => {
            eprintln!("premake: internal error (thread panicked)");
            std::process::exit(1);
        }
    }
}

fn premake_main() -> i32 {
    let argv: Vec<String> = env::args().collect();
    Premake::launch(HostConfig::from_env(), &argv, report_error)
}
