use anyhow::Result;
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "moodroom",
    about = "Terminal client for the moodroom realtime chatroom"
)]
struct Cli {
    /// Server base URL (overrides the config file)
    #[arg(long)]
    server: Option<String>,
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let mut config = moodroom_tui::config::load_config();
    if let Some(server) = cli.server {
        config.server.url = server;
    }

    moodroom_tui::run(config)
}

/// The alternate screen owns stdout, so logs go to a file under the config
/// directory. Logging is best-effort: an unwritable directory just means no
/// logs.
fn init_logging() {
    let Ok(dir) = moodroom_tui::config::config_dir() else {
        return;
    };
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(dir.join("moodroom.log"))
    else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
}
