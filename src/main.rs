use anyhow::Result;
use clap::{Parser, Subcommand};
use electron_fix::download::DownloadManager;
use electron_fix::extract::CommandExtractor;
use electron_fix::manifest::Manifest;
use electron_fix::resolve::PnpmList;
use electron_fix::{command, FixEnv};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};
    tracing_log::LogTracer::init().ok();
    let env = std::env::var("ELECTRON_FIX_LOG").unwrap_or_else(|_| "error".into());
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_span_events(FmtSpan::ACTIVE | FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::new(env))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
    log_panics::init();
    let args = Args::parse();
    args.command.run()
}

#[derive(Subcommand)]
enum Commands {
    /// Fix the locally installed electron package
    #[clap(alias = "s")]
    Start,
}

impl Commands {
    pub fn run(self) -> Result<()> {
        match self {
            Self::Start => {
                let root_dir = std::env::current_dir()?;
                let manifest = Manifest::parse_from_json(&root_dir.join("package.json"))?;
                let resolver = PnpmList::new(&root_dir);
                let env = FixEnv::new(manifest, Some(root_dir), &resolver)?;
                command::start(&env, &DownloadManager::new(), &CommandExtractor)?;
            }
        }
        Ok(())
    }
}
