use clap::Parser;
use tracing_subscriber::filter::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser, Debug, Clone)]
#[command(name = "ore-agent")]
#[command(about = "Plays a grid mining match, reading turns on stdin and writing commands on stdout")]
pub struct Config {
    /// Log filter directive, e.g. "debug" or "ore_agent::beliefs=trace"
    #[arg(long, env = "ORE_AGENT_LOG", default_value = DEFAULT_LOG_FILTER)]
    pub log: String,

    /// Log both belief grids after every turn
    #[arg(long, env = "ORE_AGENT_DUMP_BELIEFS")]
    pub dump_beliefs: bool,

    /// Append each robot's role to its command as a comment
    #[arg(long, env = "ORE_AGENT_ANNOTATE")]
    pub annotate: bool,
}
impl Config {
    /// Logs go to stderr since stdout belongs to the referee.
    pub fn init_tracing(&self) {
        let (filter, rejected) = match EnvFilter::try_new(&self.log) {
            Ok(filter) => (filter, None),
            Err(err) => (EnvFilter::new(DEFAULT_LOG_FILTER), Some(err)),
        };

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .without_time()
            .init();

        if let Some(err) = rejected {
            tracing::warn!("invalid log filter {:?} ({}), falling back to {}", self.log, err, DEFAULT_LOG_FILTER);
        }
    }
}
