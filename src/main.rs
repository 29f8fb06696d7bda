use std::io::{self, Write};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use ore_agent::agent::Agent;
use ore_agent::config::Config;
use ore_agent::interface::{self, Tokens};

fn main() -> Result<()> {
    let config = Config::parse();
    config.init_tracing();

    let stdin = io::stdin();
    let mut tokens = Tokens::new(stdin.lock());
    let (width, height) = interface::read_initial(&mut tokens)?;
    let mut agent = Agent::new(width, height)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    // game loop
    while let Some(observation) = interface::read_turn(&mut tokens, width, height)? {
        let start = Instant::now();
        agent.observe(observation)?;
        let commands = agent.act();

        for command in commands.iter() {
            writeln!(out, "{}", interface::format_command(command, config.annotate)).context("failed to write command")?;
        }
        out.flush().context("failed to flush commands")?;

        tracing::debug!(turn = agent.turn(), elapsed_ms = start.elapsed().as_secs_f64() * 1000.0, "turn complete");
        if config.dump_beliefs {
            tracing::info!("turn {} beliefs:\n{}", agent.turn(), agent.beliefs());
        }
    }

    tracing::info!(turns = agent.turn(), "input closed");
    Ok(())
}
