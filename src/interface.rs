use std::collections::VecDeque;
use std::io::BufRead;
use std::str::FromStr;

use anyhow::{anyhow, bail, ensure, Context, Error, Result};

use super::inputs::*;
use super::planning::Command;

macro_rules! parse_input {
    ($tokens:expr, $t:ty, $what:expr) => ({
        let token = $tokens.expect($what)?;
        token.parse::<$t>().with_context(|| format!("invalid {}: {:?}", $what, token))?
    })
}

/// Whitespace-separated tokens read lazily, one line at a time.
pub struct Tokens<R> {
    reader: R,
    line: String,
    pending: VecDeque<String>,
}
impl<R: BufRead> Tokens<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            pending: VecDeque::new(),
        }
    }

    /// `None` once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Option<String>> {
        while self.pending.is_empty() {
            self.line.clear();
            let num_read = self.reader.read_line(&mut self.line).context("failed to read input")?;
            if num_read == 0 { return Ok(None) }
            self.pending.extend(self.line.split_whitespace().map(str::to_owned));
        }
        Ok(self.pending.pop_front())
    }

    pub fn expect(&mut self, what: &str) -> Result<String> {
        self.next_token()?.ok_or_else(|| anyhow!("input ended while reading {}", what))
    }
}

pub fn read_initial<R: BufRead>(tokens: &mut Tokens<R>) -> Result<(usize, usize)> {
    let width = parse_input!(tokens, usize, "width");
    let height = parse_input!(tokens, usize, "height"); // size of the map
    ensure!(width > 0 && height > 0, "map must have at least one cell, got {}x{}", width, height);
    Ok((width, height))
}

/// Reads one turn, or `None` if the referee closed the input between turns.
pub fn read_turn<R: BufRead>(tokens: &mut Tokens<R>, width: usize, height: usize) -> Result<Option<Observation>> {
    let my_score = match tokens.next_token()? {
        Some(token) => token.parse::<u32>().with_context(|| format!("invalid score: {:?}", token))?,
        None => return Ok(None),
    };
    let opponent_score = parse_input!(tokens, u32, "opponent score");

    let mut cells = Vec::with_capacity(width * height);
    for _ in 0..(width * height) {
        let ore = tokens.expect("ore")?; // amount of ore or "?" if unknown
        let ore = if ore == "?" {
            None
        } else {
            Some(ore.parse::<u8>().with_context(|| format!("invalid ore: {:?}", ore))?)
        };

        let has_hole = match parse_input!(tokens, u8, "hole") { // 1 if cell has a hole
            0 => false,
            1 => true,
            wrong => bail!("invalid hole flag: {}", wrong),
        };

        cells.push(CellObservation { ore, has_hole });
    }

    let entity_count = parse_input!(tokens, usize, "entity count"); // number of entities visible to you
    let cooldowns = Cooldowns {
        radar: parse_input!(tokens, u32, "radar cooldown"),
        trap: parse_input!(tokens, u32, "trap cooldown"),
    };

    let mut entities = Vec::with_capacity(entity_count);
    for _ in 0..entity_count {
        let id = parse_input!(tokens, EntityId, "entity id");
        let kind = parse_input!(tokens, i32, "entity type"); // 0 for your robot, 1 for other robot, 2 for radar, 3 for trap
        let kind = EntityKind::from_code(kind).ok_or_else(|| anyhow!("invalid entity type: {}", kind))?;
        let x = parse_input!(tokens, i32, "x");
        let y = parse_input!(tokens, i32, "y");
        let item = parse_input!(tokens, i32, "item"); // -1 for NONE, 2 for RADAR, 3 for TRAP, 4 for ORE
        let item = Item::from_code(item).ok_or_else(|| anyhow!("invalid item: {}", item))?;

        entities.push(EntityObservation {
            id,
            kind,
            position: Position::new(x, y),
            item,
        });
    }

    Ok(Some(Observation {
        scores: [my_score, opponent_score],
        cells,
        cooldowns,
        entities,
    }))
}

pub fn format_action(action: &Action) -> String {
    action.to_string()
}

pub fn format_command(command: &Command, annotate: bool) -> String {
    if annotate {
        format!("{} {}", format_action(&command.action), command.role)
    } else {
        format_action(&command.action)
    }
}

impl FromStr for Action {
    type Err = Error;

    /// Parses a command line as sent to the referee, ignoring any trailing comment.
    fn from_str(line: &str) -> Result<Self> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let coordinate = |index: usize| -> Result<i32> {
            let word = words.get(index).ok_or_else(|| anyhow!("missing coordinate in {:?}", line))?;
            word.parse::<i32>().with_context(|| format!("invalid coordinate in {:?}", line))
        };

        let action = match words.first().copied() {
            Some("WAIT") => Action::Wait,
            Some("MOVE") => Action::Move(Position::new(coordinate(1)?, coordinate(2)?)),
            Some("DIG") => Action::Dig(Position::new(coordinate(1)?, coordinate(2)?)),
            Some("REQUEST") => match words.get(1).copied() {
                Some("RADAR") => Action::Request(Item::Radar),
                Some("TRAP") => Action::Request(Item::Trap),
                other => bail!("invalid request item: {:?}", other),
            },
            other => bail!("invalid command: {:?}", other),
        };
        Ok(action)
    }
}
