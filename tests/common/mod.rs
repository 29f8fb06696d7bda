#![allow(dead_code)]

use ore_agent::agent::Agent;
use ore_agent::interface::{self, Tokens};

pub const MY_ROBOT: i32 = 0;
pub const ENEMY_ROBOT: i32 = 1;
pub const RADAR: i32 = 2;
pub const TRAP: i32 = 3;

pub const NONE: i32 = -1;
pub const ORE: i32 = 4;

/// One turn of referee input, as text.
#[derive(Clone)]
pub struct TurnBuilder {
    width: usize,
    height: usize,
    scores: (u32, u32),
    ore: Vec<Option<u8>>,
    holes: Vec<bool>,
    cooldowns: (u32, u32),
    entities: Vec<(u32, i32, i32, i32, i32)>,
}
impl TurnBuilder {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            scores: (0, 0),
            ore: vec![None; width * height],
            holes: vec![false; width * height],
            cooldowns: (0, 0),
            entities: Vec::new(),
        }
    }

    pub fn scores(mut self, mine: u32, theirs: u32) -> Self {
        self.scores = (mine, theirs);
        self
    }

    pub fn ore(mut self, x: usize, y: usize, amount: u8) -> Self {
        self.ore[y * self.width + x] = Some(amount);
        self
    }

    pub fn reveal_all(mut self, amount: u8) -> Self {
        for ore in self.ore.iter_mut() {
            ore.get_or_insert(amount);
        }
        self
    }

    pub fn hole(mut self, x: usize, y: usize) -> Self {
        self.holes[y * self.width + x] = true;
        self
    }

    pub fn cooldowns(mut self, radar: u32, trap: u32) -> Self {
        self.cooldowns = (radar, trap);
        self
    }

    pub fn entity(mut self, id: u32, kind: i32, x: i32, y: i32, item: i32) -> Self {
        self.entities.push((id, kind, x, y, item));
        self
    }

    pub fn text(&self) -> String {
        let mut text = format!("{} {}\n", self.scores.0, self.scores.1);
        for y in 0..self.height {
            let mut row = Vec::new();
            for x in 0..self.width {
                let index = y * self.width + x;
                let ore = match self.ore[index] {
                    Some(amount) => amount.to_string(),
                    None => "?".to_string(),
                };
                row.push(format!("{} {}", ore, if self.holes[index] { 1 } else { 0 }));
            }
            text.push_str(&row.join(" "));
            text.push('\n');
        }
        text.push_str(&format!("{} {} {}\n", self.entities.len(), self.cooldowns.0, self.cooldowns.1));
        for &(id, kind, x, y, item) in self.entities.iter() {
            text.push_str(&format!("{} {} {} {} {}\n", id, kind, x, y, item));
        }
        text
    }
}

/// Feeds a whole match through the text protocol, returning the agent and the
/// command lines it wrote for each turn.
pub fn play(width: usize, height: usize, turns: &[TurnBuilder]) -> (Agent, Vec<Vec<String>>) {
    let mut input = format!("{} {}\n", width, height);
    for turn in turns {
        input.push_str(&turn.text());
    }

    let mut tokens = Tokens::new(input.as_bytes());
    let (width, height) = interface::read_initial(&mut tokens).unwrap();
    let mut agent = Agent::new(width, height).unwrap();

    let mut outputs = Vec::new();
    while let Some(observation) = interface::read_turn(&mut tokens, width, height).unwrap() {
        agent.observe(observation).unwrap();
        let lines = agent.act().iter().map(|command| interface::format_command(command, false)).collect();
        outputs.push(lines);
    }
    (agent, outputs)
}
