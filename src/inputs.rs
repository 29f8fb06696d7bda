use std::fmt::Display;

pub const NUM_PLAYERS: usize = 2;
pub const ME: usize = 0;
pub const ENEMY: usize = 1;

pub const HOME_COLUMN: i32 = 0;
pub const RADAR_RADIUS: i32 = 4;
pub const MOVE_DISTANCE: i32 = 4;
pub const ITEM_COOLDOWN: u32 = 5;

pub type EntityId = u32;

#[derive(Copy,Clone,Debug,Default,PartialEq,Eq,Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}
impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    pub fn is_home(&self) -> bool {
        self.x == HOME_COLUMN
    }

    /// Turns needed to stand next to `target` and dig it, moving MOVE_DISTANCE cells per turn.
    pub fn turns_to_dig_at(&self, target: Position) -> i32 {
        let distance = self.distance_to(target);
        if distance <= 1 { return 1 }
        1 + div_ceil(distance - 1, MOVE_DISTANCE)
    }

    pub fn turns_to_dig_at_and_return(&self, target: Position) -> i32 {
        self.turns_to_dig_at(target) + div_ceil(target.x, MOVE_DISTANCE)
    }

    /// Every position within Manhattan `radius` of this one, unbounded by any grid.
    pub fn diamond(self, radius: i32) -> impl Iterator<Item=Position> {
        (-radius..=radius).flat_map(move |dy| {
            let span = radius - dy.abs();
            (-span..=span).map(move |dx| Position::new(self.x + dx, self.y + dy))
        })
    }

    /// The position itself followed by its four orthogonal neighbours.
    pub fn with_neighbors(self) -> [Position; 5] {
        [
            self,
            Position::new(self.x - 1, self.y),
            Position::new(self.x + 1, self.y),
            Position::new(self.x, self.y - 1),
            Position::new(self.x, self.y + 1),
        ]
    }
}
impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

fn div_ceil(numerator: i32, denominator: i32) -> i32 {
    if numerator <= 0 { return 0 }
    (numerator + denominator - 1) / denominator
}

#[derive(Copy,Clone,Debug,PartialEq,Eq,Hash)]
pub enum EntityKind {
    MyRobot,
    EnemyRobot,
    Radar,
    Trap,
}
impl EntityKind {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(EntityKind::MyRobot),
            1 => Some(EntityKind::EnemyRobot),
            2 => Some(EntityKind::Radar),
            3 => Some(EntityKind::Trap),
            _ => None,
        }
    }
}

#[derive(Copy,Clone,Debug,Default,PartialEq,Eq,Hash)]
pub enum Item {
    #[default]
    Nothing,
    Radar,
    Trap,
    Ore,
}
impl Item {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(Item::Nothing),
            2 => Some(Item::Radar),
            3 => Some(Item::Trap),
            4 => Some(Item::Ore),
            _ => None,
        }
    }
}
impl Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Item::Nothing => write!(f, "NONE"),
            Item::Radar => write!(f, "RADAR"),
            Item::Trap => write!(f, "TRAP"),
            Item::Ore => write!(f, "ORE"),
        }
    }
}

#[derive(Copy,Clone,Debug,PartialEq,Eq,Hash)]
pub enum Action {
    Wait,
    Move(Position),
    Dig(Position),
    Request(Item),
}
impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Wait => write!(f, "WAIT"),
            Action::Move(target) => write!(f, "MOVE {}", target),
            Action::Dig(target) => write!(f, "DIG {}", target),
            Action::Request(item) => write!(f, "REQUEST {}", item),
        }
    }
}

#[derive(Copy,Clone,Debug,Default,PartialEq,Eq)]
pub struct Cooldowns {
    pub radar: u32,
    pub trap: u32,
}

#[derive(Copy,Clone,Debug,Default,PartialEq,Eq)]
pub struct CellObservation {
    pub ore: Option<u8>,
    pub has_hole: bool,
}

#[derive(Copy,Clone,Debug,PartialEq,Eq)]
pub struct EntityObservation {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Position,
    pub item: Item,
}
impl EntityObservation {
    /// The referee reports destroyed robots and spent items at -1.
    pub fn is_dead(&self) -> bool {
        self.position.x == -1 || self.position.y == -1
    }
}

/// Everything the referee tells us at the start of a turn
#[derive(Clone,Debug,Default)]
pub struct Observation {
    pub scores: [u32; NUM_PLAYERS],
    pub cells: Vec<CellObservation>,
    pub cooldowns: Cooldowns,
    pub entities: Vec<EntityObservation>,
}
