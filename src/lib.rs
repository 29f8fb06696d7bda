pub mod agent;
pub mod beliefs;
pub mod config;
pub mod entities;
pub mod grid;
pub mod inputs;
pub mod interface;
pub mod planning;
