pub mod club;
pub mod common;
pub mod game_event;
pub mod handball_match;
pub mod player;
pub mod season;
pub mod statistics;
pub mod team;
