pub mod club;
pub mod game_event;
pub mod handball_match;
pub mod player;
pub mod season;
pub mod team;

#[cfg(test)]
pub(crate) mod fixtures;
