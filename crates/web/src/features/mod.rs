pub mod clubs;
pub mod game_events;
pub mod matches;
pub mod players;
pub mod seasons;
pub mod teams;
