pub mod club;
pub mod event_kind;
pub mod game_event;
pub mod handball_match;
pub mod normalized_name;
pub mod player;
pub mod season;
pub mod team;

pub use club::Club;
pub use event_kind::{
    EventKind, EventType, GoalZone, Handedness, MatchStatus, SanctionType, ShotDistance,
    ShotOutcome, ShotPosition, TurnoverKind,
};
pub use game_event::GameEvent;
pub use handball_match::{Match, Side};
pub use normalized_name::NormalizedPlayerName;
pub use player::Player;
pub use season::Season;
pub use team::Team;
