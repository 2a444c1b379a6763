pub mod configuration;

pub mod ladder {
    pub mod laddervalue;
    pub mod laddererror;
    pub mod tiebreaker;
    pub mod segment;
    pub mod ladder;
    pub mod laddermanager;
}

pub mod manager {
    pub mod managererror;
    pub mod manager;
}

pub use ladder::ladder::Ladder;
pub use ladder::laddererror::LadderError;
pub use ladder::laddervalue::LadderValue;
pub use ladder::segment::Bracket;
pub use ladder::tiebreaker::{
    bankers_rounding,
    ceil,
    floor,
    half_up,
    TieBreakConvention,
    TieBreaker
};
