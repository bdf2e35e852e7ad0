pub mod debouncer;
pub mod players;
pub mod predicate;

pub use debouncer::{DirectionMode, GestureDebouncer, GestureTransition, STABLE_THRESHOLD};
pub use players::PlayerRegistry;
pub use predicate::{Predicate, PredicateSet};
