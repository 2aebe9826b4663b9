//! Country-specific holiday calendars.

mod united_states;

pub use united_states::UnitedStates;
