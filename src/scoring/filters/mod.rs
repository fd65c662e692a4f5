pub mod availability;
pub mod specialists;

pub use availability::AvailabilityFilter;
pub use specialists::SpecialistFilter;
