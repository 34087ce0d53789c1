pub mod about;
pub mod challenge;
pub mod consultants;
pub mod cta;
pub mod delivery;
pub mod investment;
pub mod solution;
pub mod title;
