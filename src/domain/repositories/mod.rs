pub mod errors;
pub mod payments;
pub mod plans;
pub mod posts;
pub mod sites;
pub mod subscriptions;
pub mod users;
