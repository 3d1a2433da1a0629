pub mod payments;
pub mod posts;
pub mod sites;
pub mod subscriptions;
pub mod users;
