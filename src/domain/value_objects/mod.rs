pub mod enums;
pub mod iam;
pub mod payments;
pub mod posts;
pub mod sites;
pub mod subscriptions;
