pub mod usecases;
pub mod validation;
