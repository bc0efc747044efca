pub mod fetch;
pub mod filters;
pub mod save;
