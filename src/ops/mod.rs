pub mod creation;
pub mod store;
pub mod view;
