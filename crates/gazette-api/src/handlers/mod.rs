pub mod blogs;
pub mod careers;
pub mod contact;
pub mod events;
pub mod gallery;
pub mod health;
pub mod uploads;
