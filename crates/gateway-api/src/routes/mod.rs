pub mod cache;
pub mod files;
pub mod health;
pub mod items;
