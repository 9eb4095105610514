pub mod health;
pub mod create;
pub mod list;
pub mod update;

#[cfg(test)]
pub mod test_support;

pub use health::health_handler;
pub use create::create_handler;
pub use list::list_handler;
pub use update::update_handler;
