mod admin;
mod history;
mod links;
mod page;
mod settings;

pub use admin::{health, status};
pub use history::{delete_history, list_history};
pub use links::create_link;
pub use page::index;
pub use settings::{get_settings, save_settings};
