pub mod bio;
pub mod config;
pub mod content;
pub mod content_list;
pub mod content_store;
pub mod error;
pub mod logger;
pub mod posts;
pub mod projects;
pub mod publications;
pub mod routes;
pub mod text_utils;
mod test_data;
