pub mod app;
pub mod auth;
pub mod config;
pub mod demo_seeder;
pub mod error;
pub mod state;
pub mod api {
    pub mod dropdowns;
    pub mod errors;
    pub mod galleries;
    pub mod records;
    pub mod upload;
}
pub mod db {
    pub mod collection;
    pub mod dropdowns;
    pub mod galleries;
    pub mod migration;
    pub mod models;
    pub mod ordering;
    pub mod record;
    pub mod session_slot;
    pub mod slug;
    pub mod store;
}
pub mod storage {
    pub mod client;
}
