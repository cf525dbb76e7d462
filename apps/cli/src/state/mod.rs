//! # State Module
//!
//! What a command needs besides its arguments.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────┐          ┌──────────────────────────┐        │
//! │  │      AppConfig       │          │        Database          │        │
//! │  │                      │          │                          │        │
//! │  │  company, footer     │          │  document_sequence       │        │
//! │  │  labor_rate          │          │  (opened on demand by    │        │
//! │  │  spot_prices         │          │   build / number)        │        │
//! │  │  default_discount    │          │                          │        │
//! │  └──────────────────────┘          └──────────────────────────┘        │
//! │                                                                         │
//! │  AppConfig is read-only after loading.                                 │
//! │  Database serializes number issuance through SQLite's write lock.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;

pub use config::{default_config_path, AppConfig};
pub use db::open_database;
