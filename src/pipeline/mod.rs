//! Pipeline entry points for crawler operations.

pub mod crawl;

pub use crawl::run_crawler;
