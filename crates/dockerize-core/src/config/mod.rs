//! Bundler config scraping
//!
//! This module provides:
//! - A regex-based scraper that reads a config file by conventional name
//! - Build output directory detection for Vite, Rollup and Webpack

pub mod build_output;
pub mod scraper;

pub use build_output::{
    detect_build_output_dir, parse_rollup_config, parse_vite_config, parse_webpack_config,
    BuildOutputDetector, Bundler,
};
pub use scraper::{parse_config, ConfigScraper, DEFAULT_EXTENSIONS};
