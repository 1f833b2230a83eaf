//! Build output directory detection for Vite, Rollup and Webpack

use super::scraper::ConfigScraper;
use regex::Regex;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

static VITE_OUT_DIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"build\s*:\s*\{[^}]*outDir\s*:\s*['"]([^'"]+)['"]"#).expect("valid vite pattern")
});

static ROLLUP_OUT_DIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"output\s*:\s*\{[^}]*dir\s*:\s*['"]([^'"]+)['"]"#).expect("valid rollup pattern")
});

static WEBPACK_OUT_DIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"output\s*:\s*\{[^}]*path\s*:\s*path\.resolve\([^,]+,\s*['"]([^'"]+)['"]"#)
        .expect("valid webpack pattern")
});

/// Supported bundlers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bundler {
    Vite,
    Rollup,
    Webpack,
}

impl Bundler {
    /// Detection priority: the first bundler whose config yields a directory wins
    pub const DETECTION_ORDER: [Bundler; 3] = [Bundler::Vite, Bundler::Rollup, Bundler::Webpack];

    pub fn display_name(&self) -> &'static str {
        match self {
            Bundler::Vite => "Vite",
            Bundler::Rollup => "Rollup",
            Bundler::Webpack => "Webpack",
        }
    }

    /// Config file name without extension
    pub fn config_base_name(&self) -> &'static str {
        match self {
            Bundler::Vite => "vite.config",
            Bundler::Rollup => "rollup.config",
            Bundler::Webpack => "webpack.config",
        }
    }

    /// Pattern capturing the output directory field of this bundler's config
    pub fn output_dir_pattern(&self) -> &'static Regex {
        match self {
            Bundler::Vite => &*VITE_OUT_DIR,
            Bundler::Rollup => &*ROLLUP_OUT_DIR,
            Bundler::Webpack => &*WEBPACK_OUT_DIR,
        }
    }
}

impl fmt::Display for Bundler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Finds where a project's bundler writes its compiled assets
#[derive(Debug, Clone, Default)]
pub struct BuildOutputDetector {
    scraper: ConfigScraper,
}

impl BuildOutputDetector {
    pub fn new(scraper: ConfigScraper) -> Self {
        Self { scraper }
    }

    /// Output directory declared in one bundler's config, if any
    pub async fn parse(&self, bundler: Bundler, project_dir: &Path) -> Option<String> {
        let config_path = project_dir.join(bundler.config_base_name());
        self.scraper
            .parse_config(&config_path, bundler.output_dir_pattern())
            .await
    }

    /// Try every bundler in [`Bundler::DETECTION_ORDER`], stopping at the first hit
    pub async fn detect(&self, project_dir: &Path) -> Option<String> {
        for bundler in Bundler::DETECTION_ORDER {
            if let Some(dir) = self.parse(bundler, project_dir).await {
                log::debug!("{} config declares output directory '{}'", bundler, dir);
                return Some(dir);
            }
        }
        None
    }
}

pub async fn parse_vite_config(project_dir: &Path) -> Option<String> {
    BuildOutputDetector::default()
        .parse(Bundler::Vite, project_dir)
        .await
}

pub async fn parse_rollup_config(project_dir: &Path) -> Option<String> {
    BuildOutputDetector::default()
        .parse(Bundler::Rollup, project_dir)
        .await
}

pub async fn parse_webpack_config(project_dir: &Path) -> Option<String> {
    BuildOutputDetector::default()
        .parse(Bundler::Webpack, project_dir)
        .await
}

pub async fn detect_build_output_dir(project_dir: &Path) -> Option<String> {
    BuildOutputDetector::default().detect(project_dir).await
}
