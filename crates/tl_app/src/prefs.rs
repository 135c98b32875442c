use std::path::PathBuf;

use tl_core::gesture::PullConfig;
use tl_core::window::DEFAULT_OVERSCAN;

pub const DEFAULT_ITEM_HEIGHT: f32 = 48.0;
const FEED_PREFS_FILE: &str = "feed_prefs.v1";

#[derive(Clone, Debug, PartialEq)]
pub struct FeedPrefs {
    pub threshold: f32,
    pub overscan: usize,
    pub item_height: f32,
}

impl Default for FeedPrefs {
    fn default() -> Self {
        Self {
            threshold: PullConfig::default().threshold,
            overscan: DEFAULT_OVERSCAN,
            item_height: DEFAULT_ITEM_HEIGHT,
        }
    }
}

pub fn feed_prefs_path() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(dir).join("touchlist-rs").join(FEED_PREFS_FILE));
    }
    if let Ok(home) = std::env::var("HOME") {
        return Some(
            PathBuf::from(home)
                .join(".config")
                .join("touchlist-rs")
                .join(FEED_PREFS_FILE),
        );
    }
    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("APPDATA") {
            return Some(
                PathBuf::from(appdata)
                    .join("touchlist-rs")
                    .join(FEED_PREFS_FILE),
            );
        }
    }
    None
}

pub fn load_feed_prefs() -> Result<FeedPrefs, String> {
    let Some(path) = feed_prefs_path() else {
        return Ok(FeedPrefs::default());
    };
    if !path.exists() {
        return Ok(FeedPrefs::default());
    }
    let content =
        std::fs::read_to_string(&path).map_err(|err| format!("read {}: {err}", path.display()))?;
    parse_feed_prefs(&content)
}

pub fn save_feed_prefs(prefs: &FeedPrefs) -> Result<(), String> {
    let Some(path) = feed_prefs_path() else {
        return Err("cannot resolve a config directory for prefs".to_string());
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|err| format!("create {}: {err}", parent.display()))?;
    }
    std::fs::write(&path, serialize_feed_prefs(prefs))
        .map_err(|err| format!("write {}: {err}", path.display()))
}

pub fn serialize_feed_prefs(prefs: &FeedPrefs) -> String {
    let mut lines = Vec::new();
    lines.push("version=1".to_string());
    lines.push(format!("threshold={}", prefs.threshold));
    lines.push(format!("overscan={}", prefs.overscan));
    lines.push(format!("item_height={}", prefs.item_height));
    lines.join("\n")
}

pub fn parse_feed_prefs(content: &str) -> Result<FeedPrefs, String> {
    let mut out = FeedPrefs::default();
    let mut version = None::<u32>;
    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            return Err("malformed prefs line".to_string());
        };
        match key {
            "version" => {
                let v = value
                    .parse::<u32>()
                    .map_err(|_| "invalid prefs version".to_string())?;
                version = Some(v);
            }
            "threshold" => {
                out.threshold = value
                    .parse::<f32>()
                    .map_err(|_| "invalid threshold".to_string())?;
            }
            "overscan" => {
                out.overscan = value
                    .parse::<usize>()
                    .map_err(|_| "invalid overscan".to_string())?;
            }
            "item_height" => {
                out.item_height = value
                    .parse::<f32>()
                    .map_err(|_| "invalid item height".to_string())?;
            }
            _ => {}
        }
    }
    match version {
        Some(1) => {}
        Some(v) => return Err(format!("unsupported prefs version: {v}")),
        None => return Err("prefs version missing".to_string()),
    }
    if !out.threshold.is_finite() || out.threshold <= 0.0 {
        return Err("threshold must be positive".to_string());
    }
    if !out.item_height.is_finite() || out.item_height <= 0.0 {
        return Err("item height must be positive".to_string());
    }
    Ok(out)
}
