use crate::dates::DateRange;
use std::path::{Path, PathBuf};

pub const PLOTS_DIR: &str = "plots";

/// URL prefix the server mounts the plot directory under.
pub const PLOTS_ROUTE: &str = "/plots";

pub const CONFIG_FILE: &str = "neodash.yaml";

pub fn plot_path(plot_dir: &Path, range: &DateRange) -> PathBuf {
    plot_dir.join(range.plot_file_name())
}

pub fn plot_url(range: &DateRange) -> String {
    format!("{PLOTS_ROUTE}/{}", range.plot_file_name())
}
