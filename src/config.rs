use std::path::PathBuf;

use serde::Deserialize;

/// Top-level run configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FluxrecConfig {
    /// Plot groups, in output order: codes or union names.
    pub plot_groups: Vec<String>,

    /// Year range, unit and data location.
    pub run: RunToml,

    /// Series to read or combine, in registry order.
    #[serde(default)]
    pub series: Vec<SeriesToml>,

    /// Ad hoc unions; these extend or override the built-in table.
    #[serde(default, rename = "union")]
    pub unions: Vec<UnionToml>,

    /// Combination rules, applied in order.
    #[serde(default, rename = "combination")]
    pub combinations: Vec<CombinationToml>,

    /// Spatial leakage overrides.
    #[serde(default)]
    pub leakage: Vec<LeakageToml>,

    /// Removal series for the correction pass.
    #[serde(default)]
    pub correction: CorrectionToml,

    /// Detrend settings.
    #[serde(default)]
    pub detrend: DetrendToml,

    /// Export settings.
    #[serde(default)]
    pub output: OutputToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunToml {
    pub start_year: i32,
    pub end_year: i32,
    #[serde(default = "default_target_unit")]
    pub target_unit: String,
    /// Resolved against the config file's directory when relative.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_target_unit() -> String {
    "Tg C yr-1".to_string()
}
fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeriesToml {
    pub name: String,
    pub kind: String,
    /// Source file under `data_dir`; omitted for combination targets.
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub flip_sign: bool,
    #[serde(default = "default_true")]
    pub production: bool,
    #[serde(default = "default_true")]
    pub display: bool,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub correct: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default = "default_value_var")]
    pub value_var: String,
    #[serde(default = "default_error_var")]
    pub error_var: String,
    #[serde(default = "default_min_var")]
    pub min_var: String,
    #[serde(default = "default_max_var")]
    pub max_var: String,
}

fn default_true() -> bool {
    true
}
fn default_value_var() -> String {
    "flux".to_string()
}
fn default_error_var() -> String {
    "flux_error".to_string()
}
fn default_min_var() -> String {
    "flux_min".to_string()
}
fn default_max_var() -> String {
    "flux_max".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnionToml {
    pub name: String,
    pub codes: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CombinationToml {
    pub target: String,
    #[serde(default = "default_op")]
    pub op: String,
    pub sources: Vec<String>,
    /// Sum only; all ones when omitted.
    #[serde(default)]
    pub coefficients: Option<Vec<f64>>,
}

fn default_op() -> String {
    "sum".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LeakageToml {
    pub series: String,
    pub allowed_groups: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct CorrectionToml {
    #[serde(default)]
    pub removals: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct DetrendToml {
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct OutputToml {
    /// JSON export path; the tables go to stdout when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}
