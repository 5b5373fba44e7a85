use std::path::PathBuf;

use clap::Parser;

/// Computes which functions need reanalysis after a source change,
/// given a translation unit's (pre-parsed) declarations and a line-level
/// diff against the previous revision.
#[derive(Parser, Debug)]
#[command(name = "reanalyze", version, about)]
pub struct Cli {
    /// Path to the line-diff JSON document for this translation unit.
    #[arg(long)]
    pub diff: Option<PathBuf>,

    /// Reserved for a future file-summary cache; accepted but inert.
    #[arg(long = "fs-file")]
    pub fs_file: Option<PathBuf>,

    /// Append source locations to every emitted name.
    #[arg(long, default_value_t = false)]
    pub loc: bool,

    /// Track class-level type changes. Enabled by default; no wired
    /// effect today (see DESIGN.md).
    #[arg(long, default_value = "true")]
    pub class: bool,

    /// Track field-level type changes. Disabled by default; no wired
    /// effect today (see DESIGN.md).
    #[arg(long, default_value = "false")]
    pub field: bool,

    /// Emit the `.cg` call-graph dump.
    #[arg(long = "dump-cg", default_value_t = false)]
    pub dump_cg: bool,

    /// Write emitter output to sidecar files instead of stdout.
    #[arg(long = "dump-file", default_value = "true")]
    pub dump_file: bool,

    /// Identify declarations by USR instead of by qualified name.
    #[arg(long = "dump-usr", default_value_t = false)]
    pub dump_usr: bool,

    /// Emit the `.anr` affected-node-ranges dump.
    #[arg(long = "dump-anr", default_value_t = false)]
    pub dump_anr: bool,

    /// Reserved for cross-translation-unit analysis; accepted but inert.
    #[arg(long, default_value_t = false)]
    pub ctu: bool,

    /// Override the `.rf` output path.
    #[arg(long = "rf-file")]
    pub rf_file: Option<PathBuf>,

    /// Also write a Cppcheck-format reanalysis list to this path.
    #[arg(long = "cppcheck-rf-file")]
    pub cppcheck_rf_file: Option<PathBuf>,

    /// Also write a GCC-format reanalysis list to this path.
    #[arg(long = "gcc-rf-file")]
    pub gcc_rf_file: Option<PathBuf>,

    /// Origin source path to report in Cppcheck output, if it differs
    /// from the translation unit's own main file (e.g. pre-preprocessing).
    #[arg(long = "file-path")]
    pub file_path: Option<String>,

    /// Translation-unit JSON documents to analyze.
    #[arg(required = true)]
    pub sources: Vec<PathBuf>,
}
