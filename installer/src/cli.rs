//! CLI argument definitions for the `blueprint` tool.
//!
//! This module defines the command-line interface using clap. It is separated
//! from the main entrypoint to keep the binary small and focused on
//! orchestration.

use crate::inject::{InjectOperation, InjectRequest};
use blueprint_common::{MatchMode, SearchDirection};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{ArgGroup, Args, Parser, Subcommand};

/// Scaffold and maintain Maya plugin projects.
#[derive(Parser, Debug)]
#[command(name = "blueprint")]
#[command(version, about)]
#[command(long_about = concat!(
    "Scaffold and maintain Maya plugin projects.\n\n",
    "Blueprint edits a generated project in place: it registers plugins in the ",
    "root CMakeLists.txt, records target Maya versions and devkit URLs in ",
    "package/definitions.json, fills the devkit matrix of the release workflow ",
    "and writes Maya module files.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Initialise a freshly generated project:\n",
    "    $ blueprint init --slug hello --name \"Hello\" --plugins hello \\\n",
    "        --maya-versions 2024,2025\n\n",
    "  Add a plugin to an existing project:\n",
    "    $ blueprint add-plugin deformer\n\n",
    "  Insert a line after a marker comment:\n",
    "    $ blueprint inject --file CMakeLists.txt --contains \\\n",
    "        --after \"# Plugin Subdirectories\" --line \"add_subdirectory(src/extra)\"\n\n",
    "  Install a development module for the current checkout:\n",
    "    $ blueprint module --dev",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Project root [default: current directory].
    #[arg(long, value_name = "DIR", global = true)]
    pub root: Option<Utf8PathBuf>,

    /// Increase log verbosity (repeatable: -v, -vv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Suppress progress output (warnings and errors still shown).
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl Cli {
    /// Returns the `--root` override, if any.
    #[must_use]
    pub fn root(&self) -> Option<&Utf8Path> {
        self.root.as_deref()
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Register plugins, write definitions and fill the release workflow.
    Init(InitArgs),

    /// Copy the plugin template and register the plugin.
    AddPlugin(AddPluginArgs),

    /// Edit a text file by anchor line.
    Inject(InjectArgs),

    /// Write a Maya module file for the project.
    Module(ModuleArgs),
}

/// Arguments for the init command.
#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Machine-friendly project name.
    #[arg(long, value_name = "SLUG")]
    pub slug: String,

    /// Human-readable project name.
    #[arg(long, value_name = "NAME")]
    pub name: String,

    /// Devkit folder relative to the project root.
    #[arg(long, value_name = "DIR", default_value = "devkits")]
    pub devkit_dir: String,

    /// Comma-separated plugin names.
    #[arg(long, value_name = "LIST", default_value = "")]
    pub plugins: String,

    /// Comma-separated Maya versions.
    #[arg(long, value_name = "LIST", default_value = "")]
    pub maya_versions: String,
}

/// Arguments for the add-plugin command.
#[derive(Args, Debug, Clone)]
pub struct AddPluginArgs {
    /// Plugin name (ASCII letters, digits, `_` and `-`).
    #[arg(value_name = "NAME")]
    pub name: String,
}

/// Arguments for the inject command.
#[derive(Args, Debug, Clone)]
#[command(group(
    ArgGroup::new("operation")
        .required(true)
        .args(["between", "after", "before", "replace_line", "replace_string", "replace_all"])
))]
pub struct InjectArgs {
    /// File to edit.
    #[arg(long, value_name = "FILE")]
    pub file: Utf8PathBuf,

    /// Replace the lines between two anchors.
    #[arg(long, num_args = 2, value_names = ["START", "END"])]
    pub between: Option<Vec<String>>,

    /// Insert after the anchor line.
    #[arg(long, value_name = "ANCHOR")]
    pub after: Option<String>,

    /// Insert before the anchor line.
    #[arg(long, value_name = "ANCHOR")]
    pub before: Option<String>,

    /// Replace the anchor line.
    #[arg(long, value_name = "ANCHOR")]
    pub replace_line: Option<String>,

    /// Replace every occurrence of OLD with the first --line value.
    #[arg(long, value_name = "OLD")]
    pub replace_string: Option<String>,

    /// Overwrite the file with the --line values.
    #[arg(long)]
    pub replace_all: bool,

    /// Content line (repeatable); a line terminator is added when missing.
    #[arg(short, long = "line", value_name = "TEXT")]
    pub lines: Vec<String>,

    /// Match anchors as substrings instead of whole lines.
    #[arg(long)]
    pub contains: bool,

    /// Use the last matching anchor instead of the first.
    #[arg(long)]
    pub backward: bool,

    /// Leave the file untouched when it or an anchor is missing.
    #[arg(long)]
    pub strict: bool,

    /// Silence warnings about skipped injections.
    #[arg(long)]
    pub quiet_warnings: bool,
}

impl InjectArgs {
    /// Returns the selected operation.
    ///
    /// clap guarantees exactly one operation flag is present.
    #[must_use]
    pub fn operation(&self) -> Option<InjectOperation> {
        if let Some([start, end]) = self.between.as_deref() {
            return Some(InjectOperation::Between {
                start: start.clone(),
                end: end.clone(),
            });
        }
        if let Some(anchor) = &self.after {
            return Some(InjectOperation::After(anchor.clone()));
        }
        if let Some(anchor) = &self.before {
            return Some(InjectOperation::Before(anchor.clone()));
        }
        if let Some(anchor) = &self.replace_line {
            return Some(InjectOperation::ReplaceLine(anchor.clone()));
        }
        if let Some(old) = &self.replace_string {
            return Some(InjectOperation::ReplaceString(old.clone()));
        }
        self.replace_all.then_some(InjectOperation::ReplaceAll)
    }

    /// Builds the injection request, resolving a relative file against `root`.
    #[must_use]
    pub fn to_request(&self, root: &Utf8Path) -> Option<InjectRequest> {
        let operation = self.operation()?;
        Some(InjectRequest {
            file: root.join(&self.file),
            operation,
            lines: self.lines.clone(),
            mode: if self.contains {
                MatchMode::Contains
            } else {
                MatchMode::Equal
            },
            direction: if self.backward {
                SearchDirection::Backward
            } else {
                SearchDirection::Forward
            },
            force: !self.strict,
            suppress_warnings: self.quiet_warnings,
        })
    }
}

/// Arguments for the module command.
#[derive(Args, Debug, Clone)]
pub struct ModuleArgs {
    /// Write the development module pointing at this checkout.
    #[arg(long)]
    pub dev: bool,

    /// Output file [default: release/modules/<slug>.mod, or
    /// ~/Documents/maya/modules/<slug>_dev.mod with --dev].
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<Utf8PathBuf>,

    /// Print the module to stdout instead of writing a file.
    #[arg(long, conflicts_with = "output")]
    pub print: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
