//! Blueprint CLI entrypoint.
//!
//! This binary initialises generated Maya plugin projects, registers new
//! plugins, applies anchor-based edits and writes Maya module files.

use blueprint_installer::cli::{AddPluginArgs, Cli, Command, InitArgs, InjectArgs, ModuleArgs};
use blueprint_installer::definitions::{Definitions, ProjectInfo};
use blueprint_installer::dirs::{BaseDirs, SystemBaseDirs};
use blueprint_installer::error::{InstallerError, Result};
use blueprint_installer::init::{InitRequest, initialise_project, parse_plugin_list, split_list};
use blueprint_installer::inject::run_inject;
use blueprint_installer::logging;
use blueprint_installer::module_file::{
    default_dev_module_path, dev_deploy_hint, dev_module, read_project_version, release_module,
    release_module_path, write_module,
};
use blueprint_installer::output::{inject_summary, plugin_summary, success_message};
use blueprint_installer::platform::Platform;
use blueprint_installer::plugin::{PluginName, add_plugin};
use blueprint_installer::workspace::{ProjectLayout, resolve_root};
use camino::Utf8PathBuf;
use clap::Parser;
use std::io::Write;

/// Exit code for an `inject` that left the file untouched.
const EXIT_SKIPPED: i32 = 2;

fn main() {
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    if logging::init(cli.verbosity, cli.quiet).is_err() {
        write_stderr_line(&mut stderr, "warning: logger already installed");
    }
    let mut stdout = std::io::stdout();
    let run_result = run(&cli, &SystemBaseDirs, &mut stdout, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(
    cli: &Cli,
    dirs: &dyn BaseDirs,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<()> {
    let layout = ProjectLayout::new(resolve_root(cli.root())?);
    match &cli.command {
        Command::Init(args) => run_init(&layout, args, cli.quiet, stderr),
        Command::AddPlugin(args) => run_add_plugin(&layout, args, cli.quiet, stderr),
        Command::Inject(args) => run_inject_command(&layout, args, cli.quiet, stderr),
        Command::Module(args) => run_module(&layout, args, dirs, cli.quiet, stdout, stderr),
    }
}

fn run_init(
    layout: &ProjectLayout,
    args: &InitArgs,
    quiet: bool,
    stderr: &mut dyn Write,
) -> Result<()> {
    let request = InitRequest {
        project: ProjectInfo {
            slug: args.slug.clone(),
            name: args.name.clone(),
            devkit_dir: args.devkit_dir.clone(),
        },
        plugins: parse_plugin_list(&args.plugins)?,
        maya_versions: split_list(&args.maya_versions),
    };

    let report = initialise_project(layout, &request)?;

    if !quiet {
        for registration in &report.registrations {
            write_stderr_line(stderr, plugin_summary(registration));
        }
        write_stderr_line(stderr, success_message(&report, layout.root()));
    }
    Ok(())
}

fn run_add_plugin(
    layout: &ProjectLayout,
    args: &AddPluginArgs,
    quiet: bool,
    stderr: &mut dyn Write,
) -> Result<()> {
    let name = PluginName::parse(&args.name)?;
    let registration = add_plugin(
        &name,
        &layout.root_cmake(),
        &layout.template_dir(),
        &layout.src_dir(),
    )?;
    if !quiet {
        write_stderr_line(stderr, plugin_summary(&registration));
    }
    Ok(())
}

fn run_inject_command(
    layout: &ProjectLayout,
    args: &InjectArgs,
    quiet: bool,
    stderr: &mut dyn Write,
) -> Result<()> {
    let Some(request) = args.to_request(layout.root()) else {
        // clap enforces an operation; nothing to do without one.
        return Ok(());
    };
    let outcome = run_inject(&request)?;
    if !quiet {
        write_stderr_line(stderr, inject_summary(&request.file, outcome));
    }
    if let Some(reason) = outcome.skip_reason() {
        return Err(InstallerError::InjectionSkipped {
            path: request.file,
            reason,
        });
    }
    Ok(())
}

fn run_module(
    layout: &ProjectLayout,
    args: &ModuleArgs,
    dirs: &dyn BaseDirs,
    quiet: bool,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<()> {
    let definitions = Definitions::load(&layout.definitions_file())?;
    let version = read_project_version(layout.root())?;

    let content = if args.dev {
        dev_module(&definitions, &version, layout.root())
    } else {
        release_module(&definitions, &version)
    };

    if args.print {
        return stdout
            .write_all(content.as_bytes())
            .map_err(|source| InstallerError::WriteFailed { source });
    }

    let path = module_output_path(layout, args, dirs, &definitions.project_slug)?;
    write_module(&path, &content)?;
    if !quiet {
        write_stderr_line(stderr, format!("Generated module file at {path}."));
        let hint = Platform::current()
            .filter(|_| args.dev)
            .and_then(|platform| dev_deploy_hint(&definitions, platform));
        if let Some(hint) = hint {
            write_stderr_line(stderr, hint);
        }
    }
    Ok(())
}

fn module_output_path(
    layout: &ProjectLayout,
    args: &ModuleArgs,
    dirs: &dyn BaseDirs,
    slug: &str,
) -> Result<Utf8PathBuf> {
    match &args.output {
        Some(path) => Ok(layout.root().join(path)),
        None if args.dev => default_dev_module_path(dirs, slug),
        None => Ok(release_module_path(layout.root(), slug)),
    }
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        // Already reported by the inject summary and the injector warning.
        Err(InstallerError::InjectionSkipped { .. }) => EXIT_SKIPPED,
        Err(err) => {
            write_stderr_line(stderr, format!("error: {err}"));
            1
        }
    }
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}
