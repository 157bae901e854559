//! Behaviour-driven tests for project scaffolding.
//!
//! These scenarios run initialisation, plugin registration and release
//! workflow templating against a freshly generated project layout.

use blueprint_installer::definitions::{Definitions, DevkitMap, ProjectInfo};
use blueprint_installer::error::{InstallerError, Result as InstallerResult};
use blueprint_installer::init::{
    InitReport, InitRequest, initialise_project, parse_plugin_list, split_list,
};
use blueprint_installer::plugin::{PluginName, add_plugin};
use blueprint_installer::release_ci::inject_release_ci;
use blueprint_installer::workspace::ProjectLayout;
use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use std::fs;
use tempfile::TempDir;

const ROOT_CMAKE: &str = concat!(
    "cmake_minimum_required(VERSION 3.22)\n",
    "project(hello LANGUAGES CXX)\n",
    "\n",
    "# Plugin Subdirectories\n",
);

const WORKFLOW: &str = concat!(
    "name: release\n",
    "jobs:\n",
    "  windows:\n",
    "    strategy:\n",
    "      matrix:\n",
    "        include:\n",
    "          # WINDOWS DEVKITS[START]\n",
    "          # WINDOWS DEVKITS[END]\n",
    "  linux:\n",
    "    strategy:\n",
    "      matrix:\n",
    "        include:\n",
    "          # LINUX DEVKITS[START]\n",
    "          # LINUX DEVKITS[END]\n",
    "  linux-gcc9:\n",
    "    strategy:\n",
    "      matrix:\n",
    "        include:\n",
    "          # LINUX GCC9 DEVKITS[START]\n",
    "          # LINUX GCC9 DEVKITS[END]\n",
    "    runs-on: ubuntu-latest\n",
);

// ---------------------------------------------------------------------------
// Scaffold world
// ---------------------------------------------------------------------------

#[derive(Default)]
struct ScaffoldWorld {
    dir: RefCell<Option<TempDir>>,
    layout: RefCell<Option<ProjectLayout>>,
    definitions: RefCell<Definitions>,
    result: RefCell<Option<InstallerResult<InitReport>>>,
}

impl ScaffoldWorld {
    fn layout(&self) -> ProjectLayout {
        self.layout.borrow().clone().expect("project not generated")
    }

    fn read(&self, path: &Utf8PathBuf) -> String {
        fs::read_to_string(path).expect("failed to read project file")
    }

    fn report(&self) -> InitReport {
        match self.result.borrow().as_ref().expect("no result recorded") {
            Ok(report) => report.clone(),
            Err(err) => panic!("initialisation failed: {err}"),
        }
    }
}

#[fixture]
fn scaffold_world() -> ScaffoldWorld {
    ScaffoldWorld::default()
}

#[given("a generated project")]
fn given_generated_project(scaffold_world: &ScaffoldWorld) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("temp dir not UTF-8");
    let layout = ProjectLayout::new(root);

    fs::write(layout.root_cmake(), ROOT_CMAKE).expect("failed to write root build file");
    let template = layout.template_dir();
    fs::create_dir_all(&template).expect("failed to create template");
    fs::write(
        template.join("CMakeLists.txt"),
        "add_library(--BLUEPRINT--PLUGIN_NAME-- SHARED main.cpp)\n",
    )
    .expect("failed to write template build file");
    fs::write(template.join("main.cpp"), "// entry point\n").expect("failed to write source");
    fs::create_dir_all(layout.src_dir()).expect("failed to create src");
    let ci = layout.release_ci_file();
    fs::create_dir_all(ci.parent().expect("workflow has a parent")).expect("workflow dir");
    fs::write(&ci, WORKFLOW).expect("failed to write workflow");

    scaffold_world.layout.replace(Some(layout));
    scaffold_world.dir.replace(Some(dir));
}

#[given("a release workflow without devkit markers")]
fn given_workflow_without_markers(scaffold_world: &ScaffoldWorld) {
    fs::write(
        scaffold_world.layout().release_ci_file(),
        "name: release\njobs: {}\n",
    )
    .expect("failed to write workflow");
}

#[given("definitions with the Windows devkit \"{version}\" at \"{url}\"")]
fn given_windows_devkit(scaffold_world: &ScaffoldWorld, version: String, url: String) {
    scaffold_world.definitions.replace(Definitions {
        windows_devkits: [(version, url)].into_iter().collect::<DevkitMap>(),
        ..Definitions::default()
    });
}

#[given("an existing plugin folder \"{name}\"")]
fn given_existing_plugin(scaffold_world: &ScaffoldWorld, name: String) {
    let folder = scaffold_world.layout().src_dir().join(name);
    fs::create_dir_all(&folder).expect("failed to create plugin folder");
    fs::write(folder.join("CMakeLists.txt"), "# hand written\n").expect("failed to write");
}

#[when("the project is initialised with plugins \"{plugins}\" and Maya versions \"{versions}\"")]
fn when_initialised(scaffold_world: &ScaffoldWorld, plugins: String, versions: String) {
    let request = InitRequest {
        project: ProjectInfo {
            slug: "hello".to_owned(),
            name: "Hello".to_owned(),
            devkit_dir: "devkits".to_owned(),
        },
        plugins: parse_plugin_list(&plugins).expect("invalid plugin list"),
        maya_versions: split_list(&versions),
    };
    let result = initialise_project(&scaffold_world.layout(), &request);
    scaffold_world.result.replace(Some(result));
}

#[when("the release workflow is templated")]
fn when_workflow_templated(scaffold_world: &ScaffoldWorld) {
    let definitions = scaffold_world.definitions.borrow();
    inject_release_ci(&scaffold_world.layout().release_ci_file(), &definitions)
        .expect("templating failed");
}

#[when("the plugin \"{name}\" is added")]
fn when_plugin_added(scaffold_world: &ScaffoldWorld, name: String) {
    let layout = scaffold_world.layout();
    let name = PluginName::parse(&name).expect("invalid plugin name");
    add_plugin(
        &name,
        &layout.root_cmake(),
        &layout.template_dir(),
        &layout.src_dir(),
    )
    .expect("failed to add plugin");
}

#[then("the root build file registers \"{a}\" and \"{b}\"")]
fn then_registers_two(scaffold_world: &ScaffoldWorld, a: String, b: String) {
    let root = scaffold_world.read(&scaffold_world.layout().root_cmake());
    for name in [a, b] {
        assert_eq!(
            root.matches(&format!("add_subdirectory(src/{name})\n")).count(),
            1,
            "{name} should be registered once in:\n{root}"
        );
        let plugin_cmake = scaffold_world
            .layout()
            .src_dir()
            .join(&name)
            .join("CMakeLists.txt");
        assert_eq!(
            scaffold_world.read(&plugin_cmake),
            format!("add_library({name} SHARED main.cpp)\n")
        );
    }
}

#[then("the root build file registers the plugin \"{name}\"")]
fn then_registers_one(scaffold_world: &ScaffoldWorld, name: String) {
    let root = scaffold_world.read(&scaffold_world.layout().root_cmake());
    assert!(root.contains(&format!("# Plugin Subdirectories\nadd_subdirectory(src/{name})\n")));
}

#[then("the definitions target Maya \"{versions}\"")]
fn then_definitions_target(scaffold_world: &ScaffoldWorld, versions: String) {
    let expected = split_list(&versions);
    assert_eq!(scaffold_world.report().definitions.target_maya_versions, expected);

    let saved = Definitions::load(&scaffold_world.layout().definitions_file())
        .expect("definitions were not saved");
    assert_eq!(saved.target_maya_versions, expected);
    assert_eq!(saved.project_slug, "hello");
}

#[then("every devkit section of the release workflow lists {count} versions")]
fn then_sections_list(scaffold_world: &ScaffoldWorld, count: usize) {
    let workflow = scaffold_world.read(&scaffold_world.layout().release_ci_file());
    assert_eq!(workflow.matches("          - maya: ").count(), count * 3);
    assert_eq!(workflow.matches("            devkit: \"https://").count(), count * 3);
}

#[then("the Windows section holds exactly the \"{version}\" devkit at \"{url}\"")]
fn then_windows_section(scaffold_world: &ScaffoldWorld, version: String, url: String) {
    let workflow = scaffold_world.read(&scaffold_world.layout().release_ci_file());
    let expected = format!(concat!(
        "          # WINDOWS DEVKITS[START]\n",
        "          - maya: \"{version}\"\n",
        "            devkit: \"{url}\"\n",
        "          # WINDOWS DEVKITS[END]\n",
    ), version = version, url = url);
    assert!(workflow.contains(&expected), "unexpected workflow:\n{workflow}");
}

#[then("the lines outside the devkit sections are untouched")]
fn then_outside_untouched(scaffold_world: &ScaffoldWorld) {
    let workflow = scaffold_world.read(&scaffold_world.layout().release_ci_file());
    let without_block: String = workflow
        .lines()
        .filter(|line| !line.contains("- maya: ") && !line.contains("devkit: "))
        .map(|line| format!("{line}\n"))
        .collect();
    assert_eq!(without_block, WORKFLOW);
}

#[then("initialisation fails naming the \"{category}\" markers")]
fn then_fails_naming(scaffold_world: &ScaffoldWorld, category: String) {
    let result = scaffold_world.result.borrow();
    let Some(Err(err)) = result.as_ref() else {
        panic!("expected initialisation to fail");
    };
    assert!(
        matches!(err, InstallerError::CiMarkers { category: found, .. } if *found == category),
        "unexpected error: {err}"
    );
    assert!(err.to_string().contains(&format!("{category} DEVKITS[START]")));
}

#[then("the plugin folder \"{name}\" keeps its contents")]
fn then_folder_kept(scaffold_world: &ScaffoldWorld, name: String) {
    let folder = scaffold_world.layout().src_dir().join(name);
    assert_eq!(
        scaffold_world.read(&folder.join("CMakeLists.txt")),
        "# hand written\n"
    );
    assert!(!folder.join("main.cpp").exists());
}

// ---------------------------------------------------------------------------
// Scenario bindings
// ---------------------------------------------------------------------------

#[scenario(path = "tests/features/scaffold.feature", index = 0)]
fn scenario_initialise_generated_project(scaffold_world: ScaffoldWorld) {
    let _ = scaffold_world;
}

#[scenario(path = "tests/features/scaffold.feature", index = 1)]
fn scenario_unknown_versions_skipped(scaffold_world: ScaffoldWorld) {
    let _ = scaffold_world;
}

#[scenario(path = "tests/features/scaffold.feature", index = 2)]
fn scenario_fill_windows_section(scaffold_world: ScaffoldWorld) {
    let _ = scaffold_world;
}

#[scenario(path = "tests/features/scaffold.feature", index = 3)]
fn scenario_abort_without_markers(scaffold_world: ScaffoldWorld) {
    let _ = scaffold_world;
}

#[scenario(path = "tests/features/scaffold.feature", index = 4)]
fn scenario_keep_existing_plugin(scaffold_world: ScaffoldWorld) {
    let _ = scaffold_world;
}
