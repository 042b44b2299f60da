use std::fs;
use std::path::Path;

use bundle_publish::cli::{self, Commands, PublishArgs, PublishFlow, PublishOutcome, PublishStep};
use bundle_publish::command::{CommandOutput, MockRunner};
use bundle_publish::config::{Config, PathsConfig, Settings};
use bundle_publish::error::ReleaseError;
use bundle_publish::ui::ScriptedInput;
use tempfile::TempDir;

const CLEAN_COMMANDS: [&str; 5] = [
    "rm -f ./package-lock.json",
    "rm -f -R ./node_modules",
    "rm -f -R ./dist",
    "npm install",
    "npm run build",
];

/// Settings pointing the manifest and docs into a temporary project.
fn project(version_json: &str, readme: &str) -> (TempDir, Settings) {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("package.json");
    let docs = dir.path().join("README.md");
    fs::write(&manifest, version_json).unwrap();
    fs::write(&docs, readme).unwrap();

    let config = Config {
        paths: PathsConfig {
            manifest: path_str(&manifest),
            docs: path_str(&docs),
            ..PathsConfig::default()
        },
        ..Config::default()
    };
    (dir, Settings::from_config(&config))
}

fn path_str(path: &Path) -> String {
    path.to_str().unwrap().to_string()
}

fn publish_args(version: &str) -> PublishArgs {
    PublishArgs {
        new_version: Some(version.to_string()),
        ..PublishArgs::default()
    }
}

fn branch_runner() -> MockRunner {
    let runner = MockRunner::new();
    runner.respond("git rev-parse", CommandOutput::ok("main\n"));
    runner
}

#[test]
fn test_clean_flow_runs_deletes_then_build() {
    let runner = MockRunner::new();
    let mut input = ScriptedInput::default();

    cli::run(&Commands::CleanBuild, &Settings::default(), &runner, &mut input).unwrap();

    assert_eq!(runner.commands(), CLEAN_COMMANDS);
}

#[test]
fn test_stderr_does_not_abort_flow() {
    let runner = MockRunner::new();
    runner.respond(
        "npm install",
        CommandOutput::ok("ok").with_stderr("warning: x"),
    );
    let mut input = ScriptedInput::default();

    assert!(cli::run(&Commands::CleanBuild, &Settings::default(), &runner, &mut input).is_ok());
    assert_eq!(runner.count("npm run build"), 1);
}

#[test]
fn test_command_error_aborts_remaining_steps() {
    let runner = MockRunner::new();
    runner.fail_on("rm -f -R ./node_modules");
    let mut input = ScriptedInput::default();

    let err = cli::run(&Commands::CleanBuild, &Settings::default(), &runner, &mut input)
        .unwrap_err();

    assert!(matches!(err, ReleaseError::CommandExecution { .. }));
    assert_eq!(
        runner.commands(),
        vec!["rm -f ./package-lock.json", "rm -f -R ./node_modules"]
    );
}

#[test]
fn test_publish_success_path() {
    let (_dir, settings) = project(
        r#"{"name":"utils","version":"1.2.0"}"#,
        "# utils 1.2.0\nnpm i utils@1.2.0\n",
    );
    let runner = branch_runner();
    let mut input = ScriptedInput::default();
    let args = PublishArgs {
        new_version: Some("1.3.0".to_string()),
        any_branch: Some("true".to_string()),
        tag: Some("beta".to_string()),
    };

    let outcome = PublishFlow::new(&runner, &mut input, &settings, &args).run();

    let release = match outcome {
        PublishOutcome::Published(release) => release,
        other => panic!("expected success, got {other:?}"),
    };
    assert_eq!(release.current_version, "1.2.0");
    assert_eq!(release.new_version, "1.3.0");
    assert!(input.prompts().is_empty());

    let mut expected: Vec<String> = CLEAN_COMMANDS.iter().map(|c| c.to_string()).collect();
    expected.push(format!(
        "doxdox './dist/**/*.js' --output {} --ignore './dist/cjs/**/*.js' --package {} --layout markdown",
        settings.docs_path, settings.manifest_path
    ));
    expected.push("git rev-parse --abbrev-ref HEAD".to_string());
    expected.push(format!("git add {}", settings.docs_path));
    expected.push("git commit -m \"📝 docs: Updated docs for 1.3.0\"".to_string());
    expected.push("git push -u origin main".to_string());
    expected.push("np 1.3.0 --any-branch --tag=beta".to_string());
    assert_eq!(runner.commands(), expected);

    assert_eq!(runner.count("git restore"), 0);
    assert_eq!(runner.count("git checkout"), 0);

    let readme = fs::read_to_string(&settings.docs_path).unwrap();
    assert_eq!(readme, "# utils 1.3.0\nnpm i utils@1.3.0\n");
}

#[test]
fn test_publish_without_flags_keeps_placeholders() {
    let (_dir, settings) = project(r#"{"version":"1.2.0"}"#, "1.2.0");
    let runner = branch_runner();
    let mut input = ScriptedInput::default();

    let outcome = PublishFlow::new(&runner, &mut input, &settings, &publish_args("1.3.0")).run();

    assert!(outcome.is_published());
    assert_eq!(
        runner.commands().last().map(String::as_str),
        Some("np 1.3.0  ")
    );
}

#[test]
fn test_publish_prompts_when_version_missing() {
    let (_dir, settings) = project(r#"{"version":"1.2.0"}"#, "1.2.0");
    let runner = branch_runner();
    let mut input = ScriptedInput::new(["2.0.0"]);

    let outcome = PublishFlow::new(&runner, &mut input, &settings, &PublishArgs::default()).run();

    assert!(outcome.is_published());
    assert_eq!(input.prompts().len(), 1);
    assert_eq!(fs::read_to_string(&settings.docs_path).unwrap(), "2.0.0");
}

#[test]
fn test_doc_generation_failure_reverts_once() {
    let (_dir, settings) = project(r#"{"version":"1.2.0"}"#, "1.2.0");
    let runner = branch_runner();
    runner.fail_on("doxdox");
    let mut input = ScriptedInput::default();

    let outcome = PublishFlow::new(&runner, &mut input, &settings, &publish_args("1.3.0")).run();

    match outcome {
        PublishOutcome::Reverted {
            step,
            error,
            revert_error,
        } => {
            assert_eq!(step, PublishStep::GenerateDocs);
            assert!(matches!(error, ReleaseError::DocGeneration(_)));
            assert!(revert_error.is_none());
        }
        other => panic!("expected revert, got {other:?}"),
    }

    let files = format!("{} {}", settings.docs_path, settings.manifest_path);
    let commands = runner.commands();
    let tail: Vec<&str> = commands.iter().rev().take(2).rev().map(String::as_str).collect();
    assert_eq!(
        tail,
        vec![
            format!("git restore --staged {}", files),
            format!("git checkout -- {}", files),
        ]
    );
    assert_eq!(runner.count("git restore --staged"), 1);
    assert_eq!(runner.count("git checkout --"), 1);
    assert_eq!(runner.count("git commit"), 0);
    assert_eq!(runner.count("np "), 0);
}

#[test]
fn test_run_reports_publish_failure() {
    let (_dir, settings) = project(r#"{"version":"1.2.0"}"#, "1.2.0");
    let runner = branch_runner();
    runner.fail_on("doxdox");
    let mut input = ScriptedInput::default();
    let command = Commands::Publish(publish_args("1.3.0"));

    let result = cli::run(&command, &settings, &runner, &mut input);

    assert!(matches!(result, Err(ReleaseError::DocGeneration(_))));
}

#[test]
fn test_malformed_manifest_reverts_without_building() {
    let (_dir, settings) = project("{ broken", "");
    let runner = MockRunner::new();
    let mut input = ScriptedInput::default();

    let outcome = PublishFlow::new(&runner, &mut input, &settings, &publish_args("1.3.0")).run();

    assert!(matches!(
        outcome,
        PublishOutcome::Reverted {
            step: PublishStep::ReadManifest,
            error: ReleaseError::ManifestParse { .. },
            ..
        }
    ));
    assert_eq!(runner.count("npm"), 0);
    assert_eq!(runner.commands().len(), 2);
}

#[test]
fn test_failed_revert_is_reported_not_retried() {
    let (_dir, settings) = project(r#"{"version":"1.2.0"}"#, "1.2.0");
    let runner = branch_runner();
    runner.fail_on("npm run build");
    runner.fail_on("git restore");
    let mut input = ScriptedInput::default();

    let outcome = PublishFlow::new(&runner, &mut input, &settings, &publish_args("1.3.0")).run();

    match outcome {
        PublishOutcome::Reverted {
            step, revert_error, ..
        } => {
            assert_eq!(step, PublishStep::Clean);
            assert!(revert_error.is_some());
        }
        other => panic!("expected revert, got {other:?}"),
    }
    assert_eq!(runner.count("git restore"), 1);
    assert_eq!(runner.count("git checkout"), 0);
}

#[test]
fn test_publisher_exit_code_one_fails() {
    let (_dir, settings) = project(r#"{"version":"1.2.0"}"#, "1.2.0");
    let runner = branch_runner();
    runner.set_interactive_exit(Some(1));
    let mut input = ScriptedInput::default();

    let outcome = PublishFlow::new(&runner, &mut input, &settings, &publish_args("1.3.0")).run();

    assert!(matches!(
        outcome,
        PublishOutcome::Reverted {
            step: PublishStep::Publish,
            error: ReleaseError::ProcessExit { code: 1, .. },
            ..
        }
    ));
}

#[test]
fn test_publisher_exit_code_two_succeeds() {
    let (_dir, settings) = project(r#"{"version":"1.2.0"}"#, "1.2.0");
    let runner = branch_runner();
    runner.set_interactive_exit(Some(2));
    let mut input = ScriptedInput::default();

    let outcome = PublishFlow::new(&runner, &mut input, &settings, &publish_args("1.3.0")).run();

    assert!(outcome.is_published());
}

#[test]
fn test_manifest_without_version_leaves_docs_untouched() {
    let (_dir, settings) = project(r#"{"name":"utils"}"#, "docs for utils");
    let runner = branch_runner();
    let mut input = ScriptedInput::default();

    let outcome = PublishFlow::new(&runner, &mut input, &settings, &publish_args("1.0.0")).run();

    assert!(outcome.is_published());
    assert_eq!(
        fs::read_to_string(&settings.docs_path).unwrap(),
        "docs for utils"
    );
}
