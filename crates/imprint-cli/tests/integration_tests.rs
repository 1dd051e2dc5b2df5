//! Integration tests for CLI commands
//!
//! These drive the binary through the offline (generate) pipeline; the apply
//! pipeline needs a live cluster and is exercised separately.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Run imprint in a working directory with the given stdin
fn imprint_in(dir: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_imprint"))
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn imprint");
    child
        .stdin
        .as_mut()
        .expect("stdin piped")
        .write_all(stdin.as_bytes())
        .expect("failed to write stdin");
    child.wait_with_output().expect("failed to wait for imprint")
}

/// Initialize a project named `myproj`, declining the repo prompt
fn setup_project(root: &Path) -> PathBuf {
    let output = imprint_in(root, &["init", "myproj"], "n\n");
    assert!(
        output.status.success(),
        "init failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    root.join("myproj")
}

fn version_dirs(repo: &Path, namespace: &str) -> Vec<PathBuf> {
    let parent = repo.join("manifests").join(namespace);
    let mut dirs: Vec<PathBuf> = fs::read_dir(&parent)
        .unwrap_or_else(|e| panic!("no manifests dir {}: {e}", parent.display()))
        .filter_map(|entry| {
            let entry = entry.unwrap();
            entry.file_type().unwrap().is_dir().then(|| entry.path())
        })
        .collect();
    dirs.sort();
    dirs
}

mod init_command {
    use super::*;

    #[test]
    fn test_init_writes_project_marker() {
        let tmp = tempfile::tempdir().unwrap();
        let project = setup_project(tmp.path());
        assert!(project.join(".imprint").is_file());
    }

    #[test]
    fn test_init_refuses_existing_project() {
        let tmp = tempfile::tempdir().unwrap();
        let project = setup_project(tmp.path());

        let output = imprint_in(&project, &["init", "nested"], "n\n");
        assert!(!output.status.success());
    }
}

mod new_and_add_commands {
    use super::*;

    #[test]
    fn test_new_creates_repo_layout() {
        let tmp = tempfile::tempdir().unwrap();
        let project = setup_project(tmp.path());

        let output = imprint_in(&project, &["new", "backend"], "");
        assert!(output.status.success());
        assert!(project.join("backend/templates").is_dir());
        assert!(project.join("backend/manifests").is_dir());
        assert!(project.join("backend/config.json").is_file());
    }

    #[test]
    fn test_new_outside_project_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let output = imprint_in(tmp.path(), &["new", "backend"], "");
        assert!(!output.status.success());
    }

    #[test]
    fn test_add_writes_starter_templates() {
        let tmp = tempfile::tempdir().unwrap();
        let project = setup_project(tmp.path());
        imprint_in(&project, &["new", "backend"], "");

        let output = imprint_in(
            &project,
            &["add", "deployment", "service", "-r", "backend"],
            "",
        );
        assert!(output.status.success());
        assert!(project.join("backend/templates/default/deployment.yaml").is_file());
        assert!(project.join("backend/templates/default/service.yaml").is_file());
    }

    #[test]
    fn test_add_unknown_component_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let project = setup_project(tmp.path());
        imprint_in(&project, &["new", "backend"], "");

        let output = imprint_in(&project, &["add", "statefulset", "-r", "backend"], "");
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("skipping"));
        assert!(!project.join("backend/templates/default/statefulset.yaml").exists());
    }

    #[test]
    fn test_remove_deletes_template() {
        let tmp = tempfile::tempdir().unwrap();
        let project = setup_project(tmp.path());
        imprint_in(&project, &["new", "backend"], "");
        imprint_in(&project, &["add", "service", "-r", "backend"], "");

        let output = imprint_in(&project, &["remove", "service", "-r", "backend"], "");
        assert!(output.status.success());
        assert!(!project.join("backend/templates/default/service.yaml").exists());
    }
}

mod generate_command {
    use super::*;

    /// Set up a repo with a staging template and a minimal config
    fn setup_staging_repo(project: &Path) -> PathBuf {
        imprint_in(project, &["new", "backend"], "");
        let repo = project.join("backend");
        fs::write(
            repo.join("config.json"),
            r#"{"name": "demo", "namespace": "staging"}"#,
        )
        .unwrap();
        let templates = repo.join("templates/staging");
        fs::create_dir_all(&templates).unwrap();
        fs::write(
            templates.join("service.yaml"),
            "name: {{ name }}\nnamespace: {{ namespace }}\n",
        )
        .unwrap();
        repo
    }

    #[test]
    fn test_generate_end_to_end() {
        let tmp = tempfile::tempdir().unwrap();
        let project = setup_project(tmp.path());
        let repo = setup_staging_repo(&project);

        let output = imprint_in(&project, &["generate", "-n", "staging", "-r", "backend"], "");
        assert!(
            output.status.success(),
            "generate failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let versions = version_dirs(&repo, "staging");
        assert_eq!(versions.len(), 1);

        let files: Vec<_> = fs::read_dir(&versions[0]).unwrap().collect();
        assert_eq!(files.len(), 1);

        let rendered = fs::read_to_string(versions[0].join("service.yaml")).unwrap();
        assert!(rendered.contains("name: demo"));
        assert!(rendered.contains("namespace: staging"));
    }

    #[test]
    fn test_generate_twice_never_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let project = setup_project(tmp.path());
        let repo = setup_staging_repo(&project);

        let args = ["generate", "-n", "staging", "-r", "backend"];
        assert!(imprint_in(&project, &args, "").status.success());
        assert!(imprint_in(&project, &args, "").status.success());

        assert_eq!(version_dirs(&repo, "staging").len(), 2);
    }

    #[test]
    fn test_generate_missing_config_exits_2() {
        let tmp = tempfile::tempdir().unwrap();
        let project = setup_project(tmp.path());
        let repo = setup_staging_repo(&project);
        fs::remove_file(repo.join("config.json")).unwrap();

        let output = imprint_in(&project, &["generate", "-n", "staging", "-r", "backend"], "");
        assert_eq!(output.status.code(), Some(2));
    }

    #[test]
    fn test_generate_empty_config_exits_2() {
        let tmp = tempfile::tempdir().unwrap();
        let project = setup_project(tmp.path());
        let repo = setup_staging_repo(&project);
        fs::write(repo.join("config.json"), "{}").unwrap();

        let output = imprint_in(&project, &["generate", "-n", "staging", "-r", "backend"], "");
        assert_eq!(output.status.code(), Some(2));
    }

    #[test]
    fn test_generate_template_failure_leaves_no_partial_file() {
        let tmp = tempfile::tempdir().unwrap();
        let project = setup_project(tmp.path());
        let repo = setup_staging_repo(&project);
        fs::write(
            repo.join("templates/staging/service.yaml"),
            "value: {{ absent_key }}\n",
        )
        .unwrap();

        let output = imprint_in(&project, &["generate", "-n", "staging", "-r", "backend"], "");
        assert_eq!(output.status.code(), Some(3));

        // The version directory exists but holds no corrupt artifact
        let versions = version_dirs(&repo, "staging");
        assert_eq!(versions.len(), 1);
        assert!(!versions[0].join("service.yaml").exists());
    }

    #[test]
    fn test_generate_bad_template_does_not_block_siblings() {
        let tmp = tempfile::tempdir().unwrap();
        let project = setup_project(tmp.path());
        let repo = setup_staging_repo(&project);
        fs::write(
            repo.join("templates/staging/broken.yaml"),
            "value: {{ absent_key }}\n",
        )
        .unwrap();

        let output = imprint_in(&project, &["generate", "-n", "staging", "-r", "backend"], "");
        assert_eq!(output.status.code(), Some(3));

        let versions = version_dirs(&repo, "staging");
        assert!(versions[0].join("service.yaml").is_file());
        assert!(!versions[0].join("broken.yaml").exists());
    }

    #[test]
    fn test_generate_missing_template_dir_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let project = setup_project(tmp.path());
        imprint_in(&project, &["new", "backend"], "");

        let output = imprint_in(&project, &["generate", "-n", "staging", "-r", "backend"], "");
        assert!(!output.status.success());
    }

    #[test]
    fn test_ambiguous_config_prompts_for_choice() {
        let tmp = tempfile::tempdir().unwrap();
        let project = setup_project(tmp.path());
        let repo = setup_staging_repo(&project);
        fs::write(repo.join("config.yaml"), "name: demo\nnamespace: staging\n").unwrap();

        let output = imprint_in(
            &project,
            &["generate", "-n", "staging", "-r", "backend"],
            "2\n",
        );
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("config.json"));
        assert!(stdout.contains("config.yaml"));
        assert!(stdout.contains("selected: config.yaml"));
    }

    #[test]
    fn test_ambiguous_config_bad_selection_exits_64() {
        let tmp = tempfile::tempdir().unwrap();
        let project = setup_project(tmp.path());
        let repo = setup_staging_repo(&project);
        fs::write(repo.join("config.yaml"), "name: demo\n").unwrap();

        let output = imprint_in(
            &project,
            &["generate", "-n", "staging", "-r", "backend"],
            "yaml\n",
        );
        assert_eq!(output.status.code(), Some(64));
    }

    #[test]
    fn test_explicit_format_skips_prompt() {
        let tmp = tempfile::tempdir().unwrap();
        let project = setup_project(tmp.path());
        let repo = setup_staging_repo(&project);
        fs::write(repo.join("config.yaml"), "name: demo\nnamespace: staging\n").unwrap();

        let output = imprint_in(
            &project,
            &["generate", "-n", "staging", "-r", "backend", "-f", "yaml"],
            "",
        );
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("config.yaml"));
    }
}

mod list_command {
    use super::*;

    #[test]
    fn test_list_shows_latest_marker() {
        let tmp = tempfile::tempdir().unwrap();
        let project = setup_project(tmp.path());
        imprint_in(&project, &["new", "backend"], "");
        let repo = project.join("backend");
        let templates = repo.join("templates/default");
        fs::create_dir_all(&templates).unwrap();
        fs::write(templates.join("cm.yaml"), "name: {{ name }}\n").unwrap();

        assert!(
            imprint_in(&project, &["generate", "-r", "backend"], "")
                .status
                .success()
        );

        let output = imprint_in(&project, &["list", "-r", "backend"], "");
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("(latest)"));
    }

    #[test]
    fn test_list_empty_namespace() {
        let tmp = tempfile::tempdir().unwrap();
        let project = setup_project(tmp.path());
        imprint_in(&project, &["new", "backend"], "");

        let output = imprint_in(&project, &["list", "-n", "staging", "-r", "backend"], "");
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("no manifest versions"));
    }
}
