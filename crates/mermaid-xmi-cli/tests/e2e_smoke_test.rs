use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use mermaid_xmi_cli::{Args, run};

/// Collects all .mmd files from a directory
fn collect_mmd_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("mmd")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Demos are at workspace root, relative to workspace not the crate
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args(input: &Path, output: Option<PathBuf>) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.map(|path| path.to_string_lossy().to_string()),
        name: None,
        config: None,
        log_level: "off".to_string(),
        dump_model: false,
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_demos = collect_mmd_files(demos_path());
    assert!(!valid_demos.is_empty(), "No valid demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let output_filename = format!("{}.xmi", demo_path.file_stem().unwrap().to_string_lossy());
        let output_path = temp_dir.path().join(output_filename);

        match run(&args(demo_path, Some(output_path.clone()))) {
            Ok(()) => {
                let xml = fs::read_to_string(&output_path).expect("Output file was not written");
                assert!(
                    xml.starts_with("<?xml version='1.0' encoding='utf-8'?>\n<uml:Model "),
                    "unexpected output for {}",
                    demo_path.display()
                );
            }
            Err(e) => failed_demos.push((demo_path.clone(), e)),
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo(s) failed unexpectedly", failed_demos.len());
    }

    println!("✅ All {} valid demos passed", valid_demos.len());
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_demos = collect_mmd_files(demos_path().join("errors"));
    assert!(!error_demos.is_empty(), "No error demos found in demos/errors/");

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let output_filename = format!(
            "error_{}.xmi",
            demo_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        if run(&args(demo_path, Some(output_path.clone()))).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
        assert!(
            !output_path.exists(),
            "{} left a partial document behind",
            demo_path.display()
        );
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }

    println!("✅ All {} error demos failed as expected", error_demos.len());
}

#[test]
fn e2e_default_output_next_to_input() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("hld_mermaid.txt");
    fs::copy(demos_path().join("hld_cluster_reflash.mmd"), &input).unwrap();

    run(&args(&input, None)).unwrap();

    let xml = fs::read_to_string(temp_dir.path().join("hld_mermaid.xmi")).unwrap();
    assert!(xml.contains(r#"xmi:type="uml:Interaction""#));
    assert!(xml.contains(r#"name="hld_mermaid""#));
}

#[test]
fn e2e_dump_model_writes_no_output() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("model.xmi");

    let mut args = args(&demos_path().join("notes.mmd"), Some(output.clone()));
    args.dump_model = true;

    run(&args).unwrap();
    assert!(!output.exists());
}

#[test]
fn e2e_refuses_to_overwrite_input() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("sequence.xmi");
    fs::write(&input, "participant A as A\nA->>A: ping\n").unwrap();

    assert!(run(&args(&input, None)).is_err());
    assert_eq!(
        fs::read_to_string(&input).unwrap(),
        "participant A as A\nA->>A: ping\n"
    );
}

#[test]
fn e2e_config_file_is_applied() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config = temp_dir.path().join("config.toml");
    let output = temp_dir.path().join("out.xmi");
    fs::write(
        &config,
        "[export]\nmodel_name = \"FlashModel\"\ndeterministic_ids = true\n",
    )
    .unwrap();

    let mut args = args(&demos_path().join("notes.mmd"), Some(output.clone()));
    args.config = Some(config.to_string_lossy().to_string());
    args.name = Some("Notes".to_string());

    run(&args).unwrap();

    let xml = fs::read_to_string(&output).unwrap();
    assert!(xml.contains(r#"xmi:id="_id1" name="FlashModel""#));
    assert!(xml.contains(r#"xmi:id="_id2" name="Notes""#));
}
