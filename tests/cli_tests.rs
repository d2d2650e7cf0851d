use std::process::Command;

fn brrtcoerce(args: &[&str]) -> (bool, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_brrtcoerce"))
        .args(args)
        .env_remove("BRRTC_SCHEMA")
        .env("BRRTC_LOG_LEVEL", "error")
        .output()
        .expect("run cli");
    (
        output.status.success(),
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}

#[test]
fn test_cli_coerce_prints_json() {
    let (ok, stdout, _) = brrtcoerce(&["coerce", "--type", "[number]", "-d", ",|", r#"["1","2","3"]"#]);
    assert!(ok);
    assert_eq!(stdout.trim(), "[1,2,3]");
}

#[test]
fn test_cli_invoke_with_demo_schema() {
    let (ok, stdout, _) = brrtcoerce(&[
        "invoke",
        "--schema",
        "demos/methods.yaml",
        "--method",
        "find_products",
        "--path",
        "/products?ids=4|5&sku=0099",
        "--header",
        "Tenant: acme",
    ]);
    assert!(ok);
    let args: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(
        args,
        serde_json::json!({"ids": [4, 5], "sku": "0099", "tenant": "acme"})
    );
}

#[test]
fn test_cli_schema_from_env() {
    let output = Command::new(env!("CARGO_BIN_EXE_brrtcoerce"))
        .arg("check")
        .env("BRRTC_SCHEMA", "demos/methods.yaml")
        .env("BRRTC_LOG_LEVEL", "error")
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("find_products"));
    assert!(stdout.contains("3 method(s) OK"));
}

#[test]
fn test_cli_unknown_method_fails() {
    let (ok, stdout, stderr) = brrtcoerce(&[
        "invoke",
        "--schema",
        "demos/methods.yaml",
        "--method",
        "nope",
    ]);
    assert!(!ok);
    assert!(stdout.is_empty());
    assert!(stderr.contains("nope"));
}
