use crate::helpers::{count, exists, position, TestEnvironment, PAGED_EXPORT, PASSWORD_POLICY};
use policy_audit::ReportBuilder;
use std::fs;

#[test]
fn test_single_policy_report() {
    let env = TestEnvironment::new();
    env.write_export("DeviceConfigurations", "policy_a.json", PASSWORD_POLICY);

    let summary = ReportBuilder::new(env.config()).generate().unwrap();
    let html = env.read_report();

    assert_eq!(summary.categories, 1);
    assert_eq!(summary.files, 1);
    assert_eq!(summary.policies, 1);
    assert_eq!(summary.skipped_files, 0);

    assert!(html.starts_with("<html><head>"));
    assert!(html.ends_with("</body></html>"));
    assert!(html.contains("<h1>DeviceConfigurations</h1>"));
    assert!(html.contains("<h2>Policy A</h2>"));
    assert!(html.contains("<tr><td>Settings / Min Length</td><td>6</td></tr>"));
    assert!(!html.contains("<td>123</td>"));
    assert_eq!(count(&html, "<tr><td>"), 2); // Display Name + Settings / Min Length
}

#[test]
fn test_paged_export_renders_each_item() {
    let env = TestEnvironment::new();
    env.write_export("CompliancePolicies", "all.json", PAGED_EXPORT);

    let summary = ReportBuilder::new(env.config()).generate().unwrap();
    let html = env.read_report();

    assert_eq!(summary.policies, 2);
    assert!(position(&html, "<h2>P1</h2>") < position(&html, "<h2>P2</h2>"));
    assert_eq!(count(&html, "<table>"), 2);
    assert!(!html.contains("odata"));
}

#[test]
fn test_top_level_list_and_file_name_fallback() {
    let env = TestEnvironment::new();
    env.write_export(
        "Scripts",
        "scripts.json",
        r#"[{"fileName": "a.ps1"}, {"displayName": "Named"}, 42]"#,
    );

    let summary = ReportBuilder::new(env.config()).generate().unwrap();
    let html = env.read_report();

    assert_eq!(summary.policies, 2);
    assert!(html.contains("<h2>scripts.json</h2>"));
    assert!(html.contains("<h2>Named</h2>"));
}

#[test]
fn test_list_values() {
    let env = TestEnvironment::new();
    env.write_export("Misc", "tags.json", r#"{"name": "Tagged", "tags": ["a","b","c"]}"#);
    env.write_export("Misc", "rules.json", r#"{"name": "Ruled", "rules": [{"x":1},{"x":2}]}"#);

    ReportBuilder::new(env.config()).generate().unwrap();
    let html = env.read_report();

    assert!(html.contains("<tr><td>Tags</td><td>a, b, c</td></tr>"));
    let pretty = serde_json::to_string_pretty(&serde_json::json!([{"x":1},{"x":2}])).unwrap();
    let expected = format!(
        "<tr><td>Rules</td><td>{}</td></tr>",
        pretty.replace('"', "&quot;")
    );
    assert!(html.contains(&expected));
}

#[test]
fn test_invalid_json_is_skipped() {
    let env = TestEnvironment::new();
    env.write_export("Apps", "a_valid.json", r#"{"displayName": "Valid App"}"#);
    env.write_export("Apps", "b_broken.json", r#"{"displayName": "Broken", "#);
    env.write_export("Apps", "c_valid.json", r#"{"displayName": "Another App"}"#);

    let summary = ReportBuilder::new(env.config()).generate().unwrap();
    let html = env.read_report();

    assert_eq!(summary.files, 2);
    assert_eq!(summary.skipped_files, 1);
    assert_eq!(count(&html, "<h1>Apps</h1>"), 1);
    assert!(html.contains("<h2>Valid App</h2>"));
    assert!(html.contains("<h2>Another App</h2>"));
    assert!(!html.contains("Broken"));
}

#[test]
fn test_root_files_and_empty_folders_are_not_categories() {
    let env = TestEnvironment::new();
    fs::write(env.input_root.join("root.json"), r#"{"displayName": "At Root"}"#).unwrap();
    fs::create_dir_all(env.input_root.join("Empty")).unwrap();
    env.write_export("NoJson", "readme.txt", "not a policy");

    let summary = ReportBuilder::new(env.config()).generate().unwrap();
    let html = env.read_report();

    assert_eq!(summary.categories, 0);
    assert!(!html.contains("At Root"));
    assert!(!html.contains("<h1>"));
}

#[test]
fn test_nested_folders_become_own_categories() {
    let env = TestEnvironment::new();
    env.write_export("Configuration", "outer.json", r#"{"displayName": "Outer"}"#);
    env.write_export("Configuration/Windows", "inner.json", r#"{"displayName": "Inner"}"#);
    env.write_export("Autopilot", "profile.json", r#"{"displayName": "Profile"}"#);

    let summary = ReportBuilder::new(env.config()).generate().unwrap();
    let html = env.read_report();

    assert_eq!(summary.categories, 3);
    let autopilot = position(&html, "<h1>Autopilot</h1>");
    let configuration = position(&html, "<h1>Configuration</h1>");
    let windows = position(&html, "<h1>Windows</h1>");
    assert!(autopilot < configuration);
    assert!(configuration < position(&html, "<h2>Outer</h2>"));
    assert!(position(&html, "<h2>Outer</h2>") < windows);
    assert!(windows < position(&html, "<h2>Inner</h2>"));
}

#[test]
fn test_markup_in_data_is_escaped() {
    let env = TestEnvironment::new();
    env.write_export(
        "<Category & Co>",
        "x.json",
        r#"{"displayName": "<b>Bold</b>", "script": "if (a < b && c > d) { echo 'hi' }"}"#,
    );

    ReportBuilder::new(env.config()).generate().unwrap();
    let html = env.read_report();

    assert!(html.contains("<h1>&lt;Category &amp; Co&gt;</h1>"));
    assert!(html.contains("<h2>&lt;b&gt;Bold&lt;/b&gt;</h2>"));
    assert!(html.contains("<td>if (a &lt; b &amp;&amp; c &gt; d) { echo &#39;hi&#39; }</td>"));
    assert!(!html.contains("<b>Bold</b>"));
}

#[test]
fn test_custom_ignore_keys_and_title() {
    let env = TestEnvironment::new();
    env.write_export(
        "Policies",
        "p.json",
        r#"{"displayName": "P", "id": "kept now", "secretValue": "hidden"}"#,
    );

    let mut config = env.config();
    config.ignore_keys = vec!["secret".to_string()];
    config.title = "Tenant & Audit".to_string();

    ReportBuilder::new(config).generate().unwrap();
    let html = env.read_report();

    assert!(html.contains("<td>kept now</td>"));
    assert!(!html.contains("hidden"));
    assert!(html.contains("Tenant &amp; Audit</div>"));
}

#[test]
fn test_creates_output_directory_and_overwrites() {
    let env = TestEnvironment::new();
    env.write_export("Policies", "p.json", PASSWORD_POLICY);
    assert!(!exists(env.output_path.parent().unwrap()));

    ReportBuilder::new(env.config()).generate().unwrap();
    assert!(exists(&env.output_path));

    fs::write(&env.output_path, "stale").unwrap();
    ReportBuilder::new(env.config()).generate().unwrap();
    assert!(!env.read_report().contains("stale"));
}

#[test]
fn test_build_does_not_write() {
    let env = TestEnvironment::new();
    env.write_export("Policies", "p.json", PASSWORD_POLICY);

    let report = ReportBuilder::new(env.config()).build().unwrap();
    assert!(report.html.contains("<h2>Policy A</h2>"));
    assert!(!exists(&env.output_path));
}

#[test]
fn test_report_lists_source_folder() {
    let env = TestEnvironment::new();
    ReportBuilder::new(env.config()).generate().unwrap();
    let html = env.read_report();

    assert!(html.contains(&format!("<p>Source Data: {}</p>", env.input_root.display())));
    assert!(env.temp_dir.path().exists());
}
