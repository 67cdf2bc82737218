// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

mod helpers;

use helpers::{client_ts_diff, deleted_file, modified_file, new_file, renamed_file};
use procommit::domain::{ChangeKind, CommitType, FileSummary, MAX_PRIMARY_FILES};
use procommit::services::analyzer::DiffAnalyzer;

fn summary(path: &str, change: ChangeKind) -> FileSummary {
    let mut file = FileSummary::new(path, None);
    file.change = change;
    file
}

// ─── Parsing ─────────────────────────────────────────────────────────────────

#[test]
fn empty_input_yields_empty_analysis() {
    let analysis = DiffAnalyzer::analyze("");
    assert!(analysis.is_empty());
    assert!(analysis.primary_identifiers.is_empty());
    assert_eq!(analysis.scope_hint, None);
    assert_eq!(analysis.type_hint, None);
}

#[test]
fn non_diff_text_yields_empty_analysis() {
    let analysis = DiffAnalyzer::analyze("just some notes\n+ not a diff\n");
    assert!(analysis.is_empty());
}

#[test]
fn counts_exclude_headers_and_blank_lines() {
    let diff = modified_file(
        "src/lib.rs",
        &["fn alpha() {}", "   ", "fn beta() {}"],
        &["fn gamma() {}", ""],
    );
    let files = DiffAnalyzer::parse_files(&diff);

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].path, "src/lib.rs");
    assert_eq!(files[0].additions, 2);
    assert_eq!(files[0].deletions, 1);
    assert_eq!(files[0].change, ChangeKind::Modified);
}

#[test]
fn new_and_deleted_markers() {
    let diff = format!(
        "{}{}",
        new_file("src/new.py", &["def handler():", "    pass"]),
        deleted_file("src/old.py", &["def legacy():"])
    );
    let files = DiffAnalyzer::parse_files(&diff);

    assert_eq!(files[0].change, ChangeKind::Added);
    assert_eq!(files[1].change, ChangeKind::Deleted);
    assert_eq!(files[0].identifiers, vec!["handler"]);
    assert_eq!(files[1].identifiers, vec!["legacy"]);
}

#[test]
fn rename_detection() {
    let files = DiffAnalyzer::parse_files(&renamed_file("a/x.ts", "b/y.ts"));

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].change, ChangeKind::Renamed);
    assert_eq!(files[0].old_path.as_deref(), Some("a/x.ts"));
    assert_eq!(files[0].path, "b/y.ts");
}

#[test]
fn rename_needs_both_markers() {
    let diff = "diff --git a/x.ts b/x.ts\nrename from x.ts\n";
    let files = DiffAnalyzer::parse_files(diff);
    assert_eq!(files[0].change, ChangeKind::Modified);
}

// ─── Identifier extraction ───────────────────────────────────────────────────

#[test]
fn extracts_typescript_function() {
    let analysis = DiffAnalyzer::analyze(&client_ts_diff());
    assert_eq!(analysis.primary_identifiers, vec!["fetchUser"]);
}

#[test]
fn extracts_declarations_per_language() {
    let cases = [
        ("export class TokenStore {", "ts", "TokenStore"),
        ("interface Session {", "tsx", "Session"),
        ("const loadUser = async (id) => {", "js", "loadUser"),
        ("class Parser:", "py", "Parser"),
        ("func (s *Server) Serve() error {", "go", "Serve"),
        ("pub fn refresh_token() {", "rs", "refresh_token"),
        ("public interface Repository {", "java", "Repository"),
    ];

    for (line, ext, expected) in cases {
        let found = DiffAnalyzer::extract_identifiers(line, ext);
        assert!(
            found.iter().any(|id| id == expected),
            "{line:?} ({ext}) should yield {expected}, got {found:?}"
        );
    }
}

#[test]
fn unknown_extension_extracts_nothing() {
    assert!(DiffAnalyzer::extract_identifiers("function hidden() {}", "txt").is_empty());
}

#[test]
fn identifiers_are_deduplicated_and_capped() {
    let lines: Vec<String> = (0..20).map(|i| format!("fn handler_{i}() {{}}")).collect();
    let mut refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    refs.push("fn handler_0() {}");
    let analysis = DiffAnalyzer::analyze(&modified_file("src/many.rs", &refs, &[]));

    assert_eq!(analysis.primary_identifiers.len(), 14);
    assert_eq!(analysis.primary_identifiers[0], "handler_0");
    assert_eq!(analysis.primary_identifiers[13], "handler_13");
}

// ─── Config keys and dependencies ────────────────────────────────────────────

#[test]
fn extracts_config_keys_by_format() {
    assert_eq!(
        DiffAnalyzer::extract_config_keys("API_BASE_URL=https://x", ".env"),
        vec!["API_BASE_URL"]
    );
    assert_eq!(
        DiffAnalyzer::extract_config_keys("DEBUG=1", "config/.env.local"),
        vec!["DEBUG"]
    );
    assert_eq!(
        DiffAnalyzer::extract_config_keys("  retry_count: 3", "deploy/app.yaml"),
        vec!["retry_count"]
    );
    assert_eq!(
        DiffAnalyzer::extract_config_keys("timeout_secs = 30", "Cargo.toml"),
        vec!["timeout_secs"]
    );
    assert_eq!(
        DiffAnalyzer::extract_config_keys(r#"  "strict": true,"#, "tsconfig.json"),
        vec!["strict"]
    );
    assert!(DiffAnalyzer::extract_config_keys("KEY=1", "src/main.rs").is_empty());
}

#[test]
fn extracts_manifest_dependencies() {
    assert_eq!(
        DiffAnalyzer::extract_dependencies(r#"    "axios": "^1.6.0","#, "package.json"),
        vec!["axios"]
    );
    assert_eq!(
        DiffAnalyzer::extract_dependencies(r#"    "@types/node": "^20.0.0","#, "web/package.json"),
        vec!["@types/node"]
    );
}

#[test]
fn skips_own_settings_in_manifest() {
    let found =
        DiffAnalyzer::extract_dependencies(r#"    "procommit.language": "English","#, "package.json");
    assert!(found.is_empty());
}

#[test]
fn pooled_keys_and_dependencies() {
    let diff = format!(
        "{}{}",
        modified_file(".env", &["API_KEY=abc", "API_KEY=def"], &[]),
        modified_file("package.json", &[r#"    "zod": "^3.22.0","#], &[])
    );
    let analysis = DiffAnalyzer::analyze(&diff);

    assert_eq!(analysis.config_keys(), vec!["API_KEY", "zod"]);
    assert_eq!(analysis.dependencies(), vec!["zod"]);
}

// ─── Ranking ─────────────────────────────────────────────────────────────────

#[test]
fn primary_files_ranked_by_weight_and_capped() {
    let mut diff = String::new();
    for i in 0..15 {
        let lines: Vec<String> = (0..=i).map(|n| format!("line {n}")).collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        diff.push_str(&modified_file(&format!("notes/file{i}.txt"), &refs, &[]));
    }

    let analysis = DiffAnalyzer::analyze(&diff);
    assert_eq!(analysis.files.len(), MAX_PRIMARY_FILES);
    assert_eq!(analysis.files[0].path, "notes/file14.txt");
    assert_eq!(analysis.files[11].path, "notes/file3.txt");
}

#[test]
fn equal_weights_keep_diff_order() {
    let diff = format!(
        "{}{}",
        modified_file("b.txt", &["x"], &[]),
        modified_file("a.txt", &["y"], &[])
    );
    let analysis = DiffAnalyzer::analyze(&diff);
    assert_eq!(analysis.files[0].path, "b.txt");
    assert_eq!(analysis.files[1].path, "a.txt");
}

// ─── Scope hint ──────────────────────────────────────────────────────────────

#[test]
fn single_file_scope_is_basename() {
    let analysis = DiffAnalyzer::analyze(&client_ts_diff());
    assert_eq!(analysis.scope_hint.as_deref(), Some("client.ts"));
}

#[test]
fn recurring_top_level_directory_wins() {
    let files = vec![
        summary("web/a.ts", ChangeKind::Modified),
        summary("api/b.ts", ChangeKind::Modified),
        summary("web/c.ts", ChangeKind::Modified),
    ];
    assert_eq!(DiffAnalyzer::infer_scope(&files).as_deref(), Some("web"));
}

#[test]
fn src_directory_is_not_a_scope() {
    let files = vec![
        summary("src/a.rs", ChangeKind::Modified),
        summary("src/b.rs", ChangeKind::Modified),
    ];
    assert_eq!(DiffAnalyzer::infer_scope(&files).as_deref(), Some("a.rs"));
}

#[test]
fn no_recurring_directory_falls_back_to_first_basename() {
    let files = vec![
        summary("web/a.ts", ChangeKind::Modified),
        summary("api/b.ts", ChangeKind::Modified),
    ];
    assert_eq!(DiffAnalyzer::infer_scope(&files).as_deref(), Some("a.ts"));
}

#[test]
fn empty_files_have_no_scope() {
    assert_eq!(DiffAnalyzer::infer_scope(&[]), None);
}

// ─── Type hint ───────────────────────────────────────────────────────────────

#[test]
fn type_hint_priorities() {
    let cases: Vec<(Vec<FileSummary>, Option<CommitType>)> = vec![
        (
            vec![
                summary("README.md", ChangeKind::Modified),
                summary("docs/guide.txt", ChangeKind::Added),
            ],
            Some(CommitType::Docs),
        ),
        (
            vec![
                summary(".github/workflows/ci.yml", ChangeKind::Modified),
                summary("src/main.rs", ChangeKind::Modified),
            ],
            Some(CommitType::Ci),
        ),
        (
            vec![summary("src/api/client.test.ts", ChangeKind::Added)],
            Some(CommitType::Test),
        ),
        (
            vec![
                summary("package.json", ChangeKind::Modified),
                summary("src/index.ts", ChangeKind::Modified),
            ],
            Some(CommitType::Chore),
        ),
        (
            vec![
                summary("config/app.yaml", ChangeKind::Modified),
                summary("Cargo.toml", ChangeKind::Modified),
            ],
            Some(CommitType::Chore),
        ),
        (
            vec![summary("src/feature.rs", ChangeKind::Added)],
            Some(CommitType::Feat),
        ),
        (vec![summary("src/lib.rs", ChangeKind::Modified)], None),
        (vec![], None),
    ];

    for (files, expected) in cases {
        assert_eq!(
            DiffAnalyzer::infer_commit_type(&files),
            expected,
            "files: {:?}",
            files.iter().map(|f| &f.path).collect::<Vec<_>>()
        );
    }
}

#[test]
fn config_mixed_with_code_is_not_chore() {
    let files = vec![
        summary("config/app.yaml", ChangeKind::Modified),
        summary("src/lib.rs", ChangeKind::Modified),
    ];
    assert_eq!(DiffAnalyzer::infer_commit_type(&files), None);
}
