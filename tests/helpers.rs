// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

/// Unified diff block for a modified file
#[allow(dead_code)]
pub fn modified_file(path: &str, added: &[&str], removed: &[&str]) -> String {
    let mut out = format!(
        "diff --git a/{path} b/{path}\nindex 1111111..2222222 100644\n--- a/{path}\n+++ b/{path}\n@@ -1,{} +1,{} @@\n",
        removed.len(),
        added.len()
    );
    for line in removed {
        out.push_str(&format!("-{line}\n"));
    }
    for line in added {
        out.push_str(&format!("+{line}\n"));
    }
    out
}

/// Unified diff block for a newly added file
#[allow(dead_code)]
pub fn new_file(path: &str, added: &[&str]) -> String {
    let mut out = format!(
        "diff --git a/{path} b/{path}\nnew file mode 100644\nindex 0000000..2222222\n--- /dev/null\n+++ b/{path}\n@@ -0,0 +1,{} @@\n",
        added.len()
    );
    for line in added {
        out.push_str(&format!("+{line}\n"));
    }
    out
}

/// Unified diff block for a deleted file
#[allow(dead_code)]
pub fn deleted_file(path: &str, removed: &[&str]) -> String {
    let mut out = format!(
        "diff --git a/{path} b/{path}\ndeleted file mode 100644\nindex 2222222..0000000\n--- a/{path}\n+++ /dev/null\n@@ -1,{} +0,0 @@\n",
        removed.len()
    );
    for line in removed {
        out.push_str(&format!("-{line}\n"));
    }
    out
}

/// Pure rename without content changes
#[allow(dead_code)]
pub fn renamed_file(from: &str, to: &str) -> String {
    format!(
        "diff --git a/{from} b/{to}\nsimilarity index 100%\nrename from {from}\nrename to {to}\n"
    )
}

/// `fetchUser` added to `src/api/client.ts`
#[allow(dead_code)]
pub fn client_ts_diff() -> String {
    modified_file(
        "src/api/client.ts",
        &[
            "export async function fetchUser(id: string) {",
            "  return http.get(`/users/${id}`);",
            "}",
        ],
        &[],
    )
}
