// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

#![no_main]

use libfuzzer_sys::fuzz_target;
use procommit::services::analyzer::DiffAnalyzer;
use procommit::services::sanitizer::{CommitSanitizer, NormalizeOptions};

const DIFF: &str = "diff --git a/src/api/client.ts b/src/api/client.ts
--- a/src/api/client.ts
+++ b/src/api/client.ts
@@ -1,0 +1,1 @@
+export async function fetchUser(id: string) {
";

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        let analysis = DiffAnalyzer::analyze(DIFF);
        for include_file_extension in [true, false] {
            let opts = NormalizeOptions {
                include_file_extension,
                analysis: &analysis,
            };
            let message = CommitSanitizer::sanitize(raw, &opts);
            assert!(!message.contains('\n'));
        }
    }
});
