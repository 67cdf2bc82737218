// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

#![no_main]

use libfuzzer_sys::fuzz_target;
use procommit::domain::{MAX_IDENTIFIERS, MAX_PRIMARY_FILES};
use procommit::services::analyzer::DiffAnalyzer;
use procommit::services::context::ContextBuilder;

fuzz_target!(|data: &[u8]| {
    if let Ok(diff) = std::str::from_utf8(data) {
        let analysis = DiffAnalyzer::analyze(diff);
        assert!(analysis.files.len() <= MAX_PRIMARY_FILES);
        assert!(analysis.primary_identifiers.len() <= MAX_IDENTIFIERS);

        let context = ContextBuilder::build(diff);
        assert!(context.user_prompt.starts_with("DIFF_SUMMARY"));
    }
});
