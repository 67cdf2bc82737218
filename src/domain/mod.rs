// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

mod analysis;
mod change;
mod commit;
mod context;
mod language;

pub use analysis::*;
pub use change::*;
pub use commit::*;
pub use context::*;
pub use language::*;
