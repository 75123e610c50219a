use crate::scheme::Testable;
use serde::Serialize;
use std::collections::BTreeSet;

/// Accumulated suppressed-test identifiers across every scheme file parsed.
/// Entries are `"<testable name>/<test identifier>"`; the set collapses the
/// same pair appearing in more than one scheme file.
#[derive(Debug, Default, Serialize)]
pub struct SkipReport {
    pub schemes: usize,
    pub suppressed: BTreeSet<String>,
}

impl SkipReport {
    pub fn add_scheme(&mut self, testables: &[Testable]) {
        self.schemes += 1;
        for testable in testables {
            for identifier in &testable.skipped_tests {
                self.suppressed
                    .insert(format!("{}/{}", testable.name, identifier));
            }
        }
    }
}
