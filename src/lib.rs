pub mod error;
pub mod locate;
pub mod report;
pub mod scheme;

pub use error::{Error, Result};
pub use locate::{SchemeSource, locate_schemes};
pub use report::SkipReport;
pub use scheme::{Testable, parse_scheme};

/// Finds every scheme file reachable from `source`, restricted to `scheme`
/// when given, and folds each file's skipped-test entries into one report.
/// A failure to read or parse any single file aborts the whole run.
pub async fn suppressed_tests(source: &SchemeSource, scheme: Option<&str>) -> Result<SkipReport> {
    let paths = locate_schemes(source, scheme).await?;

    let mut report = SkipReport::default();
    for path in &paths {
        let testables = parse_scheme(path).await?;
        report.add_scheme(&testables);
    }

    Ok(report)
}
