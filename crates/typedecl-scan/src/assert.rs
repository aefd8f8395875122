//! Test assertions over a scan and a diff.
//!
//! ```ignore
//! #[test]
//! fn every_flag_is_considered() {
//!     assert_no_diff("src/feature", "feature::Flag", feature::all_flags());
//! }
//! ```

use std::path::Path;

use typedecl_core::Declared;

use crate::scanner::all;

/// The parts of a test runner that [`no_diff`] reports through.
pub trait Harness {
    /// Marks the caller as a helper so failures point at the test. No-op
    /// for runners without that notion.
    fn helper(&mut self) {}

    fn log(&mut self, message: &str);

    /// Marks the test as failed without stopping it.
    fn fail(&mut self);
}

/// Scan `module_path` for `type_name` and check that `actual` holds exactly
/// the declared values.
///
/// Scan errors and non-empty diffs are logged to `harness` and fail it.
/// Returns whether the assertion held.
pub fn no_diff<H, I>(
    harness: &mut H,
    module_path: impl AsRef<Path>,
    type_name: &str,
    actual: I,
    failure_message: Option<&str>,
) -> bool
where
    H: Harness + ?Sized,
    I: IntoIterator,
    I::Item: Declared,
{
    harness.helper();

    let collection = match all(module_path, type_name) {
        Ok(c) => c,
        Err(e) => {
            harness.log(&format!("failed to load typedecl::all: {e}"));
            harness.fail();
            return false;
        }
    };

    let diff = collection.diff(actual);
    if diff.is_zero() {
        return true;
    }

    let mut message = String::new();
    if let Some(msg) = failure_message {
        message.push_str(msg);
        message.push('\n');
    }
    message.push_str(&diff.to_string());

    harness.log(&message);
    harness.fail();
    false
}

/// A [`Harness`] for `#[test]` functions: records what was logged and
/// panics from [`finish`](TestHarness::finish) if anything failed.
#[derive(Debug, Default)]
pub struct TestHarness {
    logs: Vec<String>,
    failed: bool,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failed(&self) -> bool {
        self.failed
    }

    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    /// Panics with everything logged if the harness was failed.
    #[track_caller]
    pub fn finish(self) {
        if self.failed {
            panic!("{}", self.logs.join("\n"));
        }
    }
}

impl Harness for TestHarness {
    fn log(&mut self, message: &str) {
        tracing::debug!(message, "assertion log");
        self.logs.push(message.to_string());
    }

    fn fail(&mut self) {
        self.failed = true;
    }
}

/// Panics unless `actual` holds exactly the values declared for
/// `type_name` in `module_path`.
#[track_caller]
pub fn assert_no_diff<I>(module_path: impl AsRef<Path>, type_name: &str, actual: I)
where
    I: IntoIterator,
    I::Item: Declared,
{
    let mut harness = TestHarness::new();
    no_diff(&mut harness, module_path, type_name, actual, None);
    harness.finish();
}
