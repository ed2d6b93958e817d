//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `quizquest <date> (<commit>)`
pub fn version_line() -> String {
    format!("quizquest {} ({})", BUILD_DATE, BUILD_COMMIT)
}
