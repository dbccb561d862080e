//! Blueprints compiled into the binary.
//!
//! Each entry is `(logical path, source)`. The logical path is what the
//! planner refers to; it mirrors the file's location under `blueprints/`.

use hoist_core::domain::{DomainError, DomainValidator, Template};
use tracing::{debug, instrument};

macro_rules! blueprints {
    ($($path:literal),* $(,)?) => {
        &[$(($path, include_str!(concat!("../blueprints/", $path)))),*]
    };
}

/// Raw built-in sources.
pub const SOURCES: &[(&str, &str)] = blueprints![
    "README.md",
    "gitignore",
    "package.json",
    "bower.json",
    "bedrock.json",
    "lib/index.js",
    "lib/config.js",
    "components/main.js",
    "app/package.json",
    "app/bower.json",
    "app/run.js",
    "app/configs/config.js",
    "test/test.js",
    "test/package.json",
    "test/bower.json",
    "test/components/main.js",
    "test/protractor/prepare.js",
    "test/protractor/config.js",
    "test/protractor/tests/protractor-test.js",
    "test/protractor/pages/index.js",
    "misc/pseudo-bower.js",
    "harness/test.js",
];

/// Parse every built-in blueprint.
///
/// A malformed built-in is a packaging bug, so the first failure is returned
/// rather than skipped.
#[instrument]
pub fn all_blueprints() -> Result<Vec<Template>, DomainError> {
    let templates = SOURCES
        .iter()
        .map(|(path, source)| {
            let template = Template::from_source(*path, source)?;
            DomainValidator::validate_template(&template)?;
            Ok(template)
        })
        .collect::<Result<Vec<_>, DomainError>>()?;

    debug!(count = templates.len(), "Built-in blueprints parsed");
    Ok(templates)
}
