//! Test harness setup for an existing module (`setup-tests`).
//!
//! Resolves the module's peers into a standalone `test/package.json`,
//! installs it, and links the module into `test/node_modules/` so the
//! harness can `require` it by name.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    application::{
        ApplicationError, RunConfig,
        command::{Command, Completion},
        ports::Filesystem,
        services::{
            DependencyResolver, HostModule, ManifestMerger, ScaffoldExecutor,
            executor::NODE_MODULES,
            install::{BOWER_JSON, PACKAGE_JSON},
        },
    },
    domain::{Manifest, RenderContext, TemplateId},
    error::HoistResult,
};

/// Blueprint for the generated `test/test.js`.
pub const HARNESS_TEMPLATE: &str = "harness/test.js";

const TEST_DIR: &str = "test";
const TEST_ENTRY: &str = "test.js";

#[derive(Debug, Clone, PartialEq)]
pub struct HarnessReport {
    pub module: HostModule,
    pub test_dir: PathBuf,
    /// `test/package.json` as written.
    pub manifest: Manifest,
    pub copied_bower: bool,
    /// False when `test/test.js` already existed.
    pub wrote_entry: bool,
}

pub struct TestHarness {
    resolver: DependencyResolver,
    merger: ManifestMerger,
    executor: ScaffoldExecutor,
    filesystem: Arc<dyn Filesystem>,
}

impl TestHarness {
    pub fn new(
        resolver: DependencyResolver,
        merger: ManifestMerger,
        executor: ScaffoldExecutor,
        filesystem: Arc<dyn Filesystem>,
    ) -> Self {
        Self {
            resolver,
            merger,
            executor,
            filesystem,
        }
    }

    /// The module in `config.working_dir()`; it must carry a `package.json`.
    pub fn module(&self, config: &RunConfig) -> HoistResult<HostModule> {
        let dir = config.working_dir();
        let module = HostModule::from_dir(dir).ok_or_else(|| ApplicationError::InvalidLayout {
            path: dir.to_path_buf(),
            reason: "cannot name a module after this directory".into(),
        })?;

        let manifest = dir.join(PACKAGE_JSON);
        if !self.filesystem.exists(&manifest) {
            return Err(ApplicationError::ManifestNotFound { path: manifest }.into());
        }
        Ok(module)
    }

    #[instrument(skip_all, fields(dir = %config.working_dir().display()))]
    pub fn run(&self, config: &RunConfig) -> HoistResult<HarnessReport> {
        let module = self.module(config)?;
        let module_dir = &module.dir;

        let mut manifest = self.merger.load(&module_dir.join(PACKAGE_JSON))?;
        self.resolver.resolve_peers(&mut manifest)?;
        let manifest = ManifestMerger::merge_into_dependencies(manifest);

        let test_dir = module_dir.join(TEST_DIR);
        self.filesystem.create_dir_all(&test_dir)?;
        self.merger.persist(&test_dir.join(PACKAGE_JSON), &manifest)?;

        let copied_bower = match self.merger.load_optional(&module_dir.join(BOWER_JSON))? {
            Some(bower) => {
                info!(dir = %test_dir.display(), "Copying bower.json");
                self.merger.persist(&test_dir.join(BOWER_JSON), &bower)?;
                true
            }
            None => {
                info!("No bower.json file found");
                false
            }
        };

        self.executor.install_node(&test_dir, config)?;
        self.executor.link(
            module_dir,
            &test_dir.join(NODE_MODULES).join(&module.name),
        )?;

        let wrote_entry = self.executor.render_if_absent(
            &TemplateId::new(HARNESS_TEMPLATE),
            &RenderContext::new(module.name.as_str()),
            &test_dir.join(TEST_ENTRY),
        )?;

        Ok(HarnessReport {
            module,
            test_dir,
            manifest,
            copied_bower,
            wrote_entry,
        })
    }
}

// ============================================================================
// Command
// ============================================================================

/// `hoist setup-tests`.
pub struct SetupTestsCommand {
    harness: TestHarness,
    report: Option<HarnessReport>,
}

impl SetupTestsCommand {
    pub fn new(harness: TestHarness) -> Self {
        Self {
            harness,
            report: None,
        }
    }

    pub fn report(&self) -> Option<&HarnessReport> {
        self.report.as_ref()
    }
}

impl Command for SetupTestsCommand {
    fn name(&self) -> &'static str {
        "setup-tests"
    }

    fn validate(&self, config: &RunConfig) -> HoistResult<()> {
        self.harness.module(config).map(|_| ())
    }

    fn execute(&mut self, config: &RunConfig) -> HoistResult<Completion> {
        self.report = Some(self.harness.run(config)?);
        Ok(Completion::Exit)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::application::command::run_command;
    use crate::application::ports::MockTemplateStore;
    use crate::application::services::test_support::{Entry, FakeFs, recording_runner, registry};
    use crate::domain::{PeerRecord, Template};
    use crate::error::HoistError;

    const MODULE: &str = r#"{
  "name": "widgets",
  "version": "1.0.0",
  "dependencies": { "bedrock": "^1.0.0" },
  "peerDependencies": { "A": "^1.0.0" }
}"#;

    fn command(fs: FakeFs) -> (SetupTestsCommand, Arc<FakeFs>, Arc<Mutex<Vec<String>>>) {
        let fs = Arc::new(fs);
        let filesystem: Arc<dyn Filesystem> = fs.clone();
        let commands = Arc::new(Mutex::new(Vec::new()));

        let mut store = MockTemplateStore::new();
        store.expect_get().returning(|id| {
            Ok(Template::text(
                id.clone(),
                "var bedrock = require('bedrock');\nrequire('$MODULE_NAME');\n",
            ))
        });

        let harness = TestHarness::new(
            DependencyResolver::new(registry(vec![
                PeerRecord::new("A", "1.2.0").with_peer("B", "^2.0.0"),
                PeerRecord::new("B", "2.1.0"),
            ])),
            ManifestMerger::new(filesystem.clone()),
            ScaffoldExecutor::new(
                filesystem.clone(),
                Arc::new(store),
                recording_runner(commands.clone()),
            ),
            filesystem,
        );
        (SetupTestsCommand::new(harness), fs, commands)
    }

    #[test]
    fn builds_standalone_test_environment() {
        let (mut cmd, fs, commands) = command(
            FakeFs::new()
                .with_file("/src/widgets/package.json", MODULE)
                .with_file("/src/widgets/bower.json", r#"{ "name": "widgets" }"#),
        );

        let done = run_command(&mut cmd, &RunConfig::new("/src/widgets")).unwrap();
        assert_eq!(done, Completion::Exit);

        let written =
            Manifest::from_json_str(&fs.file("/src/widgets/test/package.json").unwrap()).unwrap();
        assert_eq!(written.name(), Some("widgets"));
        assert_eq!(written.dependencies()["A"], "1.2.0");
        assert_eq!(written.dependencies()["B"], "2.1.0");
        assert!(written.peer_dependencies().is_empty());
        assert!(
            !fs.file("/src/widgets/test/package.json")
                .unwrap()
                .contains("peerDependencies")
        );

        assert!(fs.file("/src/widgets/test/bower.json").is_some());
        assert_eq!(
            *commands.lock().unwrap(),
            vec!["npm install @ /src/widgets/test".to_string()]
        );
        assert_eq!(
            fs.entry("/src/widgets/test/node_modules/widgets"),
            Some(Entry::Link("/src/widgets".into()))
        );
        assert_eq!(
            fs.file("/src/widgets/test/test.js").as_deref(),
            Some("var bedrock = require('bedrock');\nrequire('widgets');\n")
        );

        let report = cmd.report().unwrap();
        assert!(report.copied_bower);
        assert!(report.wrote_entry);
    }

    #[test]
    fn existing_entry_and_link_are_kept() {
        let (mut cmd, fs, _) = command(
            FakeFs::new()
                .with_file("/src/widgets/package.json", MODULE)
                .with_file("/src/widgets/test/test.js", "// mine\n")
                .with_file("/src/widgets/test/node_modules/widgets", "placeholder"),
        );

        run_command(&mut cmd, &RunConfig::new("/src/widgets")).unwrap();

        assert_eq!(
            fs.file("/src/widgets/test/test.js").as_deref(),
            Some("// mine\n")
        );
        let report = cmd.report().unwrap();
        assert!(!report.wrote_entry);
        assert!(!report.copied_bower);
    }

    #[test]
    fn missing_manifest_fails_validation() {
        let (mut cmd, fs, commands) = command(FakeFs::new().with_dir("/src/empty"));

        let err = run_command(&mut cmd, &RunConfig::new("/src/empty")).unwrap_err();
        assert!(matches!(
            err,
            HoistError::Application(ApplicationError::ManifestNotFound { .. })
        ));
        assert!(fs.entry("/src/empty/test").is_none());
        assert!(commands.lock().unwrap().is_empty());
    }
}
