//! Scaffold Planner - decides which blueprints a module gets.
//!
//! ## Decision table
//!
//! | flags        | README/.gitignore | lib/ | bower.json, main.js      | test/ | app/ |
//! |--------------|-------------------|------|--------------------------|-------|------|
//! | (none)       | yes               | yes  | yes, under `components/` | yes   | yes  |
//! | `bower-only` | yes               | no   | yes, at the root         | yes   | no   |
//! | `node-only`  | yes               | yes  | no                       | yes   | no   |
//! | `plugin`     | yes               | yes  | yes, under `components/` | yes   | no   |
//!
//! Directories are always emitted before the files they hold.

use serde_json::Value;

use crate::domain::{
    FileAction, JsonOverride, ModeFlags, ModuleName, RelativePath, RenderContext, ScaffoldPlan,
    TemplateId,
};

/// Blueprint injected into `test/test.js` for bower-only modules.
pub const PSEUDO_BOWER_TEMPLATE: &str = "misc/pseudo-bower.js";

/// Protractor config referenced from `bedrock.json`.
const PROTRACTOR_CONFIG: &str = "./test/protractor/config.js";

const PROTRACTOR_PACKAGE: &str = "bedrock-protractor";
const PROTRACTOR_RANGE: &str = "^3.0.0";

pub struct ScaffoldPlanner;

impl ScaffoldPlanner {
    pub fn plan(name: &ModuleName, flags: ModeFlags) -> ScaffoldPlan {
        let mut builder = PlanBuilder {
            plan: ScaffoldPlan::new(RelativePath::new(name.as_str())),
            context: RenderContext::new(name.as_str()),
        };

        builder.common();
        if flags.includes_node() {
            builder.node(name);
        }
        if flags.includes_bower() {
            builder.bower(name, flags);
        }
        builder.test(name, flags);
        if flags.includes_app() {
            builder.app(name);
        }

        builder.plan
    }
}

struct PlanBuilder {
    plan: ScaffoldPlan,
    context: RenderContext,
}

impl PlanBuilder {
    fn dir(&mut self, path: &str) {
        self.plan.push(FileAction::MakeDir(RelativePath::new(path)));
    }

    fn render(&mut self, template: &str, dest: &str) {
        let context = self.context.clone();
        self.render_with(template, dest, context);
    }

    fn render_with(&mut self, template: &str, dest: &str, context: RenderContext) {
        self.plan.push(FileAction::RenderTemplate {
            template: TemplateId::new(template),
            dest: RelativePath::new(dest),
            context,
        });
    }

    fn json(&mut self, template: &str, dest: &str, overrides: Vec<JsonOverride>) {
        self.plan.push(FileAction::WriteJson {
            template: TemplateId::new(template),
            dest: RelativePath::new(dest),
            overrides,
        });
    }

    // ── Trees ──────────────────────────────────────────────────────────

    fn common(&mut self) {
        self.render("gitignore", ".gitignore");
        self.render("README.md", "README.md");
    }

    fn node(&mut self, name: &ModuleName) {
        self.json(
            "package.json",
            "package.json",
            vec![
                set("name", name.as_str()),
                set("description", format!("{name} module")),
            ],
        );
        self.dir("lib");
        self.render("lib/index.js", "lib/index.js");
        self.render("lib/config.js", "lib/config.js");
    }

    fn bower(&mut self, name: &ModuleName, flags: ModeFlags) {
        self.json("bower.json", "bower.json", vec![set("name", name.as_str())]);
        self.json(
            "bedrock.json",
            "bedrock.json",
            vec![set("config", PROTRACTOR_CONFIG)],
        );

        if flags.flattens_components() {
            self.render("components/main.js", "main.js");
        } else {
            self.dir("components");
            self.render("components/main.js", "components/main.js");
        }
    }

    fn test(&mut self, name: &ModuleName, flags: ModeFlags) {
        let test_name = name.suffixed("test");
        self.dir("test");

        let mut package = vec![
            set("name", test_name.as_str()),
            set("description", format!("{test_name} test module")),
        ];
        let mut test_context = self.context.clone().with_text(RenderContext::PSEUDO_BOWER, "");

        if flags.includes_bower() {
            package.push(JsonOverride::set(
                ["devDependencies", PROTRACTOR_PACKAGE],
                PROTRACTOR_RANGE,
            ));
            self.protractor();

            let mut bower = vec![set("name", test_name.as_str())];
            if flags.bower_only() {
                self.dir("test/components");
                self.render("test/components/main.js", "test/components/main.js");
                test_context = test_context
                    .with_template(RenderContext::PSEUDO_BOWER, PSEUDO_BOWER_TEMPLATE);
                bower.push(set("main", "./main.js"));
            }
            self.json("test/bower.json", "test/bower.json", bower);
        }

        self.json("test/package.json", "test/package.json", package);
        self.render_with("test/test.js", "test/test.js", test_context);
    }

    fn protractor(&mut self) {
        self.dir("test/protractor");
        self.dir("test/protractor/pages");
        self.dir("test/protractor/tests");
        self.render("test/protractor/prepare.js", "test/protractor/prepare.js");
        self.render("test/protractor/config.js", "test/protractor/config.js");
        self.render(
            "test/protractor/tests/protractor-test.js",
            "test/protractor/tests/protractor-test.js",
        );
        self.render(
            "test/protractor/pages/index.js",
            "test/protractor/pages/index.js",
        );
    }

    fn app(&mut self, name: &ModuleName) {
        let app_name = name.suffixed("app");
        self.dir("app");
        self.json("app/package.json", "app/package.json", vec![set("name", app_name.as_str())]);
        self.json("app/bower.json", "app/bower.json", vec![set("name", app_name.as_str())]);
        self.render("app/run.js", "app/run.js");
        self.dir("app/configs");
        self.render("app/configs/config.js", "app/configs/config.js");
    }
}

fn set(key: &str, value: impl Into<Value>) -> JsonOverride {
    JsonOverride::set([key], value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Substitution;

    fn plan(flags: (bool, bool, bool)) -> ScaffoldPlan {
        let name = ModuleName::parse("myModule").unwrap();
        let flags = ModeFlags::new(flags.0, flags.1, flags.2).unwrap();
        ScaffoldPlanner::plan(&name, flags)
    }

    fn json_overrides<'a>(plan: &'a ScaffoldPlan, dest: &str) -> &'a [JsonOverride] {
        plan.actions()
            .iter()
            .find_map(|a| match a {
                FileAction::WriteJson {
                    dest: d, overrides, ..
                } if d.as_path() == std::path::Path::new(dest) => Some(overrides.as_slice()),
                _ => None,
            })
            .unwrap_or_else(|| panic!("no json action for {dest}"))
    }

    fn test_js_context(plan: &ScaffoldPlan) -> RenderContext {
        plan.actions()
            .iter()
            .find_map(|a| match a {
                FileAction::RenderTemplate { dest, context, .. }
                    if dest.as_path() == std::path::Path::new("test/test.js") =>
                {
                    Some(context.clone())
                }
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn default_plan_contains_minimum_tree() {
        let plan = plan((false, false, false));
        for path in [
            "myModule/README.md",
            "myModule/.gitignore",
            "myModule/lib/index.js",
            "myModule/lib/config.js",
            "myModule/bower.json",
            "myModule/components/main.js",
            "myModule/test/test.js",
            "myModule/app/run.js",
        ] {
            assert!(plan.contains(path), "missing {path}");
        }
        plan.validate().unwrap();
    }

    #[test]
    fn readme_and_gitignore_come_first() {
        let plan = plan((true, false, true));
        let first: Vec<_> = plan
            .actions()
            .iter()
            .take(2)
            .map(|a| a.dest().to_string())
            .collect();
        assert_eq!(first, vec![".gitignore", "README.md"]);
    }

    #[test]
    fn every_flag_combination_yields_a_valid_plan() {
        for plugin in [false, true] {
            for (bower, node) in [(false, false), (true, false), (false, true)] {
                plan((plugin, bower, node)).validate().unwrap();
            }
        }
    }

    #[test]
    fn node_only_has_no_bower_artifacts() {
        let plan = plan((false, false, true));
        assert!(plan.contains("myModule/package.json"));
        assert!(plan.contains("myModule/lib/index.js"));
        assert!(!plan.paths().any(|p| p.ends_with("bower.json")));
        assert!(!plan.contains("myModule/components"));
        assert!(!plan.contains("myModule/test/protractor"));
        assert!(!plan.contains("myModule/app"));

        let package = json_overrides(&plan, "test/package.json");
        assert!(package.iter().all(|o| o.path[0] != "devDependencies"));
    }

    #[test]
    fn bower_only_flattens_main_and_wires_pseudo_bower() {
        let plan = plan((false, true, false));
        assert!(plan.contains("myModule/main.js"));
        assert!(!plan.contains("myModule/components"));
        assert!(!plan.contains("myModule/lib"));
        assert!(!plan.contains("myModule/package.json"));
        assert!(plan.contains("myModule/test/components/main.js"));
        assert!(!plan.contains("myModule/app"));

        let bower = json_overrides(&plan, "test/bower.json");
        assert!(bower.contains(&set("main", "./main.js")));

        assert_eq!(
            test_js_context(&plan).get(RenderContext::PSEUDO_BOWER),
            Some(&Substitution::Template(TemplateId::new(PSEUDO_BOWER_TEMPLATE)))
        );
    }

    #[test]
    fn default_test_js_blanks_pseudo_bower() {
        let plan = plan((false, false, false));
        assert_eq!(
            test_js_context(&plan).get(RenderContext::PSEUDO_BOWER),
            Some(&Substitution::Text(String::new()))
        );
    }

    #[test]
    fn plugin_skips_app_tree_only() {
        let plan = plan((true, false, false));
        assert!(!plan.paths().any(|p| p.starts_with("myModule/app")));
        assert!(plan.contains("myModule/components/main.js"));
        assert!(plan.contains("myModule/test/protractor/config.js"));
    }

    #[test]
    fn manifests_carry_derived_names() {
        let plan = plan((false, false, false));
        assert!(json_overrides(&plan, "package.json").contains(&set("description", "myModule module")));
        assert!(json_overrides(&plan, "test/package.json").contains(&set("name", "myModule-test")));
        assert!(json_overrides(&plan, "test/package.json").contains(&JsonOverride::set(
            ["devDependencies", "bedrock-protractor"],
            "^3.0.0"
        )));
        assert!(json_overrides(&plan, "app/bower.json").contains(&set("name", "myModule-app")));
        assert!(json_overrides(&plan, "bedrock.json").contains(&set("config", PROTRACTOR_CONFIG)));
    }
}
