use serde::{Deserialize, Serialize};

/// One configured invocation of the tool under test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub args: Vec<String>,

    /// Run the command but leave no trace in the report.
    #[serde(default)]
    pub omit_from_report: bool,

    /// Wipe the tool's cache directory before running.
    #[serde(default)]
    pub clean_cache: bool,

    /// Run with the configured target directory as working directory.
    #[serde(default)]
    pub run_in_target_directory: bool,
}

impl CommandSpec {
    pub fn new<I, S>(name: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: Some(name.to_string()),
            args: args.into_iter().map(Into::into).collect(),
            omit_from_report: false,
            clean_cache: false,
            run_in_target_directory: false,
        }
    }

    pub fn omitted(mut self) -> Self {
        self.omit_from_report = true;
        self
    }

    pub fn cleaning_cache(mut self) -> Self {
        self.clean_cache = true;
        self
    }

    pub fn in_target_directory(mut self) -> Self {
        self.run_in_target_directory = true;
        self
    }

    /// Merge key for the persisted report.
    ///
    /// Unnamed commands fall back to the JSON array encoding of their
    /// arguments, which keeps order and quoting unambiguous.
    pub fn identity(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => encode_args(&self.args),
        }
    }
}

pub fn encode_args(args: &[String]) -> String {
    serde_json::to_string(args).unwrap_or_else(|_| args.join(" "))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfig {
    #[serde(default = "default_tool")]
    pub tool: String,

    #[serde(default)]
    pub install_dir: Option<String>,

    #[serde(default = "default_install_candidates")]
    pub install_candidates: Vec<String>,

    #[serde(default)]
    pub target_dir: Option<String>,

    #[serde(default = "default_target_candidates")]
    pub target_candidates: Vec<String>,

    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,

    #[serde(default = "default_report_file")]
    pub report_file: String,

    #[serde(default = "default_commands")]
    pub commands: Vec<CommandSpec>,
}

fn default_tool() -> String {
    "apm".to_string()
}

fn default_install_candidates() -> Vec<String> {
    vec!["~/src/atom/apm".into(), "~/src/apm".into()]
}

fn default_target_candidates() -> Vec<String> {
    vec!["~/src/atom/github".into(), "~/src/github".into()]
}

fn default_cache_dir() -> String {
    "~/.atom/.apm".to_string()
}

fn default_report_file() -> String {
    "~/apm-report.json".to_string()
}

fn default_commands() -> Vec<CommandSpec> {
    let install = |name: &str, pkg: &str| CommandSpec::new(name, ["install", pkg]).cleaning_cache();
    vec![
        CommandSpec::new("version", ["--version"]).omitted(),
        CommandSpec::new(
            "clean slate",
            [
                "uninstall",
                "teletype",
                "atom-lcov",
                "atom-ide-ui",
                "hydrogen",
                "latex",
                "github",
                "git-plus",
            ],
        )
        .omitted(),
        install("from atom.io: teletype", "teletype"),
        install("from atom.io: atom-lcov", "atom-lcov"),
        install("with prebuilt native dependencies: atom-ide-ui", "atom-ide-ui"),
        install("with native dependencies: hydrogen", "hydrogen"),
        install("with native dependencies: latex", "latex"),
        install("with native dependencies: github", "github"),
        install("with package-lock.json: git-plus", "git-plus"),
        install("from git repository: atom/github", "atom/github"),
        CommandSpec::new("within package repository: atom/github", ["install"])
            .cleaning_cache()
            .in_target_directory(),
        CommandSpec::new("dedupe", ["dedupe"])
            .cleaning_cache()
            .in_target_directory(),
        CommandSpec::new("clean", ["clean"]).in_target_directory(),
        CommandSpec::new("rebuild individual package: hydrogen", ["rebuild", "hydrogen"]),
        CommandSpec::new("rebuild all packages", ["rebuild"]),
        CommandSpec::new("set a config option", ["config", "set", "somevalue", "1234"]).omitted(),
        CommandSpec::new("read a config option", ["config", "get", "somevalue"]).omitted(),
        CommandSpec::new("delete a config option", ["config", "delete", "somevalue"]).omitted(),
        CommandSpec::new(
            "remove unused packages",
            ["uninstall", "hydrogen", "latex", "github", "git-plus"],
        )
        .omitted(),
        CommandSpec::new("reinstall used packages", ["install", "atom/github"]).omitted(),
    ]
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            tool: default_tool(),
            install_dir: None,
            install_candidates: default_install_candidates(),
            target_dir: None,
            target_candidates: default_target_candidates(),
            cache_dir: default_cache_dir(),
            report_file: default_report_file(),
            commands: default_commands(),
        }
    }
}
