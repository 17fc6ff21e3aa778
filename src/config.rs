use std::fmt;
use std::path::{Path, PathBuf};

// =============================================================================
// Network-related constants
// =============================================================================

/// NuGet v3 flat-container endpoint
pub const NUGET_BASE_URL: &str = "https://api.nuget.org/v3-flatcontainer";

/// GitHub REST API endpoint
pub const GITHUB_API_BASE_URL: &str = "https://api.github.com";

/// Timeout for every HTTP request in seconds
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Maximum number of redirects followed when downloading a release artifact
pub const MAX_DOWNLOAD_REDIRECTS: usize = 5;

pub const USER_AGENT: &str = concat!("plugin-release/", env!("CARGO_PKG_VERSION"));

// =============================================================================
// Release-related constants
// =============================================================================

/// NuGet package whose version defines the Jellyfin platform version
pub const PLATFORM_PACKAGE: &str = "Jellyfin.Model";

/// `event_type` of the repository dispatch consumed by the manifest repository
pub const DISPATCH_EVENT_TYPE: &str = "update-manifest-node";

pub const DEFAULT_PLUGIN_NAME: &str = "Intro Skipper";
pub const DEFAULT_ARTIFACT_PREFIX: &str = "intro-skipper";
pub const DEFAULT_MANIFEST_OWNER: &str = "intro-skipper";

pub const DEFAULT_PROJECT_PATH: &str =
    "ConfusedPolarBear.Plugin.IntroSkipper/ConfusedPolarBear.Plugin.IntroSkipper.csproj";
pub const DEFAULT_README_PATH: &str = "README.md";
pub const DEFAULT_BUG_REPORT_PATH: &str = ".github/ISSUE_TEMPLATE/bug_report_form.yml";

/// Everything the manifest workflow reads from its environment, resolved once
/// at startup.
#[derive(Clone, PartialEq)]
pub struct ReleaseConfig {
    /// `owner/name` of the plugin repository (`GITHUB_REPOSITORY`)
    pub repository: Option<String>,
    /// Plugin version being released (`NEW_FILE_VERSION`)
    pub file_version: Option<String>,
    /// Jellyfin major.minor the release targets (`MAIN_VERSION`)
    pub main_version: Option<String>,
    /// `IS_BETA`; only the literal "false" marks a stable release
    pub is_beta: bool,
    /// Token used for the repository dispatch (`GITHUB_PAT`)
    pub token: Option<String>,
    /// Directory that relative paths below are resolved against
    pub root: PathBuf,
    pub readme_path: PathBuf,
    pub bug_report_path: PathBuf,
    pub plugin_name: String,
    pub artifact_prefix: String,
    pub manifest_owner: String,
    pub nuget_base_url: String,
    pub github_api_base_url: String,
}

impl ReleaseConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    /// Empty values count as unset, the way workflow runners pass missing inputs.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        Self {
            repository: var("GITHUB_REPOSITORY"),
            file_version: var("NEW_FILE_VERSION"),
            main_version: var("MAIN_VERSION"),
            is_beta: var("IS_BETA").as_deref() != Some("false"),
            token: var("GITHUB_PAT"),
            root: PathBuf::from("."),
            readme_path: PathBuf::from(DEFAULT_README_PATH),
            bug_report_path: PathBuf::from(DEFAULT_BUG_REPORT_PATH),
            plugin_name: DEFAULT_PLUGIN_NAME.to_string(),
            artifact_prefix: DEFAULT_ARTIFACT_PREFIX.to_string(),
            manifest_owner: DEFAULT_MANIFEST_OWNER.to_string(),
            nuget_base_url: NUGET_BASE_URL.to_string(),
            github_api_base_url: GITHUB_API_BASE_URL.to_string(),
        }
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Resolves a configured path against [`ReleaseConfig::root`].
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    /// Repository receiving the dispatch. Test repositories publish to the
    /// test manifest so the public feed stays untouched.
    pub fn manifest_repository(&self) -> String {
        let is_test = self
            .repository
            .as_deref()
            .is_some_and(|repository| repository.contains("test"));
        let name = if is_test { "manifest_test" } else { "manifest" };
        format!("{}/{}", self.manifest_owner, name)
    }
}

impl fmt::Debug for ReleaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReleaseConfig")
            .field("repository", &self.repository)
            .field("file_version", &self.file_version)
            .field("main_version", &self.main_version)
            .field("is_beta", &self.is_beta)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("root", &self.root)
            .field("readme_path", &self.readme_path)
            .field("bug_report_path", &self.bug_report_path)
            .field("plugin_name", &self.plugin_name)
            .field("artifact_prefix", &self.artifact_prefix)
            .field("manifest_owner", &self.manifest_owner)
            .field("nuget_base_url", &self.nuget_base_url)
            .field("github_api_base_url", &self.github_api_base_url)
            .finish()
    }
}
