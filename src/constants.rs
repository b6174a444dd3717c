//! Global constants used throughout the wincat codebase.
//!
//! Paging sizes, limits and environment variable names that are shared by
//! the library and the CLI live here so the defaults are discoverable in one
//! place.

/// Items revealed per "show more" step in browse and search sessions.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Page size for `search`/`list` when the caller does not ask for one.
pub const DEFAULT_QUERY_LIMIT: usize = 50;

/// Upper bound on `search`/`list` page size.
pub const MAX_QUERY_LIMIT: usize = 200;

/// Locale accepted besides default-locale records.
pub const DEFAULT_PREFERRED_LOCALE: &str = "en-us";

/// Manifest tree location, relative to the working directory.
pub const DEFAULT_MANIFESTS_DIR: &str = "data/winget-pkgs/manifests";

/// Catalog artifact location, relative to the working directory.
pub const DEFAULT_INDEX_PATH: &str = "data/index.json";

/// Files walked between progress message updates.
pub const PROGRESS_UPDATE_INTERVAL: usize = 2000;

/// Overrides the config file location.
pub const CONFIG_ENV_VAR: &str = "WINCAT_CONFIG";

/// Disables progress indicators when set.
pub const NO_PROGRESS_ENV_VAR: &str = "WINCAT_NO_PROGRESS";
