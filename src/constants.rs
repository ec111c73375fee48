//! Centralized constants for diffview.
//!
//! All magic numbers, default strings, and configuration constants live here
//! so they can be changed in one place.

/// Application name used in CLI output and directory paths.
pub const APP_NAME: &str = "diffview";

/// Configuration filename.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Per-project configuration filename.
pub const PROJECT_CONFIG_FILENAME: &str = "diffview.toml";

// --- Layout ---

/// Number of spaces a tab expands to when no width is configured.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Width used when the terminal size cannot be determined.
pub const FALLBACK_TERMINAL_WIDTH: usize = 80;

/// Unchanged lines allowed between two rendered items before a gap row is drawn.
pub const GAP_THRESHOLD: usize = 5;

/// Character repeated across the full width for a gap row.
pub const GAP_CHAR: &str = "═";

/// Columns taken by the marker and the spacer after the gutter number.
pub const MARKER_COLUMNS: usize = 2;

// --- Placeholders ---

/// Shown when the diff text is missing or blank.
pub const NO_DIFF_CONTENT: &str = "No diff content.";

/// Shown when the diff parsed but contained no displayable lines.
pub const NO_CHANGES_DETECTED: &str = "No changes detected.";

// --- Syntax highlighting ---

/// Syntect theme used when the config does not name one.
pub const DEFAULT_SYNTAX_THEME: &str = "base16-ocean.dark";

// --- Diff generation ---

/// Context lines around each change in generated unified diffs.
pub const DIFF_CONTEXT_LINES: usize = 3;

// --- Pager ---

/// Lines moved per PageUp/PageDown when the frame height is unknown.
pub const PAGE_SCROLL_LINES: u16 = 20;

// --- Environment overrides ---

/// Forces screen-reader output when set to a truthy value.
pub const ENV_SCREEN_READER: &str = "DIFFVIEW_SCREEN_READER";

/// Overrides the configured tab width.
pub const ENV_TAB_WIDTH: &str = "DIFFVIEW_TAB_WIDTH";
