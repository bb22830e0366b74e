use crate::cli::Cli;
use serde::Serialize;

/// Central output coordinator that respects json/quiet modes.
///
/// Report bodies go to stdout; tagged diagnostics (`[INFO]`, `[WARN]`,
/// `[FAIL]`) keep the line format the harness scripts use. `[ERROR]` lines
/// come from the top-level error handler.
#[derive(Debug, Clone, Copy)]
pub struct OutputContext {
    mode: OutputMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Plain text report plus tagged status lines
    Plain,
    /// JSON documents on stdout; warnings still reach stderr
    Json,
    /// Report bodies only; no `[INFO]`/`[WARN]` lines
    Quiet,
}

impl OutputContext {
    /// Create from CLI global args
    #[must_use]
    pub fn from_args(args: &Cli) -> Self {
        Self::from_flags(args.json, args.quiet)
    }

    /// Create from CLI-style flags.
    #[must_use]
    pub const fn from_flags(json: bool, quiet: bool) -> Self {
        let mode = if json {
            OutputMode::Json
        } else if quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Plain
        };
        Self { mode }
    }

    // ─────────────────────────────────────────────────────────────
    // Mode Checks
    // ─────────────────────────────────────────────────────────────

    #[must_use]
    pub const fn mode(&self) -> OutputMode {
        self.mode
    }

    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    // ─────────────────────────────────────────────────────────────
    // Output Methods
    // ─────────────────────────────────────────────────────────────

    /// Print a report body verbatim (no trailing newline added).
    pub fn print(&self, content: &str) {
        match self.mode {
            OutputMode::Plain | OutputMode::Quiet => print!("{content}"),
            OutputMode::Json => {}
        }
    }

    /// Print one JSON document on stdout in JSON mode.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be serialized.
    pub fn json<T: Serialize>(&self, value: &T) -> crate::Result<()> {
        if self.is_json() {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    // Semantic Output Methods
    // ─────────────────────────────────────────────────────────────

    /// `[INFO]` progress line on stdout, next to the report it describes.
    pub fn info(&self, message: &str) {
        if self.mode == OutputMode::Plain {
            println!("{}", tagged("INFO", message));
        }
    }

    /// `[INFO]` line about the input itself; kept on stderr so stdout holds
    /// only the report body.
    pub fn note(&self, message: &str) {
        if self.mode == OutputMode::Plain {
            eprintln!("{}", tagged("INFO", message));
        }
    }

    pub fn warning(&self, message: &str) {
        match self.mode {
            OutputMode::Plain | OutputMode::Json => eprintln!("{}", tagged("WARN", message)),
            OutputMode::Quiet => {}
        }
    }

    /// Pre-tagged failure line on stderr. Shown in quiet mode; JSON mode
    /// reports failures in the document instead.
    pub fn failure(&self, line: &str) {
        if self.mode != OutputMode::Json {
            eprintln!("{line}");
        }
    }
}

/// `[TAG] message`
#[must_use]
pub fn tagged(tag: &str, message: &str) -> String {
    format!("[{tag}] {message}")
}
