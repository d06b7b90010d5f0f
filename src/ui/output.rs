//! Output mode.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show per-entry details.
    Verbose,
    /// Show per-store summaries.
    #[default]
    Normal,
    /// Show the final total only.
    Quiet,
}

impl OutputMode {
    /// Pick the mode from the `--quiet` and `--verbose` flags; quiet wins.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Check if this mode shows per-entry details.
    pub fn shows_details(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if this mode shows per-store summaries.
    pub fn shows_summaries(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }
}
