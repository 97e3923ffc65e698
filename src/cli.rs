// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Versico

//! Command-line arguments for the terminal front-end

use clap::Parser;

/// Versi - Versico's assistant, in your terminal
#[derive(Debug, Parser)]
#[command(name = "versi", version, about)]
pub struct Cli {
    /// Increase log verbosity (-v for debug output)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Forget the stored API key and exit
    #[arg(long)]
    pub forget_key: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["versi"]);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.forget_key);
    }

    #[test]
    fn test_verbose_counts() {
        let cli = Cli::parse_from(["versi", "-vv"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_forget_key_flag() {
        let cli = Cli::parse_from(["versi", "--forget-key"]);
        assert!(cli.forget_key);
    }
}
