// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vouch - backend for a testimonial and contact site.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;
mod shutdown;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use secrecy::{ExposeSecret, SecretString};
use vouch_config::VouchConfig;
use vouch_core::VouchError;

/// Vouch - backend for a testimonial and contact site.
#[derive(Parser, Debug)]
#[command(name = "vouch", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP gateway (default).
    Serve,
    /// Renumber testimonial positions to 1..N and exit.
    Normalize,
    /// Print an argon2 hash for an `[[auth.admins]]` entry.
    HashPassword,
    /// Load and validate configuration, then exit.
    CheckConfig,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Serve);

    // Hashing must work even while the config is still broken.
    if let Commands::HashPassword = command {
        if let Err(e) = hash_password_interactive() {
            eprintln!("vouch: {e}");
            std::process::exit(1);
        }
        return;
    }

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            vouch_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match command {
        Commands::Serve => serve::run_serve(config).await,
        Commands::Normalize => serve::run_normalize(config).await,
        Commands::CheckConfig => {
            println!(
                "vouch: config OK (site.name={}, gateway={}:{}, admins={})",
                config.site.name,
                config.gateway.host,
                config.gateway.port,
                config.auth.admins.len()
            );
            Ok(())
        }
        Commands::HashPassword => Ok(()),
    };

    if let Err(e) = result {
        eprintln!("vouch: {e}");
        std::process::exit(1);
    }
}

fn load_config(
    path: Option<&std::path::Path>,
) -> Result<VouchConfig, Vec<vouch_config::ConfigError>> {
    match path {
        Some(path) => vouch_config::load_and_validate_path(path),
        None => vouch_config::load_and_validate(),
    }
}

fn hash_password_interactive() -> Result<(), VouchError> {
    let read = |prompt: &str| {
        rpassword::prompt_password(prompt)
            .map(SecretString::from)
            .map_err(|e| VouchError::Internal(format!("failed to read password: {e}")))
    };
    let password = read("Password: ")?;
    if password.expose_secret().is_empty() {
        return Err(VouchError::validation("password", "must not be empty"));
    }
    let confirm = read("Confirm password: ")?;
    if password.expose_secret() != confirm.expose_secret() {
        return Err(VouchError::validation("password", "passwords do not match"));
    }

    let hash = vouch_auth::hash_password(&password)?;
    println!("{hash}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Only jemalloc supports advancing the epoch.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["vouch"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn parses_subcommands_and_global_config() {
        let cli = Cli::try_parse_from(["vouch", "normalize", "--config", "site.toml"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Normalize)));
        assert_eq!(cli.config, Some(PathBuf::from("site.toml")));

        let cli = Cli::try_parse_from(["vouch", "hash-password"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::HashPassword)));

        let cli = Cli::try_parse_from(["vouch", "check-config"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::CheckConfig)));
    }

    #[test]
    fn explicit_config_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vouch.toml");
        std::fs::write(&path, "[site]\nname = \"Test Site\"\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.site.name, "Test Site");
    }

    #[test]
    fn invalid_config_file_reports_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vouch.toml");
        std::fs::write(&path, "[testimonials]\npage_size = 0\n").unwrap();
        assert!(!load_config(Some(&path)).unwrap_err().is_empty());
    }
}
