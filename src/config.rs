use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing_subscriber::filter::LevelFilter;

pub(crate) const DB_ENV_VAR: &str = "SALESBOARD_DB";
const DB_FILE_NAME: &str = "sales.db";
const LOG_FILE_NAME: &str = "salesboard.log";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Config {
    pub(crate) db_path: PathBuf,
    pub(crate) export_dir: PathBuf,
    pub(crate) log_path: PathBuf,
    pub(crate) log_level: LevelFilter,
}

impl Config {
    /// Resolve configuration from the process arguments and environment.
    ///
    /// Returns the config and the remaining arguments, command first.
    pub(crate) fn from_args(args: &[String]) -> Result<(Self, Vec<String>)> {
        let env_db = std::env::var(DB_ENV_VAR).ok().filter(|v| !v.is_empty());
        let data_dir = data_dir()?;
        Self::resolve(args.get(1..).unwrap_or_default(), env_db, &data_dir)
    }

    /// Global flags must come before the command. Precedence for the store
    /// path is `--db`, then the environment, then the data directory.
    pub(crate) fn resolve(
        args: &[String],
        env_db: Option<String>,
        data_dir: &Path,
    ) -> Result<(Self, Vec<String>)> {
        let mut db_flag: Option<String> = None;
        let mut out_flag: Option<String> = None;
        let mut log_level = LevelFilter::WARN;

        let mut rest = args.iter();
        let mut remaining = Vec::new();
        while let Some(arg) = rest.next() {
            match arg.as_str() {
                "--db" => {
                    let value = rest
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--db requires a path"))?;
                    db_flag = Some(value.clone());
                }
                "--out" | "-o" => {
                    let value = rest
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--out requires a directory"))?;
                    out_flag = Some(value.clone());
                }
                "--verbose" | "-v" => log_level = LevelFilter::INFO,
                "-vv" => log_level = LevelFilter::DEBUG,
                "--quiet" | "-q" => log_level = LevelFilter::ERROR,
                _ => {
                    remaining.push(arg.clone());
                    remaining.extend(rest.by_ref().cloned());
                    break;
                }
            }
        }

        let db_path = db_flag
            .or(env_db)
            .map(|p| PathBuf::from(shellexpand(&p)))
            .unwrap_or_else(|| data_dir.join(DB_FILE_NAME));
        let export_dir = out_flag
            .map(|p| PathBuf::from(shellexpand(&p)))
            .unwrap_or_else(|| PathBuf::from("."));

        Ok((
            Self {
                db_path,
                export_dir,
                log_path: data_dir.join(LOG_FILE_NAME),
                log_level,
            },
            remaining,
        ))
    }
}

fn data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "salesboard", "Salesboard")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
