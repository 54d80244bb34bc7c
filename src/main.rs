mod cleaning;
mod error;
mod index;
mod model;
mod parser;
mod report;
mod settings;
mod utils;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use parser::{expand_inputs, PageLoader};
use settings::Settings;

#[derive(Parser)]
#[command(name = "td_wiki_docs", about = "Clean, classify and index a TouchDesigner wiki HTML dump")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean a single page and write it to stdout
    Clean {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Clean pages into an output directory
    #[command(name = "cleanall")]
    CleanAll {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Directory for cleaned pages (created if missing)
        #[arg(long)]
        outdir: Option<PathBuf>,
    },
    /// Print page types, category groups and chains
    #[command(name = "getinfo")]
    GetInfo {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Write a JSON index of the page set
    #[command(name = "buildindex")]
    BuildIndex {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Output path for the JSON index
        #[arg(long)]
        index: Option<PathBuf>,
    },
}

fn init_tracing(default_filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .try_init();
}

fn main() -> Result<()> {
    let settings = Settings::load()?;
    init_tracing(&settings.log_level);
    info!(settings = ?settings, "starting");

    let t0 = Instant::now();
    let cli = Cli::parse();
    let loader = PageLoader::from_settings(&settings)?;

    run(cli, &loader)?;

    info!(elapsed_ms = t0.elapsed().as_millis() as u64, "done");
    Ok(())
}

fn run(cli: Cli, loader: &PageLoader) -> Result<()> {
    match cli.command {
        Commands::Clean { files } => {
            let files = expand_inputs(&files)?;
            if files.len() > 1 {
                bail!("Cleaning multiple files not currently supported");
            }
            let Some(fpath) = files.first() else {
                bail!("No page to clean");
            };
            let mut page = loader.load_page(fpath)?;
            page.clean()?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(page.markup()?.as_bytes())?;
            stdout.flush()?;
        }
        Commands::CleanAll { files, outdir } => {
            let Some(outdir) = outdir else {
                bail!("Output directory must be specified");
            };
            clean_all(loader, &expand_inputs(&files)?, &outdir)?;
        }
        Commands::GetInfo { files } => {
            let page_set = loader.load_page_set(&expand_inputs(&files)?)?;
            let mut stdout = std::io::stdout().lock();
            report::dump_info(&page_set, &mut stdout)?;
            stdout.flush()?;
        }
        Commands::BuildIndex { files, index: index_path } => {
            let Some(index_path) = index_path else {
                bail!("Index file must be specified");
            };
            let mut page_set = loader.load_page_set(&expand_inputs(&files)?)?;
            for page in page_set.pages_mut() {
                page.clean()?;
            }
            info!("writing page set index to {}", index_path.display());
            index::write_index(&page_set, &index_path)?;
        }
    }
    Ok(())
}

fn clean_all(loader: &PageLoader, files: &[PathBuf], outdir: &Path) -> Result<()> {
    std::fs::create_dir_all(outdir)
        .with_context(|| format!("failed to create {}", outdir.display()))?;
    for fpath in files {
        let mut page = loader.load_page(fpath)?;
        page.clean()?;
        let out_path = outdir.join(&page.fname);
        info!("writing cleaned page {} -> {}", fpath.display(), out_path.display());
        std::fs::write(&out_path, page.markup()?)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_all_writes_each_page_by_filename() {
        let outdir = std::env::temp_dir().join(format!("td_wiki_docs_clean_{}", std::process::id()));
        let files = vec![
            PathBuf::from("tests/fixtures/Noise_CHOP.html"),
            PathBuf::from("tests/fixtures/Main_Page.html"),
        ];
        clean_all(&PageLoader::default(), &files, &outdir).unwrap();

        let noise = std::fs::read_to_string(outdir.join("Noise_CHOP.html")).unwrap();
        assert!(noise.contains("Noise CHOP"));
        assert!(!noise.contains("<style"));
        assert!(outdir.join("Main_Page.html").is_file());
        std::fs::remove_dir_all(&outdir).ok();
    }

    #[test]
    fn cli_accepts_actions() {
        let cli = Cli::try_parse_from(["td_wiki_docs", "buildindex", "a.html", "b.html", "--index", "out.json"]).unwrap();
        match cli.command {
            Commands::BuildIndex { files, index } => {
                assert_eq!(files.len(), 2);
                assert_eq!(index, Some(PathBuf::from("out.json")));
            }
            _ => panic!("expected buildindex"),
        }
        assert!(Cli::try_parse_from(["td_wiki_docs", "cleanall", "a.html"]).is_ok());
    }

    fn run_args(args: &[&str]) -> Result<()> {
        let mut argv = vec!["td_wiki_docs"];
        argv.extend_from_slice(args);
        run(Cli::try_parse_from(argv).unwrap(), &PageLoader::default())
    }

    #[test]
    fn clean_rejects_multiple_files() {
        let err = run_args(&["clean", "tests/fixtures/Noise_CHOP.html", "tests/fixtures/Main_Page.html"]).unwrap_err();
        assert_eq!(err.to_string(), "Cleaning multiple files not currently supported");
    }

    #[test]
    fn clean_expands_directory_before_counting() {
        let err = run_args(&["clean", "tests/fixtures"]).unwrap_err();
        assert_eq!(err.to_string(), "Cleaning multiple files not currently supported");
    }

    #[test]
    fn cleanall_requires_outdir() {
        let err = run_args(&["cleanall", "tests/fixtures/Noise_CHOP.html"]).unwrap_err();
        assert_eq!(err.to_string(), "Output directory must be specified");
    }

    #[test]
    fn buildindex_requires_index_path() {
        let err = run_args(&["buildindex", "tests/fixtures"]).unwrap_err();
        assert_eq!(err.to_string(), "Index file must be specified");
    }

    #[test]
    fn buildindex_writes_index() {
        let path = std::env::temp_dir().join(format!("td_wiki_docs_run_{}.json", std::process::id()));
        let path_arg = path.to_string_lossy().into_owned();
        run_args(&["buildindex", "tests/fixtures", "--index", path_arg.as_str()]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(text.contains("\"categoryGroups\""));
    }

    #[test]
    fn cli_rejects_unknown_action_and_missing_files() {
        assert!(Cli::try_parse_from(["td_wiki_docs", "publish", "a.html"]).is_err());
        assert!(Cli::try_parse_from(["td_wiki_docs", "getinfo"]).is_err());
    }
}
