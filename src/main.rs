use clap::{Parser, Subcommand};
use gallery_assets::{config, lister::FsLister, manifest, output, reorganize, rewrite, scan, verify};
use std::path::PathBuf;

/// Shared flag for commands that can target a single family.
#[derive(clap::Args, Clone)]
struct FamilyArg {
    /// Restrict to one asset family (default: all configured families)
    #[arg(long)]
    family: Option<String>,
}

#[derive(Parser)]
#[command(name = "gallery-assets")]
#[command(about = "Asset manifest builder and CDN migration tool")]
#[command(long_about = "\
Asset manifest builder and CDN migration tool

Your filesystem is the data source. Each asset family is a directory under
the assets root with its own manifest shape:

  assets/
  ├── config.toml                  # Pipeline config (optional)
  ├── Graphics/                    # generic family: folder tree
  │   ├── Logos/
  │   │   └── a.png
  │   └── banner.png
  └── Photography/                 # categorized family
      ├── Portraits/               # 3 Model-Jane Doe, Paris.jpg
      ├── Landscapes/              # 2 Forest.jpg, 10 Beach.jpg (prefix order)
      └── Product Shoot/

Pipeline: scan writes manifest.json per family; rewrite retags every local
path as a CDN URL (idempotent — already-remote entries are skipped); verify
probes a sample of the rewritten URLs.

Run 'gallery-assets gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Assets root directory
    #[arg(long, default_value = "assets", global = true)]
    assets: PathBuf,

    /// Config file (defaults to <assets>/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan asset families and write their manifests
    Scan(FamilyArg),
    /// Scan and report without writing manifests
    Check(FamilyArg),
    /// Rewrite manifest paths to remote CDN URLs
    Rewrite(FamilyArg),
    /// Swap cloud identifier / folder names in raw manifest text
    Patch(FamilyArg),
    /// Move legacy folders into their mapped destinations
    Reorganize(FamilyArg),
    /// Probe a sample of remote URLs and summarize reachability
    Verify,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::load_file(path)?,
        None => config::load_config(&cli.assets)?,
    };

    match cli.command {
        Command::Scan(args) => {
            for family in selected_families(&config, &args)? {
                match scan::scan(&FsLister, &cli.assets, family) {
                    Ok(manifest) => {
                        let path = manifest_path(&cli.assets, family);
                        manifest.write(&path)?;
                        output::print_scan_output(&family.name, &manifest);
                        println!("Wrote {}", path.display());
                    }
                    Err(scan::ScanError::MissingRoot(root)) => {
                        println!("{}: {} not found, skipped", family.name, root.display());
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }
        Command::Check(args) => {
            for family in selected_families(&config, &args)? {
                match scan::scan(&FsLister, &cli.assets, family) {
                    Ok(manifest) => output::print_scan_output(&family.name, &manifest),
                    Err(scan::ScanError::MissingRoot(root)) => {
                        println!("{}: {} not found, skipped", family.name, root.display());
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }
        Command::Rewrite(args) => {
            for family in selected_families(&config, &args)? {
                let path = manifest_path(&cli.assets, family);
                let report =
                    rewrite::rewrite_file(&path, &config.cloud, family, &config.mappings)?;
                println!("{}", output::format_rewrite_line(&family.name, report.as_ref()));
            }
        }
        Command::Patch(args) => {
            let patch = config.patch.as_ref().ok_or(
                "patch requires a [patch] section in config.toml (old_name at minimum)",
            )?;
            for family in selected_families(&config, &args)? {
                let path = manifest_path(&cli.assets, family);
                let replacements = rewrite::patch_file(&path, patch, &config.cloud.name)?;
                println!("{}", output::format_patch_line(&family.name, replacements));
            }
        }
        Command::Reorganize(args) => {
            for family in selected_families(&config, &args)? {
                let records = reorganize::reorganize(&cli.assets, family, &config.mappings)?;
                output::print_reorganize_output(&family.name, &records);
            }
        }
        Command::Verify => {
            let mut manifests = Vec::new();
            for family in &config.families {
                let path = manifest_path(&cli.assets, family);
                if path.exists() {
                    manifests.push(manifest::Manifest::load(&path)?);
                } else {
                    println!("{}: manifest not found, skipped", family.name);
                }
            }
            let urls = verify::sample_urls(&manifests, config.verify.sample);
            if urls.is_empty() {
                println!("No remote URLs to verify - run rewrite first");
            } else {
                let results = verify::probe(&urls);
                let summary = verify::summarize(&results);
                output::print_verify_output(&results, &summary);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Resolve the manifest path for a family: `<assets>/<family-dir>/manifest.json`.
fn manifest_path(assets: &std::path::Path, family: &config::FamilyConfig) -> PathBuf {
    assets.join(&family.dir).join(manifest::MANIFEST_FILE)
}

/// Families matching `--family`, or all configured families.
fn selected_families<'a>(
    config: &'a config::Config,
    args: &FamilyArg,
) -> Result<Vec<&'a config::FamilyConfig>, Box<dyn std::error::Error>> {
    match &args.family {
        None => Ok(config.families.iter().collect()),
        Some(name) => config
            .family(name)
            .map(|f| vec![f])
            .ok_or_else(|| format!("unknown family '{name}'").into()),
    }
}
