//! pctl - profile subscription generator
//!
//! Usage:
//!   pctl --catalog-url URL install <catalog>/<profile>
//!   pctl install <catalog>/<profile> --create-pr --pr-repo owner/repo
//!   pctl config show
//!   pctl config set <key> <value>

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pctl_core::config::{ConfigStore, ENV_CATALOG_URL, PctlConfig, resolve_catalog_url};
use pctl_core::prelude::*;

const DEFAULT_OUT: &str = "profile-subscription.yaml";
const DEFAULT_PR_BRANCH: &str = "pctl-profile-update";

#[derive(Parser)]
#[command(name = "pctl")]
#[command(about = "Generate and publish profile subscriptions", long_about = None)]
#[command(version)]
struct Cli {
    /// Catalog service base URL
    #[arg(long, global = true, env = ENV_CATALOG_URL)]
    catalog_url: Option<String>,

    /// Config file (defaults to <config dir>/pctl/pctl.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a profile subscription and optionally open a pull request for it
    Install(Box<InstallArgs>),

    /// Inspect or change pctl.toml
    Config(ConfigArgs),
}

#[derive(Args)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Subcommand)]
enum ConfigSubcommand {
    /// Print the config file location and its effective values
    Show,

    /// Set a value, e.g. `pctl config set install.namespace profiles`
    Set {
        /// Dotted key (catalog_url, install.namespace, install.subscription_name,
        /// install.branch, git.remote, git.base)
        key: String,
        value: String,
    },
}

#[derive(Args)]
struct InstallArgs {
    /// Profile to install, as <catalog>/<profile>
    profile: ProfileReference,

    /// File the subscription is written to (relative to --directory with --create-pr)
    #[arg(long, default_value = DEFAULT_OUT)]
    out: PathBuf,

    /// Namespace of the subscription
    #[arg(long)]
    namespace: Option<String>,

    /// Name of the subscription
    #[arg(long)]
    subscription_name: Option<String>,

    /// Profile branch to subscribe to
    #[arg(long)]
    branch: Option<String>,

    /// Key in the <subscription-name>-values ConfigMap holding profile values
    #[arg(long)]
    config_secret: Option<String>,

    /// Commit the output and open a pull request
    #[arg(long)]
    create_pr: bool,

    /// Repository the pull request is opened on (owner/repo)
    #[arg(long, requires = "create_pr")]
    pr_repo: Option<String>,

    /// Branch the changes are pushed to
    #[arg(long, default_value = DEFAULT_PR_BRANCH)]
    pr_branch: String,

    /// Branch the pull request targets
    #[arg(long, requires = "create_pr")]
    pr_base: Option<String>,

    /// Remote the changes are pushed to
    #[arg(long, requires = "create_pr")]
    pr_remote: Option<String>,

    /// Working tree to publish from
    #[arg(long, default_value = ".")]
    directory: PathBuf,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pctl=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let store = match &cli.config {
        Some(path) => ConfigStore::from_path(path.clone()),
        None => ConfigStore::from_default_location()?,
    };
    let config = store.load()?;

    match cli.command {
        Commands::Install(args) => run_install(cli.catalog_url.as_deref(), &config, *args),
        Commands::Config(args) => run_config(&store, config, args.command),
    }
}

fn run_config(
    store: &ConfigStore,
    mut config: PctlConfig,
    command: ConfigSubcommand,
) -> Result<()> {
    match command {
        ConfigSubcommand::Show => {
            println!("# {}", store.config_path().display());
            print!("{}", config.to_toml()?);
        }
        ConfigSubcommand::Set { key, value } => {
            config.set(&key, &value)?;
            store.save(&config)?;
            println!("Set {key} in {}", store.config_path().display());
        }
    }
    Ok(())
}

fn run_install(catalog_url: Option<&str>, config: &PctlConfig, args: InstallArgs) -> Result<()> {
    let Some(catalog_url) = resolve_catalog_url(catalog_url, config) else {
        bail!("--catalog-url or $PCTL_CATALOG_URL must be provided");
    };
    // Checked before anything is written so a bad invocation leaves no output.
    let pr_repo = match (args.create_pr, args.pr_repo.as_deref()) {
        (true, None) => bail!("--pr-repo must be provided with --create-pr"),
        (_, repo) => repo,
    };

    let options = install_options(config, &args);
    let out = output_path(&args);
    let orchestrator = InstallOrchestrator::new(CatalogClient::new()?);
    let writer = FileWriter::new(&out);
    orchestrator.install(&catalog_url, &args.profile, &options, &writer)?;
    println!("Wrote subscription for {} to {}", args.profile, out.display());

    if let Some(repo) = pr_repo {
        let base = args
            .pr_base
            .clone()
            .unwrap_or_else(|| config.git.base.clone());
        let remote = args
            .pr_remote
            .clone()
            .unwrap_or_else(|| config.git.remote.clone());

        let git = CliGit::new(
            CliGitConfig {
                location: args.directory.clone(),
                branch: args.pr_branch.clone(),
                remote,
                base: base.clone(),
            },
            ProcessRunner::new(),
        );
        let publisher = ChangePublisher::new(ProcessRunner::new(), EnvScmClientFactory::new());
        let pr = publisher
            .publish(repo, &base, &args.pr_branch, &git)
            .with_context(|| format!("Failed to publish changes in {}", args.directory.display()))?;
        println!("PR created with number: {} and URL: {}", pr.number, pr.link);
    }

    Ok(())
}

/// Where the subscription is written.
///
/// When publishing, a relative `--out` lands inside `--directory` so the
/// file is part of the committed tree.
fn output_path(args: &InstallArgs) -> PathBuf {
    if args.create_pr && args.out.is_relative() {
        args.directory.join(&args.out)
    } else {
        args.out.clone()
    }
}

/// Flags override the `[install]` section of the config file.
fn install_options(config: &PctlConfig, args: &InstallArgs) -> InstallOptions {
    let mut options = config.install.to_options();
    if let Some(namespace) = &args.namespace {
        options = options.with_namespace(namespace);
    }
    if let Some(name) = &args.subscription_name {
        options = options.with_subscription_name(name);
    }
    if let Some(branch) = &args.branch {
        options = options.with_branch(branch);
    }
    if let Some(key) = &args.config_secret {
        options = options.with_values_key(key);
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("arguments should parse")
    }

    fn install_args(cli: Cli) -> InstallArgs {
        match cli.command {
            Commands::Install(args) => *args,
            Commands::Config(_) => panic!("expected install command"),
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn install_defaults() {
        let args = install_args(parse(&["pctl", "install", "nginx-catalog/weaveworks-nginx"]));
        assert_eq!(args.profile.catalog_name(), "nginx-catalog");
        assert_eq!(args.out, PathBuf::from(DEFAULT_OUT));
        assert!(!args.create_pr);

        let options = install_options(&PctlConfig::default(), &args);
        assert_eq!(options, InstallOptions::default());
    }

    #[test]
    fn install_flags_override_config() {
        let mut config = PctlConfig::default();
        config.install.namespace = "from-config".to_string();
        config.install.branch = "develop".to_string();
        let args = install_args(parse(&[
            "pctl",
            "install",
            "--branch",
            "my_branch",
            "--config-secret",
            "my-secret",
            "nginx-catalog/weaveworks-nginx",
        ]));

        let options = install_options(&config, &args);
        assert_eq!(options.namespace, "from-config");
        assert_eq!(options.branch, "my_branch");
        assert_eq!(options.values_key.as_deref(), Some("my-secret"));
    }

    #[test]
    fn malformed_reference_is_rejected() {
        assert!(Cli::try_parse_from(["pctl", "install", "weaveworks-nginx"]).is_err());
    }

    #[test]
    fn pr_flags_require_create_pr() {
        assert!(
            Cli::try_parse_from(["pctl", "install", "c/p", "--pr-repo", "owner/repo"]).is_err()
        );
        let args = install_args(parse(&[
            "pctl",
            "install",
            "c/p",
            "--create-pr",
            "--pr-repo",
            "owner/repo",
        ]));
        assert_eq!(args.pr_branch, DEFAULT_PR_BRANCH);
        assert_eq!(args.directory, PathBuf::from("."));
    }

    #[test]
    fn output_is_placed_in_published_directory() {
        let args = install_args(parse(&[
            "pctl",
            "install",
            "c/p",
            "--create-pr",
            "--pr-repo",
            "owner/repo",
            "--directory",
            "../work",
        ]));
        assert_eq!(
            output_path(&args),
            PathBuf::from("../work").join(DEFAULT_OUT)
        );

        let args = install_args(parse(&[
            "pctl",
            "install",
            "c/p",
            "--create-pr",
            "--pr-repo",
            "owner/repo",
            "--directory",
            "../work",
            "--out",
            "profiles/nginx.yaml",
        ]));
        assert_eq!(
            output_path(&args),
            PathBuf::from("../work/profiles/nginx.yaml")
        );
    }

    #[test]
    fn output_path_is_untouched_without_create_pr_or_when_absolute() {
        let args = install_args(parse(&["pctl", "install", "c/p", "--directory", "../work"]));
        assert_eq!(output_path(&args), PathBuf::from(DEFAULT_OUT));

        let absolute = std::env::temp_dir().join("subscription.yaml");
        let absolute_str = absolute.to_string_lossy().to_string();
        let args = install_args(parse(&[
            "pctl",
            "install",
            "c/p",
            "--create-pr",
            "--pr-repo",
            "owner/repo",
            "--directory",
            "../work",
            "--out",
            absolute_str.as_str(),
        ]));
        assert_eq!(output_path(&args), absolute);
    }

    #[test]
    fn config_set_persists_value() {
        let temp = tempfile::TempDir::new().expect("tempdir should succeed");
        let store = ConfigStore::from_path(temp.path().join("pctl.toml"));
        let cli = parse(&["pctl", "config", "set", "install.namespace", "profiles"]);
        let Commands::Config(args) = cli.command else {
            panic!("expected config command");
        };

        run_config(&store, PctlConfig::default(), args.command).expect("set should succeed");

        let saved = store.load().expect("config should load");
        assert_eq!(saved.install.namespace, "profiles");
        assert_eq!(saved.git, PctlConfig::default().git);
    }

    #[test]
    fn config_set_rejects_unknown_key_without_writing() {
        let temp = tempfile::TempDir::new().expect("tempdir should succeed");
        let store = ConfigStore::from_path(temp.path().join("pctl.toml"));
        let cli = parse(&["pctl", "config", "set", "nope", "x"]);
        let Commands::Config(args) = cli.command else {
            panic!("expected config command");
        };

        assert!(run_config(&store, PctlConfig::default(), args.command).is_err());
        assert!(!store.config_path().exists());
    }

    #[test]
    fn missing_catalog_url_is_reported() {
        // PCTL_CATALOG_URL may be set in the environment running the tests.
        if std::env::var(ENV_CATALOG_URL).is_ok() {
            return;
        }
        let args = install_args(parse(&["pctl", "install", "c/p"]));
        let err = run_install(None, &PctlConfig::default(), args).unwrap_err();
        assert_eq!(
            err.to_string(),
            "--catalog-url or $PCTL_CATALOG_URL must be provided"
        );
    }
}
