use clap::Parser;
use policy_audit::config::Config;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{about-with-newline}

{usage-heading}
  {usage}

{tab}Arguments:
{positionals}

{tab}Options:
{options}

{after-help}
";

#[derive(Parser)]
#[command(name = "policy-audit")]
#[command(version)]
#[command(about = "Render exported configuration-policy JSON into an HTML audit report")]
#[command(
    long_about = "policy-audit walks a backup folder of exported configuration policies\n\
    (one subfolder per category, one or more .json files per subfolder) and\n\
    renders every policy as a Setting/Value table in a single static HTML page.\n\n\
    Nested settings are flattened into paths such as 'Settings / Min Length';\n\
    metadata keys (ids, timestamps, @odata annotations) are left out."
)]
#[command(
    help_template = HELP_TEMPLATE,
    after_help = "Examples:\n\
    \n\
    Generate a report with the configured paths:\n\
      $ policy-audit\n\
    \n\
    Generate from a specific backup folder:\n\
      $ policy-audit ./IntuneBackup -o ./IntuneDocs/report.html\n\
    \n\
    Hide an additional key and keep the browser closed:\n\
      $ policy-audit ./IntuneBackup --ignore assignments --no-open\n\
    \n\
    Show what would be rendered:\n\
      $ policy-audit ./IntuneBackup --dry-run -v"
)]
pub struct Cli {
    /// Backup folder whose subfolders hold the exported JSON files
    ///
    /// Overrides `input_root` from the config file.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Path of the HTML report to write
    ///
    /// Parent directories are created as needed; an existing file is replaced.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Configuration file (TOML)
    ///
    /// Defaults to the per-user config file when it exists.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Banner title shown at the top of the report
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Additional key to leave out of the report (substring match, repeatable)
    #[arg(long = "ignore", value_name = "KEY")]
    pub ignore: Vec<String>,

    /// Do not open the report in the default browser
    #[arg(long = "no-open")]
    pub no_open: bool,

    /// Build the report without writing or opening it
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Verbose output
    ///
    /// Lists every category and file, including files that were skipped
    /// because they could not be read or parsed.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded configuration
    pub fn apply(&self, config: &mut Config) {
        if let Some(input) = &self.input {
            config.input_root = input.clone();
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if let Some(title) = &self.title {
            config.title = title.clone();
        }
        config.ignore_keys.extend(self.ignore.iter().cloned());
        if self.no_open || self.dry_run {
            config.open_report = false;
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}

/// Generate shell completion scripts
pub fn generate_completions(shell: &str, app: &mut clap::Command) {
    use clap_complete::{generate, shells};
    match shell {
        "zsh" => {
            generate(shells::Zsh, app, "policy-audit", &mut std::io::stdout());
        }
        "fish" => {
            generate(shells::Fish, app, "policy-audit", &mut std::io::stdout());
        }
        "bash" => {
            generate(shells::Bash, app, "policy-audit", &mut std::io::stdout());
        }
        "powershell" => {
            generate(shells::PowerShell, app, "policy-audit", &mut std::io::stdout());
        }
        _ => {
            eprintln!("Unsupported shell: {}", shell);
            eprintln!("Supported shells: zsh, fish, bash, powershell");
        }
    }
}
