mod cli;

use clap::CommandFactory;
use policy_audit::output::Output;
use policy_audit::report::ReportSummary;
use policy_audit::{browser, Config, ReportBuilder};

fn main() {
    Output::init();

    if let Err(e) = run() {
        Output::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    // Check for completion generation request
    if let Ok(shell) = std::env::var("POLICY_AUDIT_GENERATE_COMPLETIONS") {
        let mut app = cli::Cli::command();
        cli::generate_completions(&shell, &mut app);
        return Ok(());
    }

    let opts = cli::parse();

    let mut config = Config::load(opts.config.as_deref())?;
    opts.apply(&mut config);

    if opts.verbose {
        Output::heading("📋 Building Policy Audit Report");
        Output::info(&format!("Input folder: {}", config.input_root.display()));
        Output::info(&format!("Ignored keys: {}", config.ignore_keys.join(", ")));
    }

    let builder = ReportBuilder::new(config).verbose(opts.verbose);

    if opts.dry_run {
        let report = builder.build()?;
        Output::info(&format!(
            "Dry run: {} bytes of HTML would be written to {}",
            report.html.len(),
            report.summary.output_path.display()
        ));
        print_summary(&report.summary, opts.verbose);
        return Ok(());
    }

    let summary = builder.generate()?;
    Output::success(&format!("Report Generated: {}", summary.output_path.display()));
    print_summary(&summary, opts.verbose);

    if builder.config().open_report {
        if let Err(e) = browser::open_report(&summary.output_path) {
            Output::warning(&format!("{:#}", e));
            Output::path(&summary.output_path.display().to_string());
        }
    }

    Ok(())
}

fn print_summary(summary: &ReportSummary, verbose: bool) {
    if !verbose {
        return;
    }
    Output::heading("Summary");
    Output::summary("Categories:", summary.categories, "folder(s)");
    Output::summary("Files:", summary.files, "file(s)");
    Output::summary("Policies:", summary.policies, "policy(ies)");
    if summary.skipped_files > 0 {
        Output::warning(&format!("{} file(s) skipped (unreadable or invalid JSON)", summary.skipped_files));
    }
}
