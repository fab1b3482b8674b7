use clap::Parser;
use resume_dash::config::cli::{read_selection, TerminalNotifier};
use resume_dash::utils::error::ErrorSeverity;
use resume_dash::utils::{logger, validation};
use resume_dash::utils::validation::Validate;
use resume_dash::view::{text, View};
use resume_dash::{CliConfig, Dashboard, FileSource, HttpSubmitter, SubmissionOutcome};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting resume-dash");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let settings = match config.settings() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Failed to load settings: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    for file in validation::validate_file_extensions(&config.files, &["pdf"]) {
        tracing::warn!("'{}' is not a PDF, the parsing service may reject it", file);
    }

    let view = View::bind(View::default_layout(settings.gauge_radius))?;
    let submitter = HttpSubmitter::with_timeout(&settings.endpoint, settings.timeout)?;
    tracing::info!("🔗 Parsing service: {}", submitter.parse_url());
    let mut dashboard = Dashboard::new(view, submitter, TerminalNotifier::new());
    dashboard.view_mut().set_job_description(&settings.job_description);

    let mut worst: Option<ErrorSeverity> = None;
    for path in &config.files {
        let files = match read_selection(path).await {
            Ok(files) => files,
            Err(e) => {
                tracing::error!("❌ Could not read '{}': {}", path, e);
                eprintln!("❌ {}", e.user_friendly_message());
                worst = worst.max(Some(e.severity()));
                continue;
            }
        };

        match dashboard.select_file(FileSource::Picker(files)).await {
            SubmissionOutcome::Rendered(result) => {
                if config.json {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                } else {
                    println!("{}", text::render_dashboard(dashboard.view()));
                }
            }
            SubmissionOutcome::Failed(e) => {
                eprintln!("💡 {}", e.recovery_suggestion());
                worst = worst.max(Some(e.severity()));
            }
            SubmissionOutcome::Ignored => {}
        }
    }

    // 根據最嚴重的錯誤決定退出碼
    let exit_code = match worst {
        None | Some(ErrorSeverity::Low) => 0,
        Some(ErrorSeverity::Medium) => 2,
        Some(ErrorSeverity::High) => 1,
        Some(ErrorSeverity::Critical) => 3,
    };
    if exit_code > 0 {
        tracing::error!(
            "❌ Finished with errors ({} parse failure(s) out of {} file(s))",
            dashboard.notifier().failures(),
            config.files.len()
        );
        std::process::exit(exit_code);
    }

    Ok(())
}
