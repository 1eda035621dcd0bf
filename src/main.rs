use clap::Parser;
use epl_explorer::app::commands::{self, Export};
use epl_explorer::app::render::OutputFormat;
use epl_explorer::config::toml_config::TomlConfig;
use epl_explorer::config::ListArgs;
use epl_explorer::utils::error::{ErrorSeverity, ExplorerError};
use epl_explorer::utils::{logger, validation::Validate};
use epl_explorer::{
    AppConfig, CliConfig, Command, LoadEngine, LocalStorage, MatchQuery, MatchRepository,
    SeasonPipeline, SqliteRepository,
};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI arguments: {:?}", cli);

    match run(cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::debug!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn resolve_config(cli: &CliConfig) -> Result<AppConfig, ExplorerError> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            AppConfig::from_toml(&TomlConfig::from_file(path)?)?
        }
        None => AppConfig::default(),
    };

    // 命令列參數優先於設定檔
    if let Some(database) = &cli.database {
        config.database_path = database.clone();
    }
    if let Command::Load {
        csv,
        skip_invalid_rows,
        monitor,
    } = &cli.command
    {
        if let Some(csv) = csv {
            config.dataset_path = csv.clone();
        }
        config.skip_invalid_rows |= *skip_invalid_rows;
        config.monitor |= *monitor;
    }

    config.validate()?;
    Ok(config)
}

fn browse(
    repo: &SqliteRepository,
    config: &AppConfig,
    query: MatchQuery,
    list: ListArgs,
) -> Result<String, ExplorerError> {
    let query = MatchQuery {
        limit: Some(list.limit.unwrap_or(config.default_rows)),
        ..query
    };
    let format = list.format.unwrap_or(config.format);
    let storage = LocalStorage::current_dir();
    let export = list.output.as_deref().map(|path| Export {
        storage: &storage,
        path,
    });
    commands::browse(repo, &query, format, export)
}

fn run(cli: CliConfig) -> Result<String, ExplorerError> {
    let config = resolve_config(&cli)?;
    let format_or_default = |format: Option<OutputFormat>| format.unwrap_or(config.format);

    let open_repo = || SqliteRepository::open_existing(&config.database_path);

    match cli.command {
        Command::Load { .. } => {
            if config.monitor {
                tracing::info!("🔍 System monitoring enabled");
            }
            let pipeline = SeasonPipeline::new(LocalStorage::current_dir(), config.clone());
            let engine = LoadEngine::new_with_monitoring(pipeline, config.monitor);
            let report = engine.run()?;
            Ok(format!(
                "✅ Loaded {} into {}\n  teams: +{}  referees: +{}  matches: +{}  duplicates skipped: {}  rows rejected: {}",
                config.dataset_path,
                config.database_path,
                report.teams_inserted,
                report.referees_inserted,
                report.matches_inserted,
                report.duplicates_skipped,
                report.rows_rejected
            ))
        }
        Command::Matches {
            team,
            referee,
            search,
            list,
        } => browse(
            &open_repo()?,
            &config,
            MatchQuery {
                team,
                referee,
                search,
                limit: None,
            },
            list,
        ),
        Command::Search { text, list } => browse(&open_repo()?, &config, MatchQuery::all().search(text), list),
        Command::Show { match_id } => commands::show(&open_repo()?, match_id),
        Command::Goals { format } => commands::goals(&open_repo()?, format_or_default(format)),
        Command::Compare {
            team_a,
            team_b,
            format,
        } => commands::compare(&open_repo()?, &team_a, &team_b, format_or_default(format)),
        Command::Update {
            match_id,
            home_goals,
            away_goals,
            yes,
        } => commands::update(&open_repo()?, match_id, home_goals, away_goals, yes),
        Command::Summary {
            team,
            referee,
            search,
        } => commands::summary(
            &open_repo()?,
            &MatchQuery {
                team,
                referee,
                search,
                limit: None,
            },
        ),
        Command::Teams => Ok(commands::names(&open_repo()?.teams()?)),
        Command::Referees => Ok(commands::names(&open_repo()?.referees()?)),
    }
}
