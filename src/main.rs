use clap::Parser;
use salvage_line::app::report::{DonorReport, RecipientReport, SummaryReport};
use salvage_line::utils::{logger, validation::Validate};
use salvage_line::{CliArgs, Command, Registry, SalvageEngine, SalvageError};
use serde::Serialize;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.json_logs() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.logging.verbose);
    }
    for line in args.describe_overrides() {
        tracing::info!("{}", line);
    }
    tracing::debug!("Resolved config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let engine = SalvageEngine::new(config);
    let run = match engine.run() {
        Ok(run) => run,
        Err(e) => exit_with(&e),
    };

    match args.command() {
        Command::Summary => emit(&SummaryReport::build(&run.registry, run.seed), args.json)?,
        Command::Unit { serial } => match RecipientReport::build(&run.registry, serial) {
            Some(report) => emit(&report, args.json)?,
            None if run.registry.get_unit(serial).is_some() => {
                println!("Unit {} belongs to the old line. Use the `donor` command instead.", serial);
            }
            None => println!("No such unit found."),
        },
        Command::Donor { serial } => match DonorReport::build(&run.registry, serial) {
            Some(report) => emit(&report, args.json)?,
            None if run.registry.get_unit(serial).is_some() => {
                println!("Unit {} belongs to the new line. Use the `unit` command instead.", serial);
            }
            None => println!("No such unit found."),
        },
        Command::Model { tag } => list_model(&run.registry, &tag, args.json)?,
    }

    Ok(())
}

fn list_model(registry: &Registry, tag: &str, json: bool) -> anyhow::Result<()> {
    let mut donors = Vec::new();
    let mut recipients = Vec::new();
    for unit in registry.units_with_tag(tag) {
        match RecipientReport::build(registry, unit.serial()) {
            Some(report) => recipients.push(report),
            None => donors.extend(DonorReport::build(registry, unit.serial())),
        }
    }

    if json {
        #[derive(Serialize)]
        struct ModelListing<'a> {
            tag: &'a str,
            donors: Vec<DonorReport>,
            recipients: Vec<RecipientReport>,
        }
        let listing = ModelListing { tag, donors, recipients };
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    if donors.is_empty() && recipients.is_empty() {
        println!("No units of model {}.", tag);
    }
    for report in &recipients {
        println!("{}", report);
    }
    for report in &donors {
        println!("{}", report);
    }
    Ok(())
}

fn emit<T: Serialize + std::fmt::Display>(report: &T, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}

fn exit_with(e: &SalvageError) -> ! {
    tracing::error!(
        "❌ Salvage run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    std::process::exit(e.severity().exit_code());
}
