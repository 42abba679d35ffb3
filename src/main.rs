use anyhow::Context;
use clap::Parser;
use small_carpark::domain::SiteConfigProvider;
use small_carpark::utils::error::ErrorSeverity;
use small_carpark::utils::{logger, validation::Validate};
use small_carpark::{CarParkError, CliConfig, Console, Registry, RegistryEvent, Slot};
use std::io;

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 驗證命令列參數與站點配置
    let site = match cli.validate().and_then(|_| cli.load_site()) {
        Ok(site) => site,
        Err(e) => fail(&e),
    };
    if let Err(e) = site.validate() {
        fail(&e);
    }

    // 初始化日誌
    if cli.json_logs || site.json_logs() {
        logger::init_json_logger(site.log_level(), cli.verbose);
    } else {
        logger::init_cli_logger(site.log_level(), cli.verbose);
    }

    tracing::info!("🚀 Starting carpark console");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let mut registry = Registry::from_config(&site)
        .with_context(|| format!("failed to open site '{}'", site.site_name()))?;
    for slot_id in &cli.slots {
        if let Err(e) = registry.add_slot(Slot::new(slot_id.as_str())) {
            tracing::warn!("Skipping --slot {}: {}", slot_id, e);
        }
    }
    registry.subscribe(|event: &RegistryEvent| {
        tracing::info!(?event, "registry changed");
    });

    println!(
        "{}: {} slots open. Type 'help' for commands.",
        site.site_name(),
        registry.len()
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(&mut registry, stdout.lock());
    match console.run(stdin.lock()) {
        Ok(executed) => {
            tracing::info!("✅ Console closed after {} commands", executed);
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ Console failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            fail(&e)
        }
    }
}

fn fail(e: &CarParkError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}
