use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use raffle_draw::utils::{logger, validation::Validate};
use raffle_draw::{CliConfig, DrawHandler, DrawReply, FilePool, Raffle, RaffleConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 載入配置
    let mut config = match &cli.config {
        Some(path) => match RaffleConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => RaffleConfig::default(),
    };
    cli.apply_to(&mut config);

    // 初始化日誌
    if config.logging.json {
        logger::init_json_logger(&config.logging.level);
    } else {
        logger::init_cli_logger(&config.logging.level);
    }

    tracing::debug!("Effective config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let body = match cli.request_body() {
        Ok(body) => body,
        Err(e) => {
            eprintln!("❌ {}", e);
            eprintln!("💡 Pass --count N or --request FILE");
            std::process::exit(1);
        }
    };

    let mut rng = match config.draw.seed {
        Some(seed) => {
            tracing::info!("🎲 Using fixed seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let pool = FilePool::from_config(&config.pool);
    let handler = DrawHandler::new(
        Raffle::new(pool, config.draw.placement),
        config.draw.max_manual_slots,
    );

    let result = handler.draw(&body, &mut rng).await;

    match (&result, cli.report) {
        (Ok(outcome), true) => println!("{}", serde_json::to_string_pretty(outcome)?),
        _ => println!("{}", serde_json::to_string(&DrawReply::from_result(&result).body)?),
    }

    if let Err(e) = result {
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    Ok(())
}
