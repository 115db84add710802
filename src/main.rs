use anyhow::Context;
use clap::Parser;
use slot_store::config::{BookArgs, Command};
use slot_store::core::issuer::classify;
use slot_store::core::luhn::luhn_valid;
use slot_store::core::normalize::{card_digits, format_card_number, format_cvv, format_expiry};
use slot_store::core::rules::{check_card, check_card_number};
use slot_store::core::{Clock, ConfigProvider};
use slot_store::domain::model::CardInput;
use slot_store::utils::{logger, validation::Validate};
use slot_store::{
    BookingEngine, BookingError, CliConfig, FixedClock, FormEvent, FormState, SimulatedGateway,
    StoreConfig, SubmitOutcome, SystemClock, TimeSlot, View,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    let config = match &cli.config {
        Some(path) => StoreConfig::from_file(path)
            .with_context(|| format!("failed to load config file '{}'", path.display()))?,
        None => StoreConfig::default(),
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    match cli.command {
        Command::Slots => {
            println!("{} - {} per booking", config.store_name(), config.display_price());
            for slot in TimeSlot::ALL {
                println!("  {}", slot);
            }
        }
        Command::Route { path } => match View::from_path(&path) {
            Some(view) => println!("{} -> {:?}: {}", view.path(), view, view.title()),
            None => {
                eprintln!("❌ No page at '{}'", path);
                std::process::exit(1);
            }
        },
        Command::CheckCard {
            number,
            expiry,
            cvv,
        } => check_card_command(&number, expiry.as_deref(), cvv.as_deref()),
        Command::Book(args) => {
            let today = args.today;
            let result = match today {
                Some(date) => book(args, FixedClock(date), config).await,
                None => book(args, SystemClock, config).await,
            };

            match result {
                Ok(SubmitOutcome::Confirmed(confirmation)) => {
                    println!("✅ Payment successful! Booking {}", confirmation.reference);
                    println!(
                        "📅 {} {} for {} ({})",
                        confirmation.payload.date,
                        confirmation.payload.slot,
                        confirmation.payload.customer.name,
                        confirmation.payload.payment.masked_card
                    );
                }
                Ok(SubmitOutcome::Rejected(failure)) => {
                    eprintln!("❌ {}", failure);
                    std::process::exit(BookingError::from(failure).exit_code());
                }
                Err(e) => {
                    tracing::error!("❌ Booking failed: {} (Category: {:?})", e, e.category());
                    eprintln!("❌ {}", e.user_friendly_message());
                    std::process::exit(e.exit_code());
                }
            }
        }
    }

    Ok(())
}

async fn book<K: Clock>(
    args: BookArgs,
    clock: K,
    config: StoreConfig,
) -> slot_store::Result<SubmitOutcome> {
    let events = [
        FormEvent::DateChanged(Some(args.date)),
        FormEvent::SlotChosen(args.slot),
        FormEvent::FullNameChanged(args.name),
        FormEvent::EmailChanged(args.email),
        FormEvent::PhoneChanged(args.phone),
        FormEvent::PartySizeChanged(args.party),
        FormEvent::CardHolderChanged(args.holder),
        FormEvent::CardNumberChanged(args.card),
        FormEvent::ExpiryChanged(args.expiry),
        FormEvent::CvvChanged(args.cvv),
    ];
    let mut form = events
        .into_iter()
        .try_fold(FormState::default(), FormState::reduce)?;

    println!(
        "⏳ Processing {} payment for {} {}...",
        config.display_price(),
        args.date,
        args.slot
    );

    let gateway = SimulatedGateway::new(config.submit_delay());
    let engine = BookingEngine::new(gateway, clock, config);
    engine.submit(&mut form).await
}

fn check_card_command(number: &str, expiry: Option<&str>, cvv: Option<&str>) {
    let display = format_card_number(number);
    let digits = card_digits(&display);

    println!("Card:     {}", display);
    match classify(&digits) {
        Some(issuer) => println!("Issuer:   {}", issuer),
        None => println!("Issuer:   not supported"),
    }
    println!("Checksum: {}", if luhn_valid(&digits) { "ok" } else { "failed" });

    let verdict = match (expiry, cvv) {
        (Some(expiry), Some(cvv)) => {
            let card = CardInput {
                number: display,
                expiry: format_expiry(expiry),
                cvv: format_cvv(cvv),
                holder: String::new(),
            };
            check_card(&card, SystemClock.today())
        }
        _ => check_card_number(&digits),
    };

    match verdict {
        Ok(issuer) => println!("✅ Accepted ({})", issuer),
        Err(failure) => {
            println!("❌ {}", failure);
            std::process::exit(BookingError::from(failure).exit_code());
        }
    }
}
