//! SatoshiGo command line
//!
//! usage:
//!   satoshigo [--config satoshigo.json] games
//!   satoshigo [--config satoshigo.json] near <lon> <lat> [radius_m]
//!   satoshigo [--config satoshigo.json] demo

use std::process::ExitCode;

use satoshigo::accounts::LocalAccounts;
use satoshigo::hunt::{PotPlan, find_areas_near};
use satoshigo::records::{
    NewFunding, confirm_funding, create_funding, create_game, create_player, list_games,
    register_session,
};
use satoshigo::{BoundingBox, LonLat, Settings, Store};

const USAGE: &str =
    "usage: satoshigo [--config <file>] <games | near <lon> <lat> [radius_m] | demo>";

fn main() -> ExitCode {
    env_logger::init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let config = match args.iter().position(|a| a == "--config") {
        Some(i) if i + 1 < args.len() => {
            let path = args.remove(i + 1);
            args.remove(i);
            path
        }
        Some(_) => {
            eprintln!("{}", USAGE);
            return ExitCode::FAILURE;
        }
        None => Settings::FILE_NAME.to_string(),
    };
    let settings = Settings::load(&config);

    match run(&settings, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(settings: &Settings, args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    match args.first().map(String::as_str) {
        Some("games") => {
            let store = Store::open(&settings.db_path)?;
            for game in list_games(&store)? {
                println!(
                    "{}  {:<24} funded {:>8}  coins {:>6}",
                    game.id, game.title, game.amount, game.coins
                );
            }
        }
        Some("near") => {
            let (Some(lon), Some(lat)) = (args.get(1), args.get(2)) else {
                return Err(USAGE.into());
            };
            let at = LonLat::new(lon.parse()?, lat.parse()?);
            let radius = match args.get(3) {
                Some(r) => r.parse()?,
                None => settings.search_radius_m,
            };
            let store = Store::open(&settings.db_path)?;
            for area in find_areas_near(&store, at, radius)? {
                println!("{}  {:>11.6} {:>10.6}  {} sats", area.id, area.lon, area.lat, area.pot);
            }
        }
        Some("demo") => demo(settings)?,
        _ => return Err(USAGE.into()),
    }
    Ok(())
}

/// Fund a small hunt in a throwaway store and look around its center
fn demo(settings: &Settings) -> satoshigo::Result<()> {
    let store = Store::temporary()?;
    let mut rng = settings.rng();
    let accounts = LocalAccounts::new(settings.seed.unwrap_or(0));

    let player = create_player(&store, &accounts, "demo player")?;
    let game = create_game(&store, &mut rng, &player.wallet_id, &player.admin_key, "Demo hunt")?;
    register_session(&store, &player.in_key, &game.id)?;

    let area = BoundingBox::new(LonLat::new(-0.1870, 51.5110), LonLat::new(-0.1520, 51.5020));
    let amount = 1_500;
    create_funding(
        &store,
        &mut rng,
        NewFunding {
            game_id: game.id.clone(),
            wallet: player.wallet_id.clone(),
            area,
            amount,
            payment_hash: "demo-payment".to_string(),
        },
    )?;
    confirm_funding(&store, &mut rng, "demo-payment")?;

    let plan = PotPlan::for_amount(amount);
    println!(
        "Funded {} with {} sats: {} pots of {}",
        game.title, amount, plan.count, plan.denomination
    );

    let center = area.center();
    let nearby = find_areas_near(&store, center, settings.search_radius_m)?;
    println!(
        "{} pots within {}m of ({}, {})",
        nearby.len(),
        settings.search_radius_m,
        center.lon,
        center.lat
    );
    for pot in nearby {
        println!("  {}  {:.6} {:.6}  {} sats", pot.id, pot.lon, pot.lat, pot.pot);
    }
    Ok(())
}
