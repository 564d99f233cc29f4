#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plans an invasion route over an ASCII
//! battlefield map.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use castle_defence_system_navigation::find_path;

use crate::battlefield::Battlefield;

mod battlefield;

/// Plans the enemy invasion route across a battlefield map.
#[derive(Debug, Parser)]
#[command(name = "castle-defence", version)]
struct Args {
    /// Path to the ASCII map file, or `-` to read the map from stdin.
    map: PathBuf,
}

/// Entry point for the Castle Defence command-line interface.
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let text = if args.map.as_os_str() == "-" {
        let mut text = String::new();
        let _ = std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read the map from stdin")?;
        text
    } else {
        fs::read_to_string(&args.map)
            .with_context(|| format!("failed to read the map at {}", args.map.display()))?
    };

    let battlefield = Battlefield::parse(&text)?;
    let route = find_path(battlefield.spawn(), battlefield.castle(), battlefield.map());

    if route.is_empty() {
        println!("the castle cannot be reached from the spawn");
        print!("{}", battlefield.render(&[]));
        return Ok(());
    }

    println!(
        "invasion route, {} cells from spawn to castle:",
        route.len()
    );
    for cell in &route {
        println!("  ({}, {})", cell.column(), cell.row());
    }
    print!("{}", battlefield.render(&route));
    Ok(())
}
