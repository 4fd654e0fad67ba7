use fair_dice::{Config, Expression, Resolution};
use std::io::{self, BufRead, Write};

/// Splits an optional leading `adv`/`dis` word off the line.
fn split_resolution(line: &str) -> (Option<Resolution>, &str) {
    match line.split_once(char::is_whitespace) {
        Some((word, rest)) => match word.parse() {
            Ok(resolution) => (Some(resolution), rest),
            Err(_) => (None, line),
        },
        None => (None, line),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    print!("> ");
    io::stdout().flush()?;
    while let Some(Ok(line)) = lines.next() {
        let line = line.trim();
        if !line.is_empty() {
            let (resolution, text) = split_resolution(line);
            match text.parse::<Expression>() {
                Ok(expr) => match resolution.or(config.resolution) {
                    Some(resolution) => println!("{}", config.render(&expr.roll_resolved(resolution))),
                    None => println!("{}", config.render(&expr.roll())),
                },
                Err(why) => eprintln!("Error: {}", why),
            }
        }
        print!("> ");
        io::stdout().flush()?;
    }
    Ok(())
}
