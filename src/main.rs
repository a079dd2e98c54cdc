use std::env;
use std::error::Error;
use std::io;
use std::process;

use tracing_subscriber::EnvFilter;

use rusty_accounts::{run, DATA_FILE};

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("rusty_accounts=warn")),
        )
        .init();

    if let Err(err) = run_app() {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

fn run_app() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();
    check_args(&args)?;
    run(DATA_FILE, io::stdin().lock(), io::stdout().lock())
}

fn check_args(args: &[String]) -> Result<(), Box<dyn Error>> {
    if args.len() != 1 {
        return Err("Usage: rusty-accounts (commands are read from stdin, type 'help' to list them)".into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_accepted() {
        assert!(check_args(&["rusty-accounts".to_string()]).is_ok());
    }

    #[test]
    fn test_usage_names_binary() {
        let err = check_args(&["rusty-accounts".to_string(), "extra".to_string()]).unwrap_err();
        assert!(err.to_string().starts_with("Usage: rusty-accounts "));
    }
}
