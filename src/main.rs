use clap::Parser;
use notekeep::cli::{handle_add, handle_get, handle_ingest, handle_list, Cli, Commands};
use notekeep::logging::init_tracing;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let result = match cli.command {
        Commands::Ingest(args) => handle_ingest(cli.file, args),
        Commands::Add {
            text,
            title,
            status,
            priority,
            private,
            stdin,
            json,
        } => handle_add(cli.file, text, title, status, priority, private, stdin, json),
        Commands::List { status, json } => handle_list(cli.file, status, json),
        Commands::Get { id, json } => handle_get(cli.file, id, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
