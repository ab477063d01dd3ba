mod commands;
mod terminal;

use commands::{CommandLine, Commands, assess, calculate, policy, reference, verify};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    let cfg = commands.config();

    logging::init_logging(&cfg);
    print::banner(cfg.no_banner || cfg.json, cfg.quiet);

    let result = match commands.command {
        Commands::Calculate(args) => {
            print::header("sequestration estimate", cfg.quiet);
            calculate::calculate(&args, &cfg).await
        }
        Commands::Policy(args) => {
            print::header("policy target", cfg.quiet);
            policy::policy(&args, &cfg).await
        }
        Commands::Assess { file } => {
            print::header("anomaly assessment", cfg.quiet);
            assess::assess(&file, &cfg)
        }
        Commands::Verify(args) => {
            print::header("verification", cfg.quiet);
            verify::verify(&args, &cfg).await
        }
        Commands::Reference => {
            print::header("reference data", cfg.quiet);
            reference::reference(&cfg)
        }
    };

    if !cfg.json {
        print::end_of_program(cfg.quiet);
    }
    result
}
