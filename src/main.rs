use std::process::ExitCode;

use agent_showcase::errors::{get_exit_code, EXIT_CANCELLED};

#[tokio::main]
async fn main() -> ExitCode {
    let result = agent_showcase::cli::run().await;

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            let code = get_exit_code(&e);
            if code == EXIT_CANCELLED {
                eprintln!("\nCancelled.");
                // An accept prompt may still be blocked on stdin; don't wait for it
                std::process::exit(code.into());
            }
            eprintln!("Error: {:?}", e);
            ExitCode::from(code)
        }
    }
}
