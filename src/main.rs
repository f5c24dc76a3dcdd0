use std::process::ExitCode;

use trivia_quiz::{app_state::AppState, config::Config, handlers};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = Config::from_env();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    log::info!("Storing quiz records under {}", config.data_dir.display());

    let app = match AppState::new(config) {
        Ok(app) => app,
        Err(e) => {
            log::error!("Failed to initialise: {}", e);
            eprintln!("trivia-quiz: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match handlers::run(app).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Quiz loop stopped: {}", e);
            eprintln!("trivia-quiz: {}", e);
            ExitCode::FAILURE
        }
    }
}
