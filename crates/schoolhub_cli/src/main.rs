//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `schoolhub_core` linkage and walk one login/dashboard/logout pass.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Usage: `schoolhub_cli [config.json]`

use schoolhub_core::{
    AppConfig, AppContext, GradeFilter, StudentQuery, DEMO_ADMIN_EMAIL, DEMO_ADMIN_PASSWORD,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("schoolhub_core ping={}", schoolhub_core::ping());
    println!("schoolhub_core version={}", schoolhub_core::core_version());

    match run(std::env::args().nth(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(config_path: Option<String>) -> Result<(), String> {
    let config = match config_path {
        Some(path) => AppConfig::load(&path).map_err(|err| err.to_string())?,
        None => AppConfig::default(),
    };
    if config.init_logging().map_err(|err| err.to_string())? {
        log::info!("event=cli_start module=cli status=ok");
    }

    let mut app = AppContext::from_config(&config).map_err(|err| err.to_string())?;
    let logged_in = app
        .session_mut()
        .login(DEMO_ADMIN_EMAIL, DEMO_ADMIN_PASSWORD);
    println!("login demo_account={logged_in}");

    match app.dashboard_summary() {
        Some(summary) => {
            println!(
                "students total={} active={} inactive={}",
                summary.total, summary.active, summary.inactive
            );
            for (grade, count) in &summary.by_grade {
                println!("students grade=\"{grade}\" count={count}");
            }
            let query = StudentQuery::new("sharma", GradeFilter::All);
            let hits = app.students().query_students(&query).count();
            println!("search term=sharma hits={hits}");
        }
        None => println!("dashboard locked: not authenticated"),
    }

    app.shutdown();
    println!("logout ok");
    Ok(())
}
