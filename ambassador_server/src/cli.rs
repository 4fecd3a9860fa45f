use std::{env, env::VarError};

/// There's no real CLI for the server. Any argument prints the help text and the current configuration.
pub fn handle_command_line_args() -> bool {
    let has_cli_args = env::args().count() > 1;
    if has_cli_args {
        display_readme();
        display_envs();
    }
    has_cli_args
}

fn display_readme() {
    const README: &str = include_str!("./cli-help.txt");
    println!("\n{README}\n");
}

fn display_envs() {
    // AMB_STRIPE_API_KEY is deliberately absent
    const DISPLAY_ENVS: [&str; 17] = [
        "RUST_LOG",
        "AMB_HOST",
        "AMB_PORT",
        "AMB_DATABASE_URL",
        "AMB_MAX_DB_CONNECTIONS",
        "AMB_RUN_MIGRATIONS",
        "AMB_STRIPE_API_URL",
        "AMB_STRIPE_TIMEOUT_SECS",
        "AMB_CHECKOUT_SUCCESS_URL",
        "AMB_CHECKOUT_CANCEL_URL",
        "AMB_CURRENCY",
        "AMB_SMTP_HOST",
        "AMB_SMTP_PORT",
        "AMB_MAIL_FROM",
        "AMB_ADMIN_EMAIL",
        "AMB_PLATFORM_REVENUE_PERCENT",
        "AMB_EVENT_BUFFER_SIZE",
    ];

    println!("Current environment values (EXCLUDING variables that contain secrets):");
    DISPLAY_ENVS.iter().for_each(|&name| {
        let val = match env::var(name) {
            Ok(s) => s,
            Err(VarError::NotPresent) => "Not set".into(),
            Err(VarError::NotUnicode(s)) => format!("Invalid value: {}", s.to_string_lossy()),
        };
        println!("  {name:<35} {val:<15}");
    })
}
