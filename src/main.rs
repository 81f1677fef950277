//! Line-oriented skill endpoint.
//!
//! Reads one JSON request envelope per line from stdin and writes one JSON
//! response envelope per line to stdout. Logs go to stderr.
//!
//! `FIZZBUZZ_CONFIG` may point at a JSON config file.

use std::io::{self, BufRead, Write};

use fizzbuzz_skill::{logging, Skill, SkillConfig};
use tracing::{error, info};

/// Env var naming the config file.
const ENV_CONFIG_PATH: &str = "FIZZBUZZ_CONFIG";

fn load_config() -> fizzbuzz_skill::Result<SkillConfig> {
    let config = match std::env::var(ENV_CONFIG_PATH) {
        Ok(path) => SkillConfig::from_json_file(path)?,
        Err(_) => SkillConfig::default(),
    };
    Ok(config.with_env_overrides())
}

fn main() {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = logging::init_tracing(&config.log_filter) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    info!(default_locale = %config.default_locale, "fizzbuzz skill ready");
    let skill = Skill::new(config);

    if let Err(e) = serve(&skill, io::stdin().lock(), io::stdout().lock()) {
        error!(error = %e, "stopped serving");
        std::process::exit(1);
    }
}

fn serve(skill: &Skill, input: impl BufRead, mut output: impl Write) -> fizzbuzz_skill::Result<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match skill.dispatch_json(&line) {
            Ok(response) => writeln!(output, "{response}")?,
            Err(e) => {
                error!(error = %e, "rejected request");
                let body = serde_json::json!({ "error": e.to_string() });
                writeln!(output, "{body}")?;
            }
        }
        output.flush()?;
    }
    Ok(())
}
