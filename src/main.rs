use std::env;

use anyhow::Context;

const DEFAULT_PORT: u16 = 8080;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let raw_args: Vec<String> = env::args().collect();
    match raw_args.get(1).map(String::as_str) {
        Some("serve") => {
            let port = match raw_args.get(2) {
                Some(raw) => raw
                    .parse::<u16>()
                    .with_context(|| format!("invalid port `{raw}`"))?,
                None => DEFAULT_PORT,
            };
            rentorown::api::run_http_server(port)
                .await
                .context("server error")?;
        }
        Some("project") => rentorown::api::run_projection_cli(&raw_args[1..])?,
        _ => {
            eprintln!("Usage: rentorown serve [port]");
            eprintln!("       rentorown project [--home-value N ...] (see `project --help`)");
            std::process::exit(2);
        }
    }
    Ok(())
}
