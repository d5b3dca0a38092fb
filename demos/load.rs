use rootenv::EnvFileParserFactory;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
struct AppConfig {
    root_path: String,
    db: DatabaseSection,
}

#[derive(Debug, Deserialize)]
struct DatabaseSection {
    host: String,
    port: u16,
}

fn main() -> Result<(), rootenv::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let root = std::env::args().nth(1).unwrap_or_else(|| "demos".to_string());

    let parser = EnvFileParserFactory::new().create(&root)?;
    let env = parser.parse()?;

    for (key, value) in &env {
        println!("{key}={value}");
    }

    let config: AppConfig = env.deserialize()?;
    println!("Database: {}:{} (root {})", config.db.host, config.db.port, config.root_path);

    Ok(())
}
