//! Utility to resolve food queries from the command line
//!
//! Uses the same environment configuration as the server. With no
//! arguments a few sample queries are resolved.

use macrotrack::config::ResolverConfig;
use macrotrack::nutrition::NutritionResolver;
use tracing_subscriber::EnvFilter;

const SAMPLE_QUERIES: &[&str] = &["1 medium apple", "1 bar protein bar", "200g chicken breast"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("macrotrack=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let queries: Vec<String> = if args.is_empty() {
        SAMPLE_QUERIES.iter().map(|q| q.to_string()).collect()
    } else {
        args
    };

    let config = ResolverConfig::from_env();
    let resolver = NutritionResolver::new(&config)?;

    for query in &queries {
        let resolution = resolver.resolve(query, 1.0).await;
        let tier = match resolution.tier() {
            Some(tier) => format!("{:?}", tier),
            None => "unresolved".to_string(),
        };
        println!("{} [{}]", query, tier);
        println!("{}", serde_json::to_string_pretty(resolution.fact())?);
    }

    Ok(())
}
