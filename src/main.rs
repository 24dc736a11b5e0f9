use std::error::Error;
use std::sync::Arc;

use serde_json::{Value, json};
use suggest::{DataSource, InputSource, SuggestConfig, by_score_desc, highlight};
use tracing_subscriber::EnvFilter;

fn demo_records() -> Vec<Value> {
    ["Apple", "Apricot", "Banana", "Blackberry", "Crème brûlée", "Grape", "Pineapple"]
        .iter()
        .map(|name| json!({ "name": name }))
        .collect()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let Some(query) = args.next() else {
        eprintln!("Usage: suggest <query> [config.yaml]");
        std::process::exit(1);
    };

    let mut config = match args.next() {
        Some(path) => SuggestConfig::from_file(path)?,
        None => SuggestConfig::default(),
    }
    .with_process_env()?;
    if config.matcher.keys.is_none() {
        config.matcher.keys = Some(vec!["name".to_string()]);
    }

    let pipeline = Arc::new(config.build().with_sort(by_score_desc()));
    let source = DataSource::deferred(async { Ok(demo_records()) });

    match pipeline.start(InputSource::TextValue(query), source).await? {
        None => println!("query does not meet the trigger threshold"),
        Some(feedback) if feedback.results.is_empty() => {
            println!("no results for {:?}", feedback.query)
        }
        Some(feedback) => {
            for entry in &feedback.results {
                let key = entry.key.as_deref().unwrap_or_default();
                let text = entry.value[key].as_str().unwrap_or_default();
                println!(
                    "{:6}: {}",
                    entry.matched.score,
                    highlight(text, &entry.matched.indices, "[", "]")
                );
            }
        }
    }

    Ok(())
}
