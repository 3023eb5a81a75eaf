use std::io::Read;

use anyhow::{Context, Result};
use tracing::info;

use quillcheck::services::{ConfigStore, DetectorConfig};
use quillcheck::{init_logging, Classifier};

fn parse_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().any(|a| a == key)
}

fn load_config(args: &[String]) -> Result<DetectorConfig> {
    if let Some(path) = parse_arg_value(args, "--config") {
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("read config failed: {}", path))?;
        return serde_json::from_str(&raw)
            .with_context(|| format!("parse config failed: {}", path));
    }
    if has_flag(args, "--stored-config") {
        let store = ConfigStore::new().context("open config store failed")?;
        return store.load().context("load stored config failed");
    }
    Ok(DetectorConfig::default())
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("read stdin failed")?;
    Ok(text)
}

fn main() -> Result<()> {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if has_flag(&args, "--help") || has_flag(&args, "-h") {
        eprintln!(
            "Usage:\n  quillcheck [<file> ...] [--config <path.json>] [--stored-config] [--scores-only]\n\nNotes:\n  - With no file arguments the text is read from stdin.\n  - `--config` loads a detector calibration from an explicit JSON file;\n    `--stored-config` loads the one saved under the platform config dir.\n  - `--scores-only` prints only the probability block per input."
        );
        return Ok(());
    }

    let config = load_config(&args)?;
    let scores_only = has_flag(&args, "--scores-only");
    let classifier = Classifier::new(config);

    let files: Vec<&String> = args
        .iter()
        .filter(|a| !a.starts_with("--"))
        .filter(|a| parse_arg_value(&args, "--config").as_ref() != Some(*a))
        .collect();

    let inputs: Vec<(String, String)> = if files.is_empty() {
        vec![("<stdin>".to_string(), read_stdin()?)]
    } else {
        files
            .into_iter()
            .map(|path| {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("read file failed: {}", path))?;
                Ok((path.clone(), text))
            })
            .collect::<Result<_>>()?
    };

    for (name, text) in &inputs {
        let response = classifier.classify(text);
        let (ai, human, mixed) = response.scores.percentages();
        info!(
            input = %name,
            ai_pct = ai,
            human_pct = human,
            mixed_pct = mixed,
            label = ?response.scores.label,
            "classification complete"
        );

        if inputs.len() > 1 {
            println!("=== {} ===", name);
        }
        let json = if scores_only {
            serde_json::to_string_pretty(&response.scores)?
        } else {
            serde_json::to_string_pretty(&response)?
        };
        println!("{}", json);
    }

    Ok(())
}
