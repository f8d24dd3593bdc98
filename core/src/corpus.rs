use crate::document::{DocId, Document};
use anyhow::{Context, Result};
use rand::Rng;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const CATEGORIES: [&str; 6] = ["Electronics", "Footwear", "Fitness", "Home & Kitchen", "Books", "Toys"];

/// Synthetic product records with ids `1..=n`. The caller owns the generator,
/// so a seeded one reproduces the same corpus.
pub fn generate_products<R: Rng + ?Sized>(n: DocId, rng: &mut R) -> Vec<Document> {
    (1..=n)
        .map(|id| {
            let category = CATEGORIES[rng.random_range(0..CATEGORIES.len())];
            Document::new(id, format!("Product {id}"), category)
        })
        .collect()
}

/// Load documents from a `.json`/`.jsonl` file, or from every such file under
/// a directory (visited in path order, following symlinks). Any walk error
/// fails the whole load.
pub fn load_corpus(path: &Path) -> Result<Vec<Document>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if path.is_dir() {
        for entry in WalkDir::new(path).follow_links(true).sort_by_file_name() {
            let entry = entry.with_context(|| format!("walking corpus directory {}", path.display()))?;
            let p = entry.path();
            if p.is_file() && is_corpus_file(p) {
                files.push(p.to_path_buf());
            }
        }
    } else if path.is_file() {
        files.push(path.to_path_buf());
    } else {
        anyhow::bail!("corpus path {} does not exist", path.display());
    }

    let mut docs = Vec::new();
    for file in files {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(&file, &mut docs)?;
        } else {
            read_json(&file, &mut docs)?;
        }
    }
    tracing::info!(path = %path.display(), num_docs = docs.len(), "loaded corpus");
    Ok(docs)
}

fn is_corpus_file(path: &Path) -> bool {
    matches!(path.extension().and_then(|s| s.to_str()), Some("json" | "jsonl"))
}

fn read_jsonl(file: &Path, docs: &mut Vec<Document>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let doc: Document = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid document", file.display(), lineno + 1))?;
        docs.push(doc);
    }
    Ok(())
}

fn read_json(file: &Path, docs: &mut Vec<Document>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let json: serde_json::Value = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("{}: invalid json", file.display()))?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                docs.push(serde_json::from_value(v).with_context(|| format!("{}: invalid document", file.display()))?);
            }
        }
        serde_json::Value::Object(_) => {
            docs.push(serde_json::from_value(json).with_context(|| format!("{}: invalid document", file.display()))?);
        }
        _ => anyhow::bail!("{}: expected a document or an array of documents", file.display()),
    }
    Ok(())
}
