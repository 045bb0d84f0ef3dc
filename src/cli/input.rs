//! Article collection from arguments, files, directories and stdin

use anyhow::{Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::args::Args;

const ARTICLE_EXTENSIONS: [&str; 3] = ["txt", "md", "text"];

/// One article to analyze and where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub source: String,
    pub text: String,
}

/// Gather articles named on the command line, falling back to stdin
pub fn collect_articles(args: &Args) -> Result<Vec<Article>> {
    if let Some(text) = &args.text {
        return Ok(vec![Article {
            source: "<argument>".to_string(),
            text: text.clone(),
        }]);
    }

    if args.inputs.is_empty() {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading article from stdin")?;
        return Ok(vec![Article {
            source: "<stdin>".to_string(),
            text,
        }]);
    }

    let mut articles = Vec::new();
    for path in collect_article_files(&args.inputs) {
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading article {}", path.display()))?;
        articles.push(Article {
            source: path.display().to_string(),
            text,
        });
    }
    Ok(articles)
}

/// Expand inputs: files are taken as given, directories are walked for
/// article extensions.
pub fn collect_article_files(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_file() {
            files.push(input.clone());
        } else if input.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(input)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file() && has_article_extension(e.path()))
                .map(|e| e.into_path())
                .collect();
            found.sort();
            files.extend(found);
        } else {
            log::warn!("skipping {}: no such file or directory", input.display());
        }
    }

    files
}

fn has_article_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ARTICLE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_directory_walk_filters_extensions() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "second").unwrap();
        std::fs::write(dir.path().join("a.md"), "first").unwrap();
        std::fs::write(dir.path().join("image.png"), [0u8; 4]).unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("c.TXT"), "third").unwrap();

        let files = collect_article_files(&[dir.path().to_path_buf()]);
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.md", "b.txt", "c.TXT"]);
    }

    #[test]
    fn test_explicit_file_any_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("article.html");
        std::fs::write(&path, "<p>text</p>").unwrap();
        assert_eq!(collect_article_files(&[path.clone()]), vec![path]);
    }

    #[test]
    fn test_missing_input_skipped() {
        assert!(collect_article_files(&[PathBuf::from("/nonexistent/article.txt")]).is_empty());
    }

    #[test]
    fn test_text_argument() {
        let args = Args::try_parse_from(["fakecheckr", "Some article text"]).unwrap();
        let articles = collect_articles(&args).unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].source, "<argument>");
        assert_eq!(articles[0].text, "Some article text");
    }
}
