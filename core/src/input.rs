use std::collections::HashMap;

use anyhow::{anyhow, Result};

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub text: String,
    pub metadata: HashMap<String, String>,
}

/// Splits a command line on whitespace. Double quotes group words and are
/// dropped from the result, so both `"buy milk"` and `notes:"ask Bob"` work.
pub fn split_command_line(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                in_word = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if in_quotes {
        return Err(anyhow!("Unterminated quote in: {}", line));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// Separates `key:value` tokens from free text. A token only counts as
/// metadata when its key expands to one of `known_keys`; anything else
/// (`10:30`, `re:`) stays part of the text.
pub fn parse_args(args: &[String], known_keys: &[&str]) -> Result<ParsedInput> {
    let mut text_parts = Vec::new();
    let mut metadata = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() {
                match expand_key(key, known_keys) {
                    Ok(full_key) => {
                        metadata.insert(full_key, value.to_string());
                        continue;
                    }
                    Err(KeyError::Ambiguous(matches)) => {
                        return Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches));
                    }
                    Err(KeyError::Unknown) => {}
                }
            }
        }
        text_parts.push(arg.as_str());
    }

    Ok(ParsedInput {
        text: text_parts.join(" "),
        metadata,
    })
}

#[derive(Debug, PartialEq)]
pub enum KeyError {
    Unknown,
    Ambiguous(Vec<String>),
}

/// Resolves an exact key or a unique prefix of one.
pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String, KeyError> {
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(KeyError::Unknown),
        _ => Err(KeyError::Ambiguous(
            matches.into_iter().map(String::from).collect(),
        )),
    }
}
