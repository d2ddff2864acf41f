//! Front matter handling for composed markup files
//!
//! Source files may carry YAML (`---`), TOML (`+++`) or JSON (`{...}`)
//! front matter. All three are parsed into a YAML mapping, enriched with
//! Git provenance fields, and written back as a single YAML block; the
//! body is carried over byte for byte. Files without a resolved commit are
//! returned completely unchanged.
//!
//! The provenance fields use the established `MonakoGit*` key names plus
//! `lastMod`, which the book theme picks up for its per-page Git links.

use log::debug;
use serde_yaml::{Mapping, Value};
use url::Url;

use crate::error::{Error, Result};
use crate::git::CommitInfo;

/// Split content into its front matter mapping and the remaining body.
///
/// Returns `None` for the mapping when the content has no front matter.
/// Delimiter-like text in the body is not mistaken for front matter
/// because the block ends at the first closing delimiter. A block that is
/// opened but never closed, or that does not parse, is an error.
pub fn split_front_matter(content: &str) -> Result<(Option<Mapping>, &str)> {
    if let Some(rest) = strip_delimiter_line(content, "---") {
        let (block, body) = take_until_close(rest, "---").ok_or_else(|| Error::Frontmatter {
            message: "unterminated YAML front matter block".to_string(),
        })?;
        return Ok((Some(parse_yaml_block(block)?), body));
    }

    if let Some(rest) = strip_delimiter_line(content, "+++") {
        let (block, body) = take_until_close(rest, "+++").ok_or_else(|| Error::Frontmatter {
            message: "unterminated TOML front matter block".to_string(),
        })?;
        let table: toml::Table = toml::from_str(block).map_err(|e| Error::Frontmatter {
            message: format!("invalid TOML front matter: {}", e),
        })?;
        return Ok((Some(toml_table_to_yaml(table)), body));
    }

    if content.starts_with('{') {
        let (object, body) = take_json_object(content)?;
        let parsed: serde_json::Value =
            serde_json::from_str(object).map_err(|e| Error::Frontmatter {
                message: format!("invalid JSON front matter: {}", e),
            })?;
        let serde_json::Value::Object(map) = parsed else {
            return Err(Error::Frontmatter {
                message: "JSON front matter is not an object".to_string(),
            });
        };
        return Ok((Some(json_object_to_yaml(map)), body));
    }

    Ok((None, content))
}

/// Merge Git provenance into the front matter of a markup file.
///
/// Without a commit the content is returned unchanged. With a commit the
/// existing front matter (if any) is normalized to YAML, the provenance
/// fields are appended, and the body follows unaltered.
pub fn expand_front_matter(
    content: &str,
    commit: Option<&CommitInfo>,
    origin_url: &str,
    branch: &str,
    remote_path: &str,
) -> Result<String> {
    let Some(commit) = commit else {
        debug!("No commit info for '{}', front matter left untouched", remote_path);
        return Ok(content.to_string());
    };

    let (front_matter, body) = split_front_matter(content)?;
    let mut fields = front_matter.unwrap_or_default();

    let mut insert = |key: &str, value: String| {
        fields.insert(Value::String(key.to_string()), Value::String(value));
    };
    insert("MonakoGitRemote", origin_url.to_string());
    insert("MonakoGitRemotePath", remote_path.to_string());
    insert("MonakoGitURL", file_web_link(origin_url, branch, remote_path));
    insert("MonakoGitLastCommitHash", commit.hash.clone());
    insert("MonakoGitURLCommit", commit_web_link(origin_url, &commit.hash));
    insert("lastMod", commit.date.to_rfc3339());
    insert("MonakoGitLastCommitAuthor", commit.author_name.clone());
    insert("MonakoGitLastCommitAuthorEmail", commit.author_email.clone());

    let yaml = serde_yaml::to_string(&fields).map_err(|e| Error::Frontmatter {
        message: format!("can't serialize front matter: {}", e),
    })?;
    Ok(format!("---\n{}---\n\n{}", yaml, body))
}

/// Web link to a file at a branch head, or `""` when the remote has no
/// well-known web frontend.
///
/// A trailing `.git` is stripped from the remote URL. Non-HTTP(S) remotes
/// (SSH, local paths) yield an empty string. Bitbucket spells the path
/// segment `src`, the other forges use `blob`.
pub fn file_web_link(origin_url: &str, branch: &str, remote_path: &str) -> String {
    match web_base(origin_url) {
        Some((base, host)) => {
            let middle = if host.contains("bitbucket") { "src" } else { "blob" };
            format!("{}/{}/{}/{}", base, middle, branch, remote_path)
        }
        None => String::new(),
    }
}

/// Web link to a commit, or `""` when the remote has no well-known web
/// frontend.
pub fn commit_web_link(origin_url: &str, commit_hash: &str) -> String {
    match web_base(origin_url) {
        Some((base, host)) => {
            let middle = if host.contains("bitbucket") { "commits" } else { "commit" };
            format!("{}/{}/{}", base, middle, commit_hash)
        }
        None => String::new(),
    }
}

/// Strip `.git` and validate that the remote is reachable over HTTP(S).
fn web_base(origin_url: &str) -> Option<(String, String)> {
    let trimmed = origin_url.strip_suffix(".git").unwrap_or(origin_url);
    let parsed = Url::parse(trimmed).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    let host = parsed.host_str()?.to_string();
    Some((trimmed.trim_end_matches('/').to_string(), host))
}

/// Consume a delimiter on the first line, returning the remaining text.
fn strip_delimiter_line<'a>(content: &'a str, delimiter: &str) -> Option<&'a str> {
    let (first, rest) = content.split_once('\n')?;
    (first.trim_end_matches('\r') == delimiter).then_some(rest)
}

/// Split at the first line equal to the closing delimiter.
///
/// Returns the raw block before the delimiter and the body after the
/// delimiter line, or `None` when the block never closes.
fn take_until_close<'a>(rest: &'a str, delimiter: &str) -> Option<(&'a str, &'a str)> {
    let mut offset = 0;
    while offset <= rest.len() {
        let line_end = rest[offset..].find('\n').map(|i| offset + i);
        let line = match line_end {
            Some(end) => &rest[offset..end],
            None => &rest[offset..],
        };
        if line.trim_end_matches('\r') == delimiter {
            let block = &rest[..offset];
            let body = match line_end {
                Some(end) => &rest[end + 1..],
                None => "",
            };
            return Some((block, body));
        }
        match line_end {
            Some(end) => offset = end + 1,
            None => break,
        }
    }
    None
}

/// Take a balanced JSON object off the front of the content.
///
/// Braces inside strings do not count, escapes are honored. One newline
/// directly after the closing brace is consumed.
fn take_json_object(content: &str) -> Result<(&str, &str)> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, ch) in content.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = i + ch.len_utf8();
                    let body = &content[end..];
                    let body = body
                        .strip_prefix("\r\n")
                        .or_else(|| body.strip_prefix('\n'))
                        .unwrap_or(body);
                    return Ok((&content[..end], body));
                }
            }
            _ => {}
        }
    }

    Err(Error::Frontmatter {
        message: "unterminated JSON front matter object".to_string(),
    })
}

/// Parse a YAML front matter block into a mapping.
///
/// An empty block is an empty mapping; scalar or sequence blocks are
/// rejected.
fn parse_yaml_block(block: &str) -> Result<Mapping> {
    let value: Value = serde_yaml::from_str(block).map_err(|e| Error::Frontmatter {
        message: format!("invalid YAML front matter: {}", e),
    })?;
    match value {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(mapping) => Ok(mapping),
        _ => Err(Error::Frontmatter {
            message: "front matter is not a key/value mapping".to_string(),
        }),
    }
}

fn toml_table_to_yaml(table: toml::Table) -> Mapping {
    table
        .into_iter()
        .map(|(key, value)| (Value::String(key), toml_value_to_yaml(value)))
        .collect()
}

fn toml_value_to_yaml(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => Value::Number(f.into()),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => {
            Value::Sequence(items.into_iter().map(toml_value_to_yaml).collect())
        }
        toml::Value::Table(table) => Value::Mapping(toml_table_to_yaml(table)),
    }
}

fn json_object_to_yaml(map: serde_json::Map<String, serde_json::Value>) -> Mapping {
    map.into_iter()
        .map(|(key, value)| (Value::String(key), json_value_to_yaml(value)))
        .collect()
}

fn json_value_to_yaml(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else {
                Value::Number(n.as_f64().unwrap_or_default().into())
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => {
            Value::Sequence(items.into_iter().map(json_value_to_yaml).collect())
        }
        serde_json::Value::Object(map) => Value::Mapping(json_object_to_yaml(map)),
    }
}
