//! Line-level parsing of requirements-style manifests

use super::{Directive, EntryKind, Operator, Requirement, VersionSpecifier};

/// Options that are meaningless without a value
const VALUE_OPTIONS: &[&str] = &[
    "-r",
    "--requirement",
    "-c",
    "--constraint",
    "-e",
    "--editable",
    "-i",
    "--index-url",
    "--extra-index-url",
    "-f",
    "--find-links",
];

/// Options pip accepts at the end of a requirement line
const REQUIREMENT_OPTIONS: &[&str] = &[
    "--hash",
    "--config-settings",
    "--global-option",
    "--install-option",
];

/// Archive suffixes that mark a bare file reference
const ARCHIVE_SUFFIXES: &[&str] = &[".whl", ".tar.gz", ".tar.bz2", ".zip"];

/// Join continuation lines and strip comments
///
/// Returns `(line_number, content)` pairs, where `line_number` is the
/// 1-based line the logical line started on. Blank results are dropped.
/// A line carrying a comment never continues, even if it ends in `\`.
pub fn logical_lines(content: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (index, raw) in content.lines().enumerate() {
        let (start, mut joined) = pending.take().unwrap_or((index + 1, String::new()));
        let code = strip_comment(raw);

        if code.len() == raw.len() {
            if let Some(head) = raw.strip_suffix('\\') {
                joined.push_str(head);
                pending = Some((start, joined));
                continue;
            }
        }

        joined.push_str(code);
        push_line(&mut lines, start, &joined);
    }

    if let Some((start, joined)) = pending {
        push_line(&mut lines, start, &joined);
    }

    lines
}

fn push_line(lines: &mut Vec<(usize, String)>, start: usize, joined: &str) {
    let stripped = joined.trim();
    if !stripped.is_empty() {
        lines.push((start, stripped.to_string()));
    }
}

/// Remove a `#` comment that starts the line or follows whitespace
fn strip_comment(line: &str) -> &str {
    let mut previous_is_space = true;
    for (index, c) in line.char_indices() {
        if c == '#' && previous_is_space {
            return &line[..index];
        }
        previous_is_space = c.is_whitespace();
    }
    line
}

/// Parse one logical line into a manifest entry
pub fn parse_line(line: &str) -> Result<EntryKind, String> {
    if line.starts_with('-') {
        return parse_directive(line).map(EntryKind::Directive);
    }

    if is_reference(line) {
        return Ok(EntryKind::Reference {
            target: line.to_string(),
        });
    }

    parse_requirement(line).map(EntryKind::Requirement)
}

fn parse_directive(line: &str) -> Result<Directive, String> {
    let (flag, value) = if line.starts_with("--") {
        let end = line
            .find(|c: char| c.is_whitespace() || c == '=')
            .unwrap_or(line.len());
        let rest = line[end..].trim_start();
        (&line[..end], rest.strip_prefix('=').unwrap_or(rest).trim())
    } else {
        let end = line
            .char_indices()
            .nth(2)
            .map(|(index, _)| index)
            .unwrap_or(line.len());
        (&line[..end], line[end..].trim())
    };

    if flag == "-" || flag == "--" {
        return Err(format!("invalid option '{line}'"));
    }

    if value.is_empty() && VALUE_OPTIONS.contains(&flag) {
        return Err(format!("option '{flag}' requires a value"));
    }

    Ok(Directive {
        flag: flag.to_string(),
        value: (!value.is_empty()).then(|| value.to_string()),
    })
}

/// URLs, archives and anything shaped like a filesystem path
fn is_reference(line: &str) -> bool {
    if line.starts_with('~') {
        return true;
    }

    let first = line
        .split(|c: char| c.is_whitespace() || c == ';')
        .next()
        .unwrap_or_default();
    if first.contains("://")
        || first.starts_with("git+")
        || ARCHIVE_SUFFIXES.iter().any(|s| first.ends_with(s))
    {
        return true;
    }

    // `.`, `..`, `./pkg[extra]`, `src/pkg`, `C:\pkg`: a path before any extras or operator
    let head = first
        .split(['[', '<', '>', '=', '!', '~'])
        .next()
        .unwrap_or_default();
    head.starts_with('.') || head.contains(['/', '\\'])
}

/// Split trailing per-requirement options such as `--hash=sha256:...`
///
/// Options start at the first whitespace-preceded `--`; a value may be
/// joined with `=` or given as the next token.
fn split_requirement_options(line: &str) -> Result<(&str, Vec<Directive>), String> {
    let Some(start) = line
        .match_indices("--")
        .map(|(index, _)| index)
        .find(|&index| line[..index].ends_with(char::is_whitespace))
    else {
        return Ok((line, Vec::new()));
    };

    let mut options: Vec<Directive> = Vec::new();
    for token in line[start..].split_whitespace() {
        if token.starts_with("--") {
            let (flag, value) = match token.split_once('=') {
                Some((flag, value)) => (flag, Some(value.to_string())),
                None => (token, None),
            };
            if !REQUIREMENT_OPTIONS.contains(&flag) {
                return Err(format!("option '{flag}' is not allowed on a requirement line"));
            }
            options.push(Directive {
                flag: flag.to_string(),
                value,
            });
        } else {
            match options.last_mut() {
                Some(option) if option.value.is_none() => option.value = Some(token.to_string()),
                _ => return Err(format!("unexpected '{token}' after requirement options")),
            }
        }
    }

    if let Some(option) = options
        .iter()
        .find(|option| option.value.as_deref().is_none_or(str::is_empty))
    {
        return Err(format!("option '{}' requires a value", option.flag));
    }

    Ok((line[..start].trim_end(), options))
}

fn parse_requirement(line: &str) -> Result<Requirement, String> {
    let (line, options) = split_requirement_options(line)?;

    let name_end = line
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
        .unwrap_or(line.len());
    let name = &line[..name_end];
    validate_name(name, line)?;

    let mut rest = line[name_end..].trim_start();

    let mut extras = Vec::new();
    if let Some(after_bracket) = rest.strip_prefix('[') {
        let close = after_bracket
            .find(']')
            .ok_or_else(|| format!("unclosed extras in '{line}'"))?;
        for extra in after_bracket[..close].split(',') {
            let extra = extra.trim();
            if extra.is_empty() {
                continue;
            }
            validate_name(extra, line)?;
            extras.push(extra.to_string());
        }
        rest = after_bracket[close + 1..].trim_start();
    }

    if let Some(after_at) = rest.strip_prefix('@') {
        let (url, marker) = split_url_marker(after_at.trim());
        if url.is_empty() {
            return Err(format!("missing URL after '@' in '{line}'"));
        }
        return Ok(Requirement {
            name: name.to_string(),
            extras,
            specifiers: Vec::new(),
            url: Some(url.to_string()),
            marker: parse_marker(marker, line)?,
            options,
        });
    }

    let (spec, marker) = match rest.split_once(';') {
        Some((spec, marker)) => (spec.trim(), Some(marker)),
        None => (rest.trim(), None),
    };

    let spec = spec
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or(spec)
        .trim();

    let specifiers = if spec.is_empty() {
        Vec::new()
    } else {
        spec.split(',')
            .map(parse_specifier)
            .collect::<Result<Vec<_>, _>>()?
    };

    Ok(Requirement {
        name: name.to_string(),
        extras,
        specifiers,
        url: None,
        marker: parse_marker(marker, line)?,
        options,
    })
}

fn validate_name(name: &str, line: &str) -> Result<(), String> {
    let valid = match (name.chars().next(), name.chars().last()) {
        (Some(first), Some(last)) => first.is_ascii_alphanumeric() && last.is_ascii_alphanumeric(),
        _ => false,
    };

    if valid {
        Ok(())
    } else if name.is_empty() {
        Err(format!("expected a package name in '{line}'"))
    } else {
        Err(format!("invalid package name '{name}'"))
    }
}

/// URLs may contain `;`, so only a whitespace-preceded `;` starts a marker
fn split_url_marker(rest: &str) -> (&str, Option<&str>) {
    let mut previous_is_space = false;
    for (index, c) in rest.char_indices() {
        if c == ';' && previous_is_space {
            return (rest[..index].trim(), Some(&rest[index + 1..]));
        }
        previous_is_space = c.is_whitespace();
    }
    (rest, None)
}

fn parse_marker(marker: Option<&str>, line: &str) -> Result<Option<String>, String> {
    match marker.map(str::trim) {
        None => Ok(None),
        Some("") => Err(format!("empty environment marker in '{line}'")),
        Some(marker) => Ok(Some(marker.to_string())),
    }
}

fn parse_specifier(clause: &str) -> Result<VersionSpecifier, String> {
    let clause = clause.trim();
    let (operator, version) = Operator::ALL
        .iter()
        .find_map(|op| clause.strip_prefix(op.as_str()).map(|rest| (*op, rest.trim())))
        .ok_or_else(|| format!("invalid version specifier '{clause}'"))?;

    let valid_version = !version.is_empty()
        && version
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '*' | '+' | '!' | '_' | '-'));
    if !valid_version {
        return Err(format!("invalid version in specifier '{clause}'"));
    }

    Ok(VersionSpecifier {
        operator,
        version: version.to_string(),
    })
}
