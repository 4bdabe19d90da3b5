use super::{warning_result::WarningResult, ABAInstanceReader, WarningHandler};
use crate::aba::{expand_chain, RawABAFramework, RawRule};
use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::io::{BufRead, BufReader, Read};

lazy_static! {
    static ref LANGUAGE_LINE_PATTERN: Regex = Regex::new(r"^\s*L\s*:(.*)$").unwrap();
    static ref ASSUMPTIONS_LINE_PATTERN: Regex = Regex::new(r"^\s*A\s*:(.*)$").unwrap();
    static ref CONTRARY_LINE_PATTERN: Regex = Regex::new(r"^\s*C\s*\(").unwrap();
    static ref CONTRARY_LINE_NAMES_PATTERN: Regex =
        Regex::new(r"^\s*C\s*\(\s*([^\s(),]+)\s*\)\s*:\s*([^\s(),]+)\s*$").unwrap();
    static ref RULE_LINE_PATTERN: Regex = Regex::new(r"^\s*\[").unwrap();
    static ref RULE_LINE_PARTS_PATTERN: Regex =
        Regex::new(r"^\s*\[\s*([^\s\[\]]+)\s*\]\s*:\s*([^\s<,]+)\s*<-(.*)$").unwrap();
    static ref PREFERENCE_LINE_PATTERN: Regex = Regex::new(r"^\s*PREF\s*:(.*)$").unwrap();
}

fn read_list(content: &str) -> Result<Vec<String>> {
    let mut trimmed = content.trim();
    if let Some(inner) = trimmed.strip_prefix('[') {
        trimmed = inner
            .strip_suffix(']')
            .ok_or_else(|| anyhow!("missing closing bracket in {}", content.trim()))?;
    }
    let items = trimmed
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<&str>>();
    if let Some(item) = items.iter().find(|s| s.contains(char::is_whitespace)) {
        return Err(anyhow!("invalid literal name {:?}", item));
    }
    Ok(items.into_iter().map(|s| s.to_string()).collect())
}

fn try_read_contrary_line(l: &str) -> Result<Option<(String, String)>> {
    if !CONTRARY_LINE_PATTERN.is_match(l) {
        return Ok(None);
    }
    match CONTRARY_LINE_NAMES_PATTERN.captures(l) {
        Some(c) => Ok(Some((c[1].to_string(), c[2].to_string()))),
        None => Err(anyhow!("invalid contrary declaration in {}", l.trim())),
    }
}

fn try_read_rule_line(l: &str) -> Result<Option<RawRule>> {
    if !RULE_LINE_PATTERN.is_match(l) {
        return Ok(None);
    }
    match RULE_LINE_PARTS_PATTERN.captures(l) {
        Some(c) => Ok(Some(RawRule {
            id: c[1].to_string(),
            head: c[2].to_string(),
            body: read_list(&c[3])?,
        })),
        None => Err(anyhow!("invalid rule declaration in {}", l.trim())),
    }
}

type PreferenceMap = BTreeMap<String, BTreeSet<String>>;

fn try_read_preference_line(l: &str) -> Result<Option<WarningResult<PreferenceMap, String>>> {
    let content = match PREFERENCE_LINE_PATTERN.captures(l) {
        Some(c) => c[1].to_string(),
        None => return Ok(None),
    };
    let read_groups = |sep: char| {
        content
            .split(sep)
            .map(|g| {
                let group = read_list(g)?;
                if group.is_empty() {
                    Err(anyhow!("empty group in preference {}", content.trim()))
                } else {
                    Ok(group)
                }
            })
            .collect::<Result<Vec<Vec<String>>>>()
    };
    match (content.contains('>'), content.contains('<')) {
        (true, true) => Err(anyhow!(
            "preference chains cannot mix \">\" and \"<\" in {}",
            content.trim()
        )),
        (true, false) => Ok(Some(WarningResult::Ok(expand_chain(&read_groups('>')?)))),
        (false, true) => {
            let mut groups = read_groups('<')?;
            groups.reverse();
            Ok(Some(WarningResult::Ok(expand_chain(&groups))))
        }
        (false, false) if content.contains('=') => Ok(Some(WarningResult::Warned(
            PreferenceMap::new(),
            vec!["equality preferences carry no strict preference; ignored".to_string()],
        ))),
        (false, false) => Err(anyhow!("missing preference operator in {}", content.trim())),
    }
}

/// A reader for the ABA+ text format.
///
/// This object is used to read the primitives of an ABA+ framework, given line by line.
/// Empty lines and lines beginning with `#` are ignored.
/// Literal names are made of any characters but spaces, commas, brackets and parentheses; a leading `-` or `¬` denotes a negation.
///
/// # ABA+ text format
///
/// The following content defines a framework with the literals `a`, `b`, `c`, `p`, `q`, `r`, `s` and `t`,
/// where `a`, `b` and `c` are assumptions with respective contraries `r`, `s` and `t`,
/// and `a` is preferred over `b` and `c`.
///
/// ```text
/// L: [a,b,c,p,q,r,s,t]
/// A: [a,b,c]
/// C(a): r
/// C(b): s
/// C(c): t
/// [r1]: p <- q,a
/// [r2]: q <- r
/// [r3]: r <- b,c
/// [r4]: t <-
/// PREF: a > b,c
/// ```
///
/// Preference chains such as `a,b > c,d > e` are expanded; chains may also be written with `<`, from the least preferred literals.
/// `=` preferences, unknown lines and duplicated rule identifiers raise warnings.
///
/// # Example
///
/// ```
/// # use crustaba::aba::RawABAFramework;
/// # use crustaba::io::{ABAInstanceReader, ABAPlusReader};
/// fn read_raw_from_str(s: &str) -> RawABAFramework {
///     let reader = ABAPlusReader::default();
///     reader.read(&mut s.as_bytes()).expect("invalid ABA+ framework")
/// }
/// # read_raw_from_str("L: [a]\nA: [a]\n");
/// ```
#[derive(Default)]
pub struct ABAPlusReader {
    warning_handlers: Vec<WarningHandler>,
}

impl ABAInstanceReader for ABAPlusReader {
    fn read(&self, reader: &mut dyn Read) -> Result<RawABAFramework> {
        let mut raw = RawABAFramework::default();
        let mut rule_ids = HashSet::new();
        let br = BufReader::new(reader);
        for (i, line) in br.lines().enumerate() {
            let context = || format!("while reading line with index {}", i);
            let warn = |w: String| {
                self.warning_handlers
                    .iter()
                    .for_each(|h| (h)(1 + i, w.to_string()))
            };
            let l = &line.with_context(context)?;
            if l.trim().is_empty() || l.trim_start().starts_with('#') {
                continue;
            }
            if let Some(c) = LANGUAGE_LINE_PATTERN.captures(l) {
                raw.language
                    .append(&mut read_list(&c[1]).with_context(context)?);
                continue;
            }
            if let Some(c) = ASSUMPTIONS_LINE_PATTERN.captures(l) {
                raw.assumptions
                    .append(&mut read_list(&c[1]).with_context(context)?);
                continue;
            }
            if let Some(contrary) = try_read_contrary_line(l).with_context(context)? {
                raw.contraries.push(contrary);
                continue;
            }
            if let Some(rule) = try_read_rule_line(l).with_context(context)? {
                if !rule_ids.insert(rule.id.clone()) {
                    warn(format!("duplicate rule identifier {}", rule.id));
                }
                raw.rules.push(rule);
                continue;
            }
            if let Some(result) = try_read_preference_line(l).with_context(context)? {
                let preferences = result.consume_warnings(|warnings| warnings.into_iter().for_each(warn));
                if !preferences.is_empty() {
                    raw.preferences.push(preferences);
                }
                continue;
            }
            warn(format!("ignoring unknown line \"{}\"", l.trim()));
        }
        Ok(raw)
    }

    fn add_warning_handler(&mut self, h: WarningHandler) {
        self.warning_handlers.push(h);
    }
}
