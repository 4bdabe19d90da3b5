use super::{ABAInstanceReader, WarningHandler};
use crate::aba::{RawABAFramework, RawRule};
use anyhow::{anyhow, Context, Result};
use std::io::{BufRead, BufReader, Read};

/// A reader for the ICCMA 2023 format dedicated to ABA frameworks.
///
/// This object is used to read the primitives of an ABA framework encoded using the ICCMA 2023 input format,
/// as defined on [the competition website](https://iccma2023.github.io/rules.html).
/// Atoms are labelled by their indexes (`1`, `2`, ...) and rules are named `r1`, `r2`, ... in their order of appearance.
/// This format has no preferences.
///
/// # ICCMA 2023 ABA format
///
/// The following content defines a framework with eight atoms,
/// where 1, 2, and 3 are assumptions; 6, 7, and 8 are their respective contraries; the set of rules is (4 &#8592; 5, 1 ), (5 &#8592;) and (6 &#8592; 2, 3).
///
/// ```text
/// p aba 8
/// # this is a comment
/// a 1
/// a 2
/// a 3
/// c 1 6
/// c 2 7
/// c 3 8
/// r 4 5 1
/// r 5
/// r 6 2 3
/// ```
#[derive(Default)]
pub struct Iccma23ABAReader {
    warning_handlers: Vec<WarningHandler>,
}

impl ABAInstanceReader for Iccma23ABAReader {
    fn read(&self, reader: &mut dyn Read) -> Result<RawABAFramework> {
        let br = BufReader::new(reader);
        let mut raw: Option<RawABAFramework> = None;
        let mut found_empty_lines = false;
        for (i, line) in br.lines().enumerate() {
            let context = || format!("while reading line with index {}", i);
            let l = line.with_context(context)?;
            if l.starts_with('#') {
                continue;
            }
            if l.trim().is_empty() {
                found_empty_lines = true;
                continue;
            }
            if found_empty_lines {
                return Err(anyhow!("got content after an empty line")).with_context(context);
            }
            let words = l.split_whitespace().collect::<Vec<&str>>();
            let raw = match raw.as_mut() {
                Some(r) => r,
                None => {
                    let n_atoms = read_preamble(&words, "aba").with_context(context)?;
                    raw = Some(RawABAFramework {
                        language: (1..=n_atoms).map(|n| n.to_string()).collect(),
                        ..Default::default()
                    });
                    continue;
                }
            };
            let n_atoms = raw.language.len();
            let read_atom = |word: &str| match word.parse::<isize>() {
                Ok(n) if n >= 1 && (n as usize) <= n_atoms => Ok(word.to_string()),
                _ => Err(anyhow!("invalid atom index {}", word)).with_context(context),
            };
            let expect_n_words = |first, expected| {
                if expected != words.len() {
                    Err(anyhow!(
                        r#"wrong number of words for a "{}" line; expected {}, got {}"#,
                        first,
                        expected,
                        words.len()
                    ))
                    .with_context(context)
                } else {
                    Ok(())
                }
            };
            match words[0] {
                "a" => {
                    expect_n_words("a", 2)?;
                    raw.assumptions.push(read_atom(words[1])?);
                }
                "c" => {
                    expect_n_words("c", 3)?;
                    let assumption = read_atom(words[1])?;
                    let contrary = read_atom(words[2])?;
                    raw.contraries.push((assumption, contrary));
                }
                "r" => {
                    if words.len() == 1 {
                        return Err(anyhow!(
                            r#"wrong number of words for a "r" line; expected at least 2, got 1"#
                        ))
                        .with_context(context);
                    }
                    let head = read_atom(words[1])?;
                    let body = words
                        .iter()
                        .skip(2)
                        .map(|w| read_atom(w))
                        .collect::<Result<Vec<String>>>()?;
                    let id = format!("r{}", raw.rules.len() + 1);
                    raw.rules.push(RawRule { id, head, body });
                }
                _ => {
                    return Err(anyhow!(r#"unexpected first word "{}""#, words[0]))
                        .with_context(context)
                }
            }
        }
        raw.ok_or_else(|| anyhow!("missing preamble"))
    }

    fn add_warning_handler(&mut self, h: WarningHandler) {
        self.warning_handlers.push(h);
    }
}

fn read_preamble(words: &[&str], expected_kind: &str) -> Result<usize> {
    if words.len() != 3 {
        return Err(anyhow!(
            r#"error in preamble; expected 3 words, got {}"#,
            words.len()
        ));
    }
    if words[0] != "p" {
        return Err(anyhow!(
            r#"error in first word of preamble; expected "p", got "{}""#,
            words[0]
        ));
    }
    if words[1] != expected_kind {
        return Err(anyhow!(
            r#"error in second word of preamble; expected "{}", got "{}""#,
            expected_kind,
            words[1]
        ));
    }
    match words[2].parse::<isize>() {
        Ok(n) if n >= 0 => Ok(n as usize),
        _ => Err(anyhow!("error in preamble: invalid number of atoms")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aba::ABAFrameworkBuilder;

    fn strings(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_ok() {
        let instance = "p aba 8\n# comment\na 1\na 2\na 3\nc 1 6\nc 2 7\nc 3 8\nr 4 5 1\nr 5\nr 6 2 3\n";
        let raw = Iccma23ABAReader::default()
            .read(&mut instance.as_bytes())
            .unwrap();
        assert_eq!(strings(&["1", "2", "3", "4", "5", "6", "7", "8"]), raw.language);
        assert_eq!(strings(&["1", "2", "3"]), raw.assumptions);
        assert_eq!(
            vec![
                ("1".to_string(), "6".to_string()),
                ("2".to_string(), "7".to_string()),
                ("3".to_string(), "8".to_string())
            ],
            raw.contraries
        );
        assert_eq!(
            vec![
                RawRule::new("r1", "4", &["5", "1"]),
                RawRule::new("r2", "5", &[]),
                RawRule::new("r3", "6", &["2", "3"]),
            ],
            raw.rules
        );
        assert!(raw.preferences.is_empty());
        let mut framework = ABAFrameworkBuilder::new().strict(true).build(&raw).unwrap();
        assert_eq!(3 + 2 + 1, framework.generate_arguments().len());
    }

    #[test]
    fn test_missing_preamble() {
        Iccma23ABAReader::default()
            .read(&mut "".as_bytes())
            .unwrap_err();
        Iccma23ABAReader::default()
            .read(&mut "a 1\n".as_bytes())
            .unwrap_err();
    }

    #[test]
    fn test_wrong_preamble() {
        for instance in ["p af 2\n", "p aba\n", "q aba 2\n", "p aba -1\n"] {
            Iccma23ABAReader::default()
                .read(&mut instance.as_bytes())
                .unwrap_err();
        }
    }

    #[test]
    fn test_invalid_atom() {
        for instance in ["p aba 2\na 3\n", "p aba 2\na 0\n", "p aba 2\nc 1 x\n", "p aba 2\nr 1 3\n"] {
            Iccma23ABAReader::default()
                .read(&mut instance.as_bytes())
                .unwrap_err();
        }
    }

    #[test]
    fn test_wrong_number_of_words() {
        for instance in ["p aba 2\na 1 2\n", "p aba 2\nc 1\n", "p aba 2\nr\n"] {
            Iccma23ABAReader::default()
                .read(&mut instance.as_bytes())
                .unwrap_err();
        }
    }

    #[test]
    fn test_unexpected_first_word() {
        Iccma23ABAReader::default()
            .read(&mut "p aba 2\nx 1\n".as_bytes())
            .unwrap_err();
    }

    #[test]
    fn test_content_after_empty_line() {
        Iccma23ABAReader::default()
            .read(&mut "p aba 2\n\na 1\n".as_bytes())
            .unwrap_err();
    }
}
