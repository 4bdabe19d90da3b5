use crate::aba::{ABAFramework, ArgumentPreferenceAttacks};
use anyhow::{Context, Result};
use std::io::Write;

/// A writer for the arguments and attacks computed on ABA+ frameworks.
///
/// Each kind of result is written as a section: a title line, followed by one indented line per item
/// (or an indented `None` if there is no item).
///
/// ```text
/// ARGUMENTS
///   [A1] {a} ⊢ a
///   [A2] {b} ⊢ b
///   [A3] {a} ⊢ x
/// ATTACKS
///   [A3] → [A2]
/// ```
///
/// The sections for ABA+ attacks between sets of assumptions are titled `NORMAL ATTACKS` and `REVERSE ATTACKS`,
/// and their items are written as `{a} -> {b}`.
#[derive(Default)]
pub struct ABAPlusWriter;

impl ABAPlusWriter {
    /// Writes the arguments of the framework.
    pub fn write_arguments(&self, writer: &mut dyn Write, framework: &ABAFramework) -> Result<()> {
        let items = framework
            .arguments()?
            .iter()
            .map(|a| framework.labelled(a).to_string())
            .collect::<Vec<String>>();
        write_section(writer, "ARGUMENTS", &items)
    }

    /// Writes the classical attacks of the framework.
    pub fn write_attacks(&self, writer: &mut dyn Write, framework: &ABAFramework) -> Result<()> {
        let items = framework
            .attacks()?
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<String>>();
        write_section(writer, "ATTACKS", &items)
    }

    /// Writes the subsets of the base assumptions of the framework.
    pub fn write_assumption_sets(
        &self,
        writer: &mut dyn Write,
        framework: &ABAFramework,
    ) -> Result<()> {
        let items = framework
            .assumption_combinations()?
            .iter()
            .map(|s| framework.labelled(s).to_string())
            .collect::<Vec<String>>();
        write_section(writer, "ASSUMPTION SETS", &items)
    }

    /// Writes the normal and reverse attacks between sets of assumptions.
    pub fn write_preference_attacks(
        &self,
        writer: &mut dyn Write,
        framework: &ABAFramework,
    ) -> Result<()> {
        for (title, attacks) in [
            ("NORMAL ATTACKS", framework.normal_attacks()?),
            ("REVERSE ATTACKS", framework.reverse_attacks()?),
        ] {
            let items = attacks
                .iter()
                .map(|a| framework.labelled(a).to_string())
                .collect::<Vec<String>>();
            write_section(writer, title, &items)?;
        }
        Ok(())
    }

    /// Writes the normal and reverse attacks between arguments.
    pub fn write_argument_preference_attacks(
        &self,
        writer: &mut dyn Write,
        attacks: &ArgumentPreferenceAttacks,
    ) -> Result<()> {
        for (title, attacks) in [
            ("NORMAL ATTACKS", &attacks.normal),
            ("REVERSE ATTACKS", &attacks.reverse),
        ] {
            let items = attacks
                .iter()
                .map(|a| a.to_string())
                .collect::<Vec<String>>();
            write_section(writer, title, &items)?;
        }
        Ok(())
    }
}

fn write_section(writer: &mut dyn Write, title: &str, items: &[String]) -> Result<()> {
    let context = || format!("while writing section {}", title);
    writeln!(writer, "{}", title).with_context(context)?;
    if items.is_empty() {
        writeln!(writer, "  None").with_context(context)?;
    }
    items
        .iter()
        .try_for_each(|item| writeln!(writer, "  {}", item).with_context(context))?;
    writer.flush().with_context(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aba::tests_utils::toni_tutorial_ex;
    use std::io::BufWriter;

    fn write_to_string<F>(f: F) -> String
    where
        F: FnOnce(&mut dyn Write) -> Result<()>,
    {
        let mut buffer = BufWriter::new(Vec::new());
        f(&mut buffer).unwrap();
        String::from_utf8(buffer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_write_arguments_and_attacks() {
        let mut framework = toni_tutorial_ex();
        framework.generate_arguments();
        framework.generate_attacks().unwrap();
        let writer = ABAPlusWriter::default();
        let arguments = write_to_string(|w| writer.write_arguments(w, &framework));
        assert_eq!(7, arguments.lines().count());
        assert!(arguments.starts_with("ARGUMENTS\n  [A1] {a} ⊢ a\n"));
        assert!(arguments.contains("  [A4] {b,c} ⊢ r\n"));
        let attacks = write_to_string(|w| writer.write_attacks(w, &framework));
        assert_eq!("ATTACKS\n  [A4] → [A1]\n  [A4] → [A6]\n", attacks);
    }

    #[test]
    fn test_write_assumption_sets() {
        let mut framework = toni_tutorial_ex();
        framework.enumerate_assumption_subsets();
        let writer = ABAPlusWriter::default();
        let sets = write_to_string(|w| writer.write_assumption_sets(w, &framework));
        assert_eq!(
            "ASSUMPTION SETS\n  {}\n  {a}\n  {b}\n  {c}\n  {a,b}\n  {a,c}\n  {b,c}\n  {a,b,c}\n",
            sets
        );
    }

    #[test]
    fn test_write_preference_attacks() {
        let mut framework = toni_tutorial_ex();
        framework.generate_arguments();
        framework.enumerate_assumption_subsets();
        framework.generate_preference_attacks().unwrap();
        let writer = ABAPlusWriter::default();
        let attacks = write_to_string(|w| writer.write_preference_attacks(w, &framework));
        assert!(attacks.starts_with("NORMAL ATTACKS\n  {"));
        assert!(attacks.contains("  {b,c} -> {a}\n"));
        assert!(attacks.ends_with("REVERSE ATTACKS\n  None\n"));
    }

    #[test]
    fn test_write_argument_preference_attacks() {
        let mut framework = toni_tutorial_ex();
        framework.new_preference("a", "b").unwrap();
        framework.generate_arguments();
        let attacks = framework.generate_argument_preference_attacks().unwrap();
        let writer = ABAPlusWriter::default();
        let s = write_to_string(|w| writer.write_argument_preference_attacks(w, &attacks));
        assert_eq!(
            "NORMAL ATTACKS\n  None\nREVERSE ATTACKS\n  [A1] → [A4]\n  [A6] → [A4]\n",
            s
        );
    }

    #[test]
    fn test_write_before_computing() {
        let framework = toni_tutorial_ex();
        let writer = ABAPlusWriter::default();
        let mut buffer = BufWriter::new(Vec::new());
        writer.write_arguments(&mut buffer, &framework).unwrap_err();
        writer.write_attacks(&mut buffer, &framework).unwrap_err();
        writer
            .write_preference_attacks(&mut buffer, &framework)
            .unwrap_err();
    }
}
