use assert_cmd::Command;
use assert_fs::{prelude::FileWriteStr, NamedTempFile};
use predicates::prelude::{predicate, PredicateBooleanExt};

const INSTANCE: &str = "L: [a,b,x]
A: [a,b]
C(b): x
[r1]: x <- a
";

const ARGUMENTS_AND_ATTACKS: &str = "ARGUMENTS
  [A1] {a} ⊢ a
  [A2] {b} ⊢ b
  [A3] {a} ⊢ x
ATTACKS
  [A3] → [A2]
";

fn aba_plus_cmd(
    content: &str,
    args: &[&str],
) -> Result<(Command, NamedTempFile), Box<dyn std::error::Error>> {
    let file = NamedTempFile::new("instance.aba")?;
    file.write_str(content)?;
    let mut cmd = Command::cargo_bin("crustaba")?;
    cmd.arg("aba-plus").arg("-f").arg(file.path()).args(args);
    Ok((cmd, file))
}

#[test]
fn test_no_preferences() -> Result<(), Box<dyn std::error::Error>> {
    let (mut cmd, file) = aba_plus_cmd(INSTANCE, &[])?;
    let expected = format!(
        "{}NORMAL ATTACKS
  {{a}} -> {{a,b}}
  {{a}} -> {{b}}
  {{a,b}} -> {{a,b}}
  {{a,b}} -> {{b}}
REVERSE ATTACKS
  None
",
        ARGUMENTS_AND_ATTACKS
    );
    cmd.assert()
        .success()
        .stdout(predicate::eq(expected.as_str()))
        .stderr(predicate::str::contains("generated 4 normal attacks"));
    file.close()?;
    Ok(())
}

#[test]
fn test_reverse_attacks() -> Result<(), Box<dyn std::error::Error>> {
    let content = format!("{}PREF: b > a\n", INSTANCE);
    let (mut cmd, file) = aba_plus_cmd(&content, &[])?;
    cmd.assert().success().stdout(
        predicate::str::starts_with(ARGUMENTS_AND_ATTACKS)
            .and(predicate::str::contains("NORMAL ATTACKS\n  None\nREVERSE ATTACKS\n"))
            .and(predicate::str::contains("  {b} -> {a}\n"))
            .and(predicate::str::contains("  {b} -> {a,b}\n"))
            .and(predicate::str::contains("  {a,b} -> {a}\n"))
            .and(predicate::str::contains("  {a,b} -> {a,b}\n")),
    );
    file.close()?;
    Ok(())
}

#[test]
fn test_reverse_attacks_with_lower_than_chain() -> Result<(), Box<dyn std::error::Error>> {
    let content = format!("{}PREF: a < b\n", INSTANCE);
    let (mut cmd, file) = aba_plus_cmd(&content, &[])?;
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("NORMAL ATTACKS\n  None\n"));
    file.close()?;
    Ok(())
}

#[test]
fn test_equality_preference_warns() -> Result<(), Box<dyn std::error::Error>> {
    let content = format!("{}PREF: a = b\n", INSTANCE);
    let (mut cmd, file) = aba_plus_cmd(&content, &[])?;
    cmd.assert()
        .success()
        .stdout(predicate::str::ends_with("REVERSE ATTACKS\n  None\n"))
        .stderr(predicate::str::contains("at line 5: equality preferences"));
    file.close()?;
    Ok(())
}

#[test]
fn test_arguments_mode() -> Result<(), Box<dyn std::error::Error>> {
    let content = format!("{}PREF: b > a\n", INSTANCE);
    let (mut cmd, file) = aba_plus_cmd(&content, &["--mode", "arguments"])?;
    let expected = format!(
        "{}NORMAL ATTACKS\n  None\nREVERSE ATTACKS\n  [A2] → [A3]\n",
        ARGUMENTS_AND_ATTACKS
    );
    cmd.assert()
        .success()
        .stdout(predicate::eq(expected.as_str()));
    file.close()?;
    Ok(())
}

#[test]
fn test_arguments_mode_no_preferences() -> Result<(), Box<dyn std::error::Error>> {
    let (mut cmd, file) = aba_plus_cmd(INSTANCE, &["--mode", "arguments", "--no-transform"])?;
    cmd.assert().success().stdout(predicate::str::ends_with(
        "NORMAL ATTACKS\n  [A3] → [A2]\nREVERSE ATTACKS\n  None\n",
    ));
    file.close()?;
    Ok(())
}

#[test]
fn test_unknown_mode() -> Result<(), Box<dyn std::error::Error>> {
    let (mut cmd, file) = aba_plus_cmd(INSTANCE, &["--mode", "sets"])?;
    cmd.assert().failure();
    file.close()?;
    Ok(())
}
