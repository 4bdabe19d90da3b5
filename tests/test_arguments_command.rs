use assert_cmd::Command;
use assert_fs::{prelude::FileWriteStr, NamedTempFile};
use predicates::prelude::{predicate, PredicateBooleanExt};

const TONI_INSTANCE: &str = "L: [a,b,c,p,q,r,s,t]
A: [a,b,c]
C(a): r
C(b): s
C(c): t
[r1]: p <- q,a
[r2]: q <- r
[r3]: r <- b,c
";

fn arguments_cmd(
    content: &str,
    args: &[&str],
) -> Result<(Command, NamedTempFile), Box<dyn std::error::Error>> {
    let file = NamedTempFile::new("instance.aba")?;
    file.write_str(content)?;
    let mut cmd = Command::cargo_bin("crustaba")?;
    cmd.arg("arguments")
        .arg("-f")
        .arg(file.path())
        .args(args);
    Ok((cmd, file))
}

#[test]
fn test_toni_no_transform() -> Result<(), Box<dyn std::error::Error>> {
    let (mut cmd, file) = arguments_cmd(TONI_INSTANCE, &["--no-transform"])?;
    let expected = "ARGUMENTS
  [A1] {a} ⊢ a
  [A2] {b} ⊢ b
  [A3] {c} ⊢ c
  [A4] {b,c} ⊢ r
  [A5] {b,c} ⊢ q
  [A6] {a,b,c} ⊢ p
ATTACKS
  [A4] → [A1]
  [A4] → [A6]
";
    cmd.assert()
        .success()
        .stdout(predicate::eq(expected))
        .stderr(predicate::str::contains("generated 6 arguments"));
    file.close()?;
    Ok(())
}

#[test]
fn test_toni_transformed() -> Result<(), Box<dyn std::error::Error>> {
    let (mut cmd, file) = arguments_cmd(TONI_INSTANCE, &[])?;
    cmd.assert().success().stdout(
        predicate::str::starts_with("ARGUMENTS\n  [A1] {a} ⊢ a\n  [A2] {b} ⊢ b\n  [A3] {c} ⊢ c\n")
            .and(predicate::str::contains("{b,c} ⊢ r\n"))
            .and(predicate::str::contains("{a,qd} ⊢ p\n"))
            .and(predicate::str::contains("{rd} ⊢ q\n"))
            .and(predicate::str::contains("\nATTACKS\n")),
    );
    file.close()?;
    Ok(())
}

#[test]
fn test_circular_framework() -> Result<(), Box<dyn std::error::Error>> {
    let (mut cmd, file) = arguments_cmd("L: [a,p]\nA: [a]\n[r1]: p <- p\n[r2]: p <- a\n", &[])?;
    cmd.assert().success().stdout(
        predicate::str::starts_with("ARGUMENTS\n  [A1] {a} ⊢ a\n")
            .and(predicate::str::contains("{a} ⊢ p\n"))
            .and(predicate::str::ends_with("ATTACKS\n  None\n")),
    );
    file.close()?;
    Ok(())
}

#[test]
fn test_iccma23_reader() -> Result<(), Box<dyn std::error::Error>> {
    let (mut cmd, file) = arguments_cmd(
        "p aba 8\na 1\na 2\na 3\nc 1 6\nc 2 7\nc 3 8\nr 4 5 1\nr 5\nr 6 2 3\n",
        &["--reader", "iccma23-aba", "--no-transform"],
    )?;
    cmd.assert().success().stdout(
        predicate::str::contains("  [A4] {} ⊢ 5\n")
            .and(predicate::str::contains("  [A5] {1} ⊢ 4\n"))
            .and(predicate::str::contains("  [A6] {2,3} ⊢ 6\n"))
            .and(predicate::str::ends_with("ATTACKS\n  [A6] → [A1]\n  [A6] → [A5]\n")),
    );
    file.close()?;
    Ok(())
}

#[test]
fn test_empty_framework() -> Result<(), Box<dyn std::error::Error>> {
    let (mut cmd, file) = arguments_cmd("# nothing here\n", &[])?;
    cmd.assert()
        .success()
        .stdout(predicate::eq("ARGUMENTS\n  None\nATTACKS\n  None\n"));
    file.close()?;
    Ok(())
}

#[test]
fn test_missing_input() {
    let mut cmd = Command::cargo_bin("crustaba").unwrap();
    cmd.arg("arguments").assert().failure();
}
