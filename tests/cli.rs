use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

const HEADER: &str =
    "accountNumber\tmutationcode\ttransactiondate\tvaluedate\tstartsaldo\tendsaldo\tamount\tdescription";

fn guilder(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("guilder").unwrap();
    cmd.env("GUILDER_CONFIG_DIR", config_dir);
    cmd
}

fn write_statement(dir: &Path, name: &str, rows: &[(&str, &str, &str)]) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut content = format!("{HEADER}\n");
    for (date, amount, description) in rows {
        content.push_str(&format!(
            "NL01BANK0123456789\tEUR\t{date}\t{date}\t100,00\t90,01\t{amount}\t{description}\n"
        ));
    }
    std::fs::write(&path, &content).unwrap();
    path
}

#[test]
fn init_import_status_flow() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config");
    let data = dir.path().join("data");
    std::fs::create_dir_all(&config).unwrap();

    guilder(&config)
        .args(["init", "--data-dir", data.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized guilder"));

    let statement = write_statement(
        dir.path(),
        "statement.txt",
        &[
            ("20240115", "-9,99", "/TRTP/SEPA/NAME/ALBERT HEIJN 1234/REMI/GROCERIES"),
            ("20240116", "50,00", "/NAME/WERKGEVER BV/REMI/salary"),
        ],
    );

    guilder(&config)
        .args(["import", statement.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 rows read"))
        .stdout(predicate::str::contains("Store now holds 2 transactions"));

    guilder(&config)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Transactions:  2"))
        .stdout(predicate::str::contains("food"));

    guilder(&config)
        .arg("transactions")
        .assert()
        .success()
        .stdout(predicate::str::contains("ALBERT HEIJN 1234"))
        .stdout(predicate::str::contains("2024-01-15"));
}

#[test]
fn import_works_on_fresh_data_dir_without_init() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config");
    let data = dir.path().join("data");
    std::fs::create_dir_all(&config).unwrap();
    std::fs::create_dir_all(&data).unwrap();

    // Settings exist but `init` has never run, so no database file yet.
    std::fs::write(
        config.join("settings.json"),
        format!("{{\"data_dir\": \"{}\"}}\n", data.display()),
    )
    .unwrap();

    let statement = write_statement(
        dir.path(),
        "statement.txt",
        &[("20240115", "-9,99", "/NAME/JUMBO/REMI/x")],
    );

    guilder(&config)
        .args(["import", statement.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Store now holds 1 transactions"));

    guilder(&config)
        .arg("transactions")
        .assert()
        .success()
        .stdout(predicate::str::contains("JUMBO"));
}

#[test]
fn reimporting_the_same_file_keeps_row_count_stable() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config");
    let data = dir.path().join("data");
    std::fs::create_dir_all(&config).unwrap();

    guilder(&config)
        .args(["init", "--data-dir", data.to_str().unwrap()])
        .assert()
        .success();

    let statement = write_statement(
        dir.path(),
        "statement.txt",
        &[("20240115", "-9,99", "/NAME/JUMBO/REMI/x")],
    );

    guilder(&config)
        .args(["import", statement.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Store now holds 1 transactions"));

    guilder(&config)
        .args(["import", statement.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 duplicates removed"))
        .stdout(predicate::str::contains("Store now holds 1 transactions"));
}

#[test]
fn import_with_missing_column_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config");
    let data = dir.path().join("data");
    std::fs::create_dir_all(&config).unwrap();

    guilder(&config)
        .args(["init", "--data-dir", data.to_str().unwrap()])
        .assert()
        .success();

    let bad = dir.path().join("bad.txt");
    std::fs::write(&bad, "transactiondate\tamount\n20240115\t-9,99\n").unwrap();

    guilder(&config)
        .args(["import", bad.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing expected column"));
}

#[test]
fn categories_lists_builtin_rules_in_priority_order() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config");
    std::fs::create_dir_all(&config).unwrap();

    guilder(&config)
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("Built-in category rules"))
        .stdout(predicate::str::contains("food"))
        .stdout(predicate::str::contains("subscription"));
}

#[test]
fn dedupe_command_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config");
    let data = dir.path().join("data");
    std::fs::create_dir_all(&config).unwrap();

    guilder(&config)
        .args(["init", "--data-dir", data.to_str().unwrap()])
        .assert()
        .success();

    guilder(&config)
        .arg("dedupe")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 duplicate rows removed"));
}
