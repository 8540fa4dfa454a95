use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

#[test]
fn test_malformed_csv_handling() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "type, owner, processor, name, plan").unwrap();
    writeln!(file, "processor, 1, stripe").unwrap();
    // Invalid type
    writeln!(file, "refund, 1, stripe").unwrap();
    // Non-integer owner id
    writeln!(file, "subscribe, abc, , default, pro").unwrap();
    writeln!(file, "subscribe, 1, , default, pro").unwrap();

    let mut cmd = Command::new(cargo_bin!("billable"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading operation"))
        .stdout(predicate::str::contains("1,,stripe,cus_stripe_1,pro,true,"));
}

#[test]
fn test_failed_operations_are_skipped() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "type, owner, processor, name, plan, token").unwrap();
    // No processor yet
    writeln!(file, "customer, 1").unwrap();
    writeln!(file, "processor, 1, pants").unwrap();
    // Unknown processor
    writeln!(file, "customer, 1").unwrap();
    writeln!(file, "processor, 1, stripe").unwrap();
    // No customer yet
    writeln!(file, "update_card, 1, , , , tok_visa").unwrap();
    writeln!(file, "customer, 1").unwrap();
    // Rejected by the processor
    writeln!(file, "update_card, 1, , , , bogus").unwrap();

    let mut cmd = Command::new(cargo_bin!("billable"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("processor not set"))
        .stderr(predicate::str::contains("Unknown operation `pants_customer`"))
        .stderr(predicate::str::contains("no stripe customer is attached"))
        .stderr(predicate::str::contains("invalid card token `bogus`"))
        .stdout(predicate::str::contains("1,,stripe,cus_stripe_1,,false,false,false,"));
}

#[test]
fn test_out_of_range_trial_days_are_skipped() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "type, owner, processor, name, plan, token, trial_days").unwrap();
    writeln!(file, "trial, 1, , , , , 4000000000").unwrap();
    writeln!(file, "processor, 2, stripe").unwrap();
    writeln!(file, "subscribe, 2, , default, pro, , 4000000000").unwrap();
    writeln!(file, "subscribe, 2, , default, pro").unwrap();

    let mut cmd = Command::new(cargo_bin!("billable"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("trial_days 4000000000 is out of range"))
        .stderr(predicate::str::contains(
            "trial_period_days 4000000000 is out of range",
        ))
        .stdout(predicate::str::contains("2,,stripe,cus_stripe_2,pro,true,false,false,"));
}

#[test]
fn test_invoice_overflow_is_skipped() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "type, owner, processor, name, plan").unwrap();
    writeln!(file, "processor, 1, stripe").unwrap();
    writeln!(file, "subscribe, 1, , default, pro").unwrap();
    writeln!(file, "subscribe, 1, , addon, pro").unwrap();
    writeln!(file, "pay_invoice, 1").unwrap();
    writeln!(file, "register, 2").unwrap();

    let mut cmd = Command::new(cargo_bin!("billable"));
    cmd.arg(file.path())
        .arg("--price")
        .arg("pro=79228162514264337593543950335");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("invoice amount out of range"))
        .stdout(predicate::str::contains("1,,stripe,cus_stripe_1,pro,true,false,false,"))
        .stdout(predicate::str::contains("2,,,,,false,false,false,"));
}
