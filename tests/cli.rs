mod cli {
    #![allow(non_snake_case)]

    use assert_cmd::prelude::*;
    use predicates::str::{contains, starts_with};

    use std::fs;
    use std::path::Path;
    use std::process::Command;
    use tempfile::TempDir;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    const NAME: &str = "salesboard";

    fn salesboard(data_dir: &Path) -> Result<Command, Box<dyn std::error::Error>> {
        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .arg("--no-config")
            .arg("--data-dir")
            .arg(data_dir);
        Ok(cmd)
    }

    fn generate(data_dir: &Path, seed: u64) -> TestResult {
        salesboard(data_dir)?
            .args([
                "generate",
                "--transactions",
                "300",
                "--customers",
                "50",
                "--seed",
                &seed.to_string(),
                "--end-date",
                "2024-12-31",
                "--quiet",
            ])
            .assert()
            .success();
        Ok(())
    }

    #[test]
    fn test_output__when_no_subcommand() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.assert().failure().code(1).stderr(contains("Usage:"));
        Ok(())
    }

    #[test]
    fn test_output__help_exits_successfully() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.arg("--help");

        cmd.assert()
            .success()
            .stdout(contains("generate"))
            .stdout(contains("serve"));
        Ok(())
    }

    #[test]
    fn test_generate__writes_files_and_preview() -> TestResult {
        let dir = TempDir::new()?;
        let mut cmd = salesboard(dir.path())?;
        cmd.args([
            "generate",
            "--transactions",
            "120",
            "--customers",
            "30",
            "--end-date",
            "2024-12-31",
        ]);

        cmd.assert()
            .success()
            .stdout(contains("Transactions: (120, 11)"))
            .stdout(contains("Customers: ("));

        let transactions = fs::read_to_string(dir.path().join("transactions.csv"))?;
        assert!(transactions.starts_with("transaction_id,date,customer_id,category"));
        assert_eq!(transactions.lines().count(), 121);
        assert!(dir.path().join("customers.csv").is_file());
        Ok(())
    }

    #[test]
    fn test_generate__same_seed_same_files() -> TestResult {
        let first = TempDir::new()?;
        let second = TempDir::new()?;
        generate(first.path(), 11)?;
        generate(second.path(), 11)?;

        for file in ["transactions.csv", "customers.csv"] {
            assert_eq!(
                fs::read_to_string(first.path().join(file))?,
                fs::read_to_string(second.path().join(file))?
            );
        }
        Ok(())
    }

    #[test]
    fn test_generate__rejects_zero_customers() -> TestResult {
        let dir = TempDir::new()?;
        let mut cmd = salesboard(dir.path())?;
        cmd.args(["generate", "--customers", "0"]);

        cmd.assert()
            .failure()
            .code(1)
            .stderr(starts_with("Error:"));
        assert!(!dir.path().join("transactions.csv").exists());
        Ok(())
    }

    #[test]
    fn test_analyze__when_data_missing() -> TestResult {
        let dir = TempDir::new()?;
        let mut cmd = salesboard(&dir.path().join("empty"))?;
        cmd.arg("analyze");

        cmd.assert()
            .failure()
            .code(1)
            .stderr(starts_with("Error:"))
            .stderr(contains("salesboard generate"));
        Ok(())
    }

    #[test]
    fn test_analyze__text_output() -> TestResult {
        let dir = TempDir::new()?;
        generate(dir.path(), 42)?;

        let mut cmd = salesboard(dir.path())?;
        cmd.args(["analyze", "--top", "4"]);

        cmd.assert()
            .success()
            .stdout(contains("Key Metrics"))
            .stdout(contains("Sales by Category"))
            .stdout(contains("Top 4 Products"))
            .stdout(contains("Customer Segments"));
        Ok(())
    }

    #[test]
    fn test_analyze__json_output_with_filters() -> TestResult {
        let dir = TempDir::new()?;
        generate(dir.path(), 42)?;

        let output = salesboard(dir.path())?
            .args([
                "analyze",
                "--format",
                "json",
                "--category",
                "electronics",
                "--from",
                "2024-06-01",
                "--to",
                "2024-12-31",
            ])
            .output()?;
        assert!(output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
        assert_eq!(json["total_rows"], 300);
        assert_eq!(json["filter"]["category"], "Electronics");
        assert!(json["filtered_rows"].as_u64().unwrap_or(u64::MAX) <= 300);
        for category in json["categories"].as_array().into_iter().flatten() {
            assert_eq!(category["category"], "Electronics");
        }
        Ok(())
    }

    #[test]
    fn test_analyze__minimal_output() -> TestResult {
        let dir = TempDir::new()?;
        generate(dir.path(), 42)?;

        let mut cmd = salesboard(dir.path())?;
        cmd.args(["analyze", "--format", "minimal"]);

        cmd.assert()
            .success()
            .stdout(starts_with("total_revenue "))
            .stdout(contains("conversion_rate "));
        Ok(())
    }

    #[test]
    fn test_analyze__unknown_category() -> TestResult {
        let dir = TempDir::new()?;
        generate(dir.path(), 42)?;

        let mut cmd = salesboard(dir.path())?;
        cmd.args(["analyze", "--category", "Garden Gnomes"]);

        cmd.assert()
            .failure()
            .code(1)
            .stderr(contains("Unknown category 'Garden Gnomes'"));
        Ok(())
    }

    #[test]
    fn test_analyze__reversed_dates() -> TestResult {
        let dir = TempDir::new()?;
        generate(dir.path(), 42)?;

        let mut cmd = salesboard(dir.path())?;
        cmd.args(["analyze", "--from", "2024-12-01", "--to", "2024-01-01"]);

        cmd.assert()
            .failure()
            .code(1)
            .stderr(contains("is after end date"));
        Ok(())
    }

    #[test]
    fn test_analyze__malformed_date_exits_with_one() -> TestResult {
        let dir = TempDir::new()?;
        let mut cmd = salesboard(dir.path())?;
        cmd.args(["analyze", "--from", "01/12/2024"]);

        cmd.assert().failure().code(1);
        Ok(())
    }

    #[test]
    fn test_dashboard__writes_html() -> TestResult {
        let dir = TempDir::new()?;
        generate(dir.path(), 42)?;
        let report = dir.path().join("out").join("report.html");

        let mut cmd = salesboard(dir.path())?;
        cmd.args(["dashboard", "--granularity", "week", "--region", "Bretagne", "-o"])
            .arg(&report);

        cmd.assert()
            .success()
            .stdout(contains("Dashboard written to"));

        let html = fs::read_to_string(&report)?;
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("chart.js"));
        assert!(html.contains("Bretagne"));
        Ok(())
    }

    #[test]
    fn test_dashboard__invalid_granularity() -> TestResult {
        let dir = TempDir::new()?;
        generate(dir.path(), 42)?;

        let mut cmd = salesboard(dir.path())?;
        cmd.args(["dashboard", "--granularity", "hourly"]);

        cmd.assert()
            .failure()
            .code(1)
            .stderr(contains("Invalid granularity 'hourly'"));
        Ok(())
    }

    #[test]
    fn test_config_file__overrides_defaults() -> TestResult {
        let dir = TempDir::new()?;
        generate(dir.path(), 42)?;
        let config = dir.path().join("salesboard.toml");
        fs::write(&config, "output_format = \"minimal\"\n")?;

        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.env("NO_COLOR", "1")
            .arg("--config")
            .arg(&config)
            .arg("--data-dir")
            .arg(dir.path())
            .arg("analyze");

        cmd.assert()
            .success()
            .stdout(starts_with("total_revenue "));
        Ok(())
    }

    #[test]
    fn test_serve__invalid_bind_address() -> TestResult {
        let dir = TempDir::new()?;
        generate(dir.path(), 42)?;

        let mut cmd = salesboard(dir.path())?;
        cmd.args(["serve", "--bind", "localhost"]);

        cmd.assert()
            .failure()
            .code(1)
            .stderr(contains("Bind address 'localhost' is invalid"));
        Ok(())
    }
}
