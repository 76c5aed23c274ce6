use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, run};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let out = run(test.command().arg("init"))?;

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("Created .i18nrc.json"));

    let content = test.read_file(".i18nrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["functionName"], "__");
    assert_eq!(parsed["pluralFunctionName"], "__n");
    assert_eq!(parsed["failOnMissing"], false);
    assert_eq!(parsed["outDir"], "./dist");
    assert!(content.contains("  "), "Config should use 2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".i18nrc.json", "{}")?;

    let out = run(test.command().arg("init"))?;

    assert_eq!(out.code, Some(1));
    assert!(out.stderr.contains(".i18nrc.json already exists"));
    assert_eq!(test.read_file(".i18nrc.json")?, "{}");

    Ok(())
}
