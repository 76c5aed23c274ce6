use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

fn project() -> Result<CliTest> {
    let test = CliTest::new()?;
    test.write_file(
        ".i18nrc.json",
        r#"{
  "localization": "locales/fr.json",
  "pluralLocalization": { "apple": "pommes" },
  "sourceRoot": "src"
}"#,
    )?;
    test.write_file(
        "locales/fr.json",
        r#"{ "greeting": "Bonjour", "nav": { "home": "Accueil" } }"#,
    )?;
    test.write_file(
        "src/app.js",
        r#"const title = __("greeting");
const link = __("nav.home");
const count = __n("apple", 3);
"#,
    )?;
    Ok(test)
}

#[test]
fn test_build_inlines_translations() -> Result<()> {
    let test = project()?;

    let out = run(&mut test.build_command())?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert!(out.stdout.contains("no issues found"));
    assert!(out.stdout.contains("inlined 3 translations"));
    assert_eq!(
        test.read_file("dist/app.js")?,
        r#"const title = "Bonjour";
const link = "Accueil";
const count = "pommes";
"#
    );

    Ok(())
}

#[test]
fn test_missing_keys_are_warnings() -> Result<()> {
    let test = project()?;
    test.write_file(
        "src/pages/about.ts",
        r#"export const a: string = __("about.title");
export const b: string = __("about.title") + __("about.body");
"#,
    )?;

    let out = run(&mut test.build_command())?;

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("warning: missing localization"));
    assert!(out.stdout.contains("--> pages/about.ts"));
    assert_eq!(
        out.stdout
            .matches("Missing localization: about.title")
            .count(),
        1
    );
    assert!(out.stdout.contains("Missing localization: about.body  pages/about.ts:2:46"));
    assert!(out.stdout.contains("0 errors, 1 warning"));
    assert_eq!(
        test.read_file("dist/pages/about.ts")?,
        r#"export const a: string = "about.title";
export const b: string = "about.title" + "about.body";
"#
    );

    Ok(())
}

#[test]
fn test_fail_on_missing_exits_with_failure() -> Result<()> {
    let test = project()?;
    test.write_file("src/extra.js", r#"__("nope");"#)?;

    let out = run(test.build_command().arg("--fail-on-missing"))?;

    assert_eq!(out.code, Some(1));
    assert!(out.stdout.contains("error: missing localization"));
    assert!(out.stdout.contains("1 error, 0 warnings"));

    Ok(())
}

#[test]
fn test_invalid_call_fails_module() -> Result<()> {
    let test = project()?;
    test.write_file("src/bad.js", "__(someKey);\n")?;

    let out = run(&mut test.build_command())?;

    assert_eq!(out.code, Some(1));
    assert!(out.stdout.contains("error: invalid translate call"));
    assert!(out.stdout.contains("--> bad.js:1:1"));
    assert!(out.stdout.contains("the key must be a string literal"));
    assert!(!test.root().join("dist/bad.js").exists());
    assert!(test.root().join("dist/app.js").exists());

    Ok(())
}

#[test]
fn test_check_does_not_write() -> Result<()> {
    let test = project()?;

    let out = run(test.build_command().arg("--check"))?;

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("Checked 1 source file"));
    assert!(!test.root().join("dist").exists());

    Ok(())
}

#[test]
fn test_out_dir_override() -> Result<()> {
    let test = project()?;

    let out = run(test.build_command().args(["--out-dir", "build"]))?;

    assert_eq!(out.code, Some(0));
    assert!(test.root().join("build/app.js").exists());
    assert!(!test.root().join("dist").exists());

    Ok(())
}

#[test]
fn test_bad_config_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".i18nrc.json", r#"{ "functionName": "t", "pluralFunctionName": "t" }"#)?;

    let out = run(&mut test.build_command())?;

    assert_eq!(out.code, Some(2));
    assert!(out.stderr.contains("must differ"));

    Ok(())
}
