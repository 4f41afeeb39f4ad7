//! Keys command handler

use std::io::Write;
use std::path::Path;

use super::{load_schema, write_json};
use crate::config::Settings;
use crate::engine::{KeyReport, explain};
use crate::error::AppResult;
use crate::naming::KeyPrefix;

/// Handler for the keys command
#[derive(Debug)]
pub struct KeysCommandHandler {
    prefix: KeyPrefix,
}

impl KeysCommandHandler {
    pub fn new(settings: &Settings) -> Self {
        Self {
            prefix: KeyPrefix::new(settings.resolver.prefix.clone()),
        }
    }

    /// List the variables read by the schema at `schema_path`
    pub fn execute(&self, schema_path: &Path, json: bool, out: &mut dyn Write) -> AppResult<()> {
        let schema = load_schema(schema_path)?;
        let reports = explain(&schema, &self.prefix)?;

        if json {
            return write_json(out, &reports, true);
        }

        for report in &reports {
            writeln!(out, "{}", Self::format_line(report))?;
        }
        Ok(())
    }

    /// `path<TAB>chain<TAB>conversion<TAB>default`, `required` when no
    /// default is declared
    fn format_line(report: &KeyReport) -> String {
        let default = match &report.default {
            Some(value) => format!("default={value}"),
            None => "required".to_string(),
        };
        format!(
            "{}\t{}\t{}\t{}",
            report.path,
            report.chain.join(","),
            report.conversion,
            default
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::schema_file;
    use super::*;

    const SCHEMA: &str = r#"{
        "amqp": {
            "login": {"$default": "guest", "$aliases": ["RABBIT_LOGIN"]},
            "password": {"$type": "String"}
        },
        "api": [{"a": 1}]
    }"#;

    fn run(prefix: &str, json: bool) -> String {
        let file = schema_file(SCHEMA);
        let mut settings = Settings::default();
        settings.resolver.prefix = prefix.to_string();

        let mut out = Vec::new();
        KeysCommandHandler::new(&settings)
            .execute(file.path(), json, &mut out)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_text_listing() {
        let output = run("", false);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            [
                "amqp.login\tRABBIT_LOGIN,AMQP_LOGIN\t~Identity\tdefault=\"guest\"",
                "amqp.password\tAMQP_PASSWORD\tString\trequired",
                "api[0].a\tAPI[0]_A\t~Integer\tdefault=1",
            ]
        );
    }

    #[test]
    fn test_json_listing_with_prefix() {
        let output = run("APP_", true);
        let reports: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(reports[1]["chain"], serde_json::json!(["APP_AMQP_PASSWORD"]));
        assert_eq!(reports[1]["required"], true);
        assert!(reports[1].get("default").is_none());
    }
}
