use std::env;

/// Where the plan/result envelope goes and how it is laid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputConfig {
    /// One JSON envelope per command instead of a text header.
    pub json: bool,
    pub pretty: bool,
}

impl OutputConfig {
    /// `--json` wins; otherwise `ARCHIVE_OUTPUT_FORMAT=json` selects JSON.
    pub fn resolve(json_flag: bool) -> Self {
        Self::from_vars(
            json_flag,
            env::var("ARCHIVE_OUTPUT_FORMAT").ok().as_deref(),
            env::var("ARCHIVE_OUTPUT_PRETTY").ok().as_deref(),
        )
    }

    fn from_vars(json_flag: bool, format: Option<&str>, pretty: Option<&str>) -> Self {
        let json = json_flag || format.is_some_and(|f| f.eq_ignore_ascii_case("json"));
        let pretty = pretty.is_some_and(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"));
        OutputConfig { json, pretty }
    }
}
