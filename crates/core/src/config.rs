//! Generator configuration parsed from the protoc plugin parameter.
//!
//! The parameter is the string passed through `--xstate_opt`, a
//! comma-separated list of `key=value` pairs or bare keys (a bare key means
//! `true`), e.g. `import_suffix=_pb,dedupe_imports`.

use tracing::warn;

use crate::error::{Error, Result};

/// Default output extension.
pub const DEFAULT_EXTENSION: &str = "ts";

/// Options controlling one generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Appended to the file base name in the local import specifier.
    pub import_suffix: String,
    /// Extension of generated artifacts: `<base>.xstate.<extension>`.
    pub extension: String,
    /// Drop repeated names from the local import list.
    pub dedupe_imports: bool,
    /// Skip files that declare services but no messages of their own.
    pub skip_messageless: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            import_suffix: String::new(),
            extension: DEFAULT_EXTENSION.to_string(),
            dedupe_imports: false,
            skip_messageless: true,
        }
    }
}

impl GeneratorConfig {
    /// Parse the plugin parameter string. `None` or empty yields the defaults.
    pub fn from_parameter(param: Option<&str>) -> Result<Self> {
        let mut config = Self::default();
        let Some(param) = param else {
            return Ok(config);
        };

        for part in param.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = match part.split_once('=') {
                Some((key, value)) => (key.trim(), Some(value.trim())),
                None => (part, None),
            };

            match key {
                "import_suffix" => config.import_suffix = value.unwrap_or_default().to_string(),
                "ext" => config.extension = parse_extension(value.unwrap_or_default())?,
                "dedupe_imports" => config.dedupe_imports = parse_flag(key, value)?,
                "skip_messageless" => config.skip_messageless = parse_flag(key, value)?,
                _ => warn!(parameter = %part, "Ignoring unknown plugin parameter."),
            }
        }

        Ok(config)
    }
}

fn parse_flag(key: &str, value: Option<&str>) -> Result<bool> {
    match value {
        None | Some("true") => Ok(true),
        Some("false") => Ok(false),
        Some(other) => Err(Error::InvalidParameter {
            key: key.to_string(),
            value: other.to_string(),
            reason: "expected `true` or `false`",
        }),
    }
}

fn parse_extension(value: &str) -> Result<String> {
    let value = value.strip_prefix('.').unwrap_or(value);
    if value.is_empty() || value.contains(['.', '/', '\\']) {
        return Err(Error::InvalidParameter {
            key: "ext".to_string(),
            value: value.to_string(),
            reason: "expected a single extension token such as `ts`",
        });
    }
    Ok(value.to_string())
}
