use std::{fs, path::Path};

use crate::{core::tariff::RawTariffInput, prelude::*};

/// Tariff file syntax.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Format {
    Json,
    Toml,
}

impl Format {
    /// Guess by the extension, JSON being the default.
    #[must_use]
    pub fn of(path: &Path) -> Self {
        match path.extension().and_then(|extension| extension.to_str()) {
            Some(extension) if extension.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

#[instrument(skip_all, fields(path = %path.display()), name = "Loading tariff…")]
pub fn load(path: &Path) -> Result<RawTariffInput> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read `{}`", path.display()))?;
    let format = Format::of(path);
    debug!(?format);
    parse(&text, format).with_context(|| format!("failed to parse `{}`", path.display()))
}

pub fn parse(text: &str, format: Format) -> Result<RawTariffInput> {
    match format {
        Format::Json => Ok(serde_json::from_str(text)?),
        Format::Toml => Ok(toml::from_str(text)?),
    }
}
