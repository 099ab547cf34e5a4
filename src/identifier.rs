//! Naming for the data-model entities that need it: ellipsoids, datums,
//! and CRS variants all carry an optional [`Identifier`] for provenance,
//! without it taking part in equality — two ellipsoids built from the
//! same `(a, 1/f)` are the same ellipsoid regardless of what registry
//! code they arrived from.

/// `(authority, code, short-name, aliases)`. Purely informational: never
/// consulted by equality or by the planner's structural matching.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Identifier {
    pub authority: String,
    pub code: String,
    pub name: String,
    pub aliases: Vec<String>,
}

impl Identifier {
    #[must_use]
    pub fn new(authority: &str, code: &str, name: &str) -> Identifier {
        Identifier {
            authority: authority.to_string(),
            code: code.to_string(),
            name: name.to_string(),
            aliases: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_alias(mut self, alias: &str) -> Identifier {
        self.aliases.push(alias.to_string());
        self
    }

    #[must_use]
    pub fn urn(&self) -> String {
        format!("{}:{}", self.authority, self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urn_formats_as_authority_colon_code() {
        let id = Identifier::new("EPSG", "2154", "RGF93 / Lambert-93");
        assert_eq!(id.urn(), "EPSG:2154");
    }
}
