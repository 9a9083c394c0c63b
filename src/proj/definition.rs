//! PROJ.4 definition strings (`+proj=robin +lon_0=0 +ellps=WGS84 ...`).

use indexmap::IndexMap;

use crate::error::ProjError;
use crate::proj::ellipsoid::Ellipsoid;

/// Keys that carry ellipsoid or datum information.
const SHAPE_KEYS: &[&str] = &["ellps", "datum", "a", "b", "R", "rf", "f", "es", "e", "towgs84", "nadgrids"];

/// A parsed PROJ definition.
///
/// Parameters keep their order of appearance so the string can be rebuilt
/// for the fallback backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjString {
    definition: String,
    params: IndexMap<String, Option<String>>,
}

impl ProjString {
    /// Parse a definition.
    ///
    /// Tokens are whitespace separated, each `+key=value` or `+flag`; the
    /// leading `+` is optional. `+proj` is required.
    ///
    /// # Errors
    ///
    /// Returns [`ProjError::InvalidDefinition`] for an empty string, an empty
    /// key, or a missing `+proj`.
    pub fn parse(definition: &str) -> Result<Self, ProjError> {
        let invalid = |reason: &str| ProjError::InvalidDefinition {
            definition: definition.to_string(),
            reason: reason.to_string(),
        };

        let mut params = IndexMap::new();
        for token in definition.split_whitespace() {
            let token = token.strip_prefix('+').unwrap_or(token);
            let (key, value) = match token.split_once('=') {
                Some((k, v)) => (k, Some(v.to_string())),
                None => (token, None),
            };
            if key.is_empty() {
                return Err(invalid("empty parameter name"));
            }
            params.insert(key.to_string(), value);
        }

        if params.is_empty() {
            return Err(invalid("empty definition"));
        }
        match params.get("proj") {
            Some(Some(p)) if !p.is_empty() => {}
            _ => return Err(invalid("missing +proj")),
        }

        Ok(Self { definition: definition.trim().to_string(), params })
    }

    /// The projection family (`robin`, `merc`, ...).
    #[must_use]
    pub fn projection(&self) -> &str {
        self.get("proj").unwrap_or_default()
    }

    /// The original definition text.
    #[must_use]
    pub fn definition(&self) -> &str {
        &self.definition
    }

    /// Raw value of a parameter.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(|v| v.as_deref())
    }

    /// Whether a parameter or flag is present.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Numeric value of a parameter.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is present but not a number.
    pub fn get_f64(&self, key: &str) -> Result<Option<f64>, ProjError> {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => raw.parse::<f64>().map(Some).map_err(|_| ProjError::InvalidDefinition {
                definition: self.definition.clone(),
                reason: format!("+{key}={raw} is not a number"),
            }),
        }
    }

    /// Whether any ellipsoid/datum parameter is present.
    #[must_use]
    pub fn has_shape(&self) -> bool {
        SHAPE_KEYS.iter().any(|k| self.has(k))
    }

    /// Only the ellipsoid/datum parameters, as a PROJ fragment.
    #[must_use]
    pub fn shape_fragment(&self) -> String {
        self.params
            .iter()
            .filter(|(k, _)| SHAPE_KEYS.contains(&k.as_str()))
            .map(|(k, v)| match v {
                Some(v) => format!("+{k}={v}"),
                None => format!("+{k}"),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Resolve the ellipsoid, falling back to `ellps_default` when the
    /// definition does not name one.
    ///
    /// Precedence: `+R`, then `+a` with `+b`/`+rf`/`+f`/`+es`, then `+ellps`,
    /// then `+datum`, then the default.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown names, malformed numbers, or when no
    /// ellipsoid can be determined at all.
    pub fn ellipsoid(&self, ellps_default: Option<&str>) -> Result<Ellipsoid, ProjError> {
        if let Some(r) = self.get_f64("R")? {
            return Ok(Ellipsoid::sphere(r));
        }

        let named = match self.get("ellps") {
            Some(name) => Some(Ellipsoid::from_name(name)?),
            None => self.get("datum").and_then(Ellipsoid::from_datum),
        };

        if let Some(a) = self.get_f64("a")? {
            let base = named.unwrap_or(Ellipsoid::sphere(a));
            let shaped = if let Some(b) = self.get_f64("b")? {
                Ellipsoid::new(a, 1.0 - b / a)
            } else if let Some(rf) = self.get_f64("rf")? {
                Ellipsoid::from_rf(a, rf)
            } else if let Some(f) = self.get_f64("f")? {
                Ellipsoid::new(a, f)
            } else if let Some(es) = self.get_f64("es")? {
                Ellipsoid::new(a, 1.0 - (1.0 - es).sqrt())
            } else {
                Ellipsoid::new(a, base.f)
            };
            return Ok(shaped);
        }

        if let Some(e) = named {
            return Ok(e);
        }

        match ellps_default {
            Some(name) => Ellipsoid::from_name(name),
            None => Err(ProjError::MissingEllipsoid(self.definition.clone())),
        }
    }

    /// Linear unit factor (`+to_meter` or `+units`), metres per unit.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown unit names.
    pub fn to_meter(&self) -> Result<f64, ProjError> {
        if let Some(f) = self.get_f64("to_meter")? {
            return Ok(f);
        }
        match self.get("units") {
            None | Some("m") => Ok(1.0),
            Some("km") => Ok(1000.0),
            Some("dm") => Ok(0.1),
            Some("cm") => Ok(0.01),
            Some("mm") => Ok(0.001),
            Some("ft") => Ok(0.3048),
            Some("us-ft") => Ok(1200.0 / 3937.0),
            Some("mi") => Ok(1609.344),
            Some("kmi") => Ok(1852.0),
            Some(other) => Err(ProjError::UnknownUnits(other.to_string())),
        }
    }

    /// Whether this is a geographic (longlat) definition.
    #[must_use]
    pub fn is_geographic(&self) -> bool {
        matches!(self.projection(), "longlat" | "latlong" | "lonlat" | "latlon")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proj::ellipsoid::{SPHERE, WGS84};
    use approx::assert_relative_eq;

    const ROBIN: &str =
        "+proj=robin +lon_0=0 +x_0=0 +y_0=0 +ellps=WGS84 +datum=WGS84 +units=m +no_defs";

    #[test]
    fn test_parse_robinson() {
        let p = ProjString::parse(ROBIN).unwrap();
        assert_eq!(p.projection(), "robin");
        assert_eq!(p.get("ellps"), Some("WGS84"));
        assert!(p.has("no_defs"));
        assert_eq!(p.get("no_defs"), None);
        assert_eq!(p.get_f64("lon_0").unwrap(), Some(0.0));
        assert_relative_eq!(p.to_meter().unwrap(), 1.0);
    }

    #[test]
    fn test_missing_proj_rejected() {
        assert!(matches!(
            ProjString::parse("+ellps=WGS84"),
            Err(ProjError::InvalidDefinition { .. })
        ));
        assert!(ProjString::parse("   ").is_err());
        assert!(ProjString::parse("+proj=").is_err());
        assert!(ProjString::parse("+=3 +proj=merc").is_err());
    }

    #[test]
    fn test_bad_number() {
        let p = ProjString::parse("+proj=merc +lon_0=east").unwrap();
        assert!(p.get_f64("lon_0").is_err());
    }

    #[test]
    fn test_ellipsoid_precedence() {
        let p = ProjString::parse("+proj=moll +R=1000").unwrap();
        assert_relative_eq!(p.ellipsoid(None).unwrap().a, 1000.0);

        let p = ProjString::parse("+proj=moll +datum=WGS84").unwrap();
        assert_eq!(p.ellipsoid(None).unwrap(), WGS84);

        let p = ProjString::parse("+proj=moll").unwrap();
        assert_eq!(p.ellipsoid(Some("sphere")).unwrap(), SPHERE);
        assert!(matches!(p.ellipsoid(None), Err(ProjError::MissingEllipsoid(_))));

        let p = ProjString::parse("+proj=merc +a=6378137 +b=6378137").unwrap();
        assert!(p.ellipsoid(None).unwrap().is_sphere());
    }

    #[test]
    fn test_units() {
        let p = ProjString::parse("+proj=eqc +units=km").unwrap();
        assert_relative_eq!(p.to_meter().unwrap(), 1000.0);
        let p = ProjString::parse("+proj=eqc +units=furlong").unwrap();
        assert!(matches!(p.to_meter(), Err(ProjError::UnknownUnits(_))));
    }

    #[test]
    fn test_shape_fragment() {
        let p = ProjString::parse(ROBIN).unwrap();
        assert_eq!(p.shape_fragment(), "+ellps=WGS84 +datum=WGS84");
        assert!(p.has_shape());
        assert!(!ProjString::parse("+proj=robin").unwrap().has_shape());
    }
}
