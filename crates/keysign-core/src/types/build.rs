//! Build types and pass-through build flags

use serde::{Deserialize, Serialize};

/// Which kind of artifact is being produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildType {
    Debug,
    Release,
}

impl std::str::FromStr for BuildType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(BuildType::Debug),
            "release" => Ok(BuildType::Release),
            other => Err(format!("unknown build type: {}", other)),
        }
    }
}

/// Static build flags handed to the packaging step unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BuildFlags {
    /// Enable code minification
    #[serde(default)]
    pub minify_enabled: bool,
    /// Enable resource shrinking
    #[serde(default)]
    pub shrink_resources: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_type_parse() {
        assert_eq!("release".parse::<BuildType>(), Ok(BuildType::Release));
        assert_eq!("Debug".parse::<BuildType>(), Ok(BuildType::Debug));
        assert!("staging".parse::<BuildType>().is_err());
    }

    #[test]
    fn test_build_flags_default_off() {
        let flags = BuildFlags::default();
        assert!(!flags.minify_enabled);
        assert!(!flags.shrink_resources);
    }
}
