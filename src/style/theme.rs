use crate::foundation::core::Rgb8;

/// Color theme queried by value whenever surfaces are rebuilt.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Theme {
    pub name: String,
    pub path_color: Rgb8,
    pub background: Rgb8,
    /// Fill color of the actor footprint.
    pub actor_color: Rgb8,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            path_color: Rgb8::new(0xf4, 0x43, 0x36),
            background: Rgb8::new(0xf5, 0xf5, 0xf5),
            actor_color: Rgb8::new(0x3f, 0x51, 0xb5),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            path_color: Rgb8::new(0xef, 0x9a, 0x9a),
            background: Rgb8::new(0x21, 0x21, 0x21),
            actor_color: Rgb8::new(0x9f, 0xa8, 0xda),
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::light()),
            "dark" => Some(Self::dark()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/theme.rs"]
mod tests;
