//! Colour palette: semantic roles mapped to hex colours or gradients.
//!
//! Renderers ask for a colour by *role* ("ship primary", "bullet core") rather
//! than by literal value, so restyling the game is a data change.  Every role
//! in [`ColorRole::ALL`] always has an entry: the palette is built by walking
//! that list, so a complete palette is guaranteed by construction and typed
//! access through [`Palette::get`] cannot fail.
//!
//! String lookups (used by data-driven consumers and the TOML override layer)
//! go through [`ColorRole::from_key`] and report unknown names as
//! [`LookupError::UnknownColorRole`] instead of falling back to white.

use std::collections::BTreeMap;

use bevy::color::{Color, Srgba};
use serde::Deserialize;

use crate::error::{ConsistencyError, LookupError, RegistryResult};

/// A validated `#rgb` / `#rrggbb` colour.
///
/// Keeps the original string for consumers that draw with CSS-style colours
/// and the parsed [`Srgba`] for everything else.
#[derive(Debug, Clone, PartialEq)]
pub struct HexColor {
    hex: String,
    srgba: Srgba,
}

impl HexColor {
    /// Parse and validate a hex colour.  `context` names the owner for error messages.
    pub fn parse(value: &str, context: &str) -> RegistryResult<Self> {
        let invalid = || ConsistencyError::InvalidColor {
            context: context.to_string(),
            value: value.to_string(),
        };

        let digits = value.strip_prefix('#').ok_or_else(invalid)?;
        if !matches!(digits.len(), 3 | 6) || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid().into());
        }
        let srgba = Srgba::hex(digits).map_err(|_| invalid())?;

        Ok(Self {
            hex: value.to_ascii_lowercase(),
            srgba,
        })
    }

    /// Lower-cased hex string including the leading `#`.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.hex
    }

    #[inline]
    pub fn srgba(&self) -> Srgba {
        self.srgba
    }

    #[inline]
    pub fn color(&self) -> Color {
        Color::Srgba(self.srgba)
    }
}

/// A palette entry: one colour, or an ordered list of stops for multi-stage
/// effects such as explosions.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorValue {
    Solid(HexColor),
    Gradient(Gradient),
}

/// Ordered colour stops; first stop = start of the effect.
///
/// Only built by palette validation, which guarantees at least two stops.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    stops: Vec<HexColor>,
}

impl Gradient {
    #[inline]
    pub fn stops(&self) -> &[HexColor] {
        &self.stops
    }
}

impl ColorValue {
    /// First colour of the entry (the only one for `Solid`).
    pub fn primary(&self) -> &HexColor {
        match self {
            ColorValue::Solid(c) => c,
            ColorValue::Gradient(g) => &g.stops[0],
        }
    }

    /// All stops in order; a `Solid` yields a single stop.
    pub fn stops(&self) -> &[HexColor] {
        match self {
            ColorValue::Solid(c) => std::slice::from_ref(c),
            ColorValue::Gradient(g) => g.stops(),
        }
    }

    /// Stop for an effect that is `t` of the way through (clamped to [0, 1]).
    ///
    /// Picks the nearest stop; no blending between stops.
    pub fn stop_at(&self, t: f32) -> &HexColor {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let idx = (t * (stops.len() - 1) as f32).round() as usize;
        &stops[idx.min(stops.len() - 1)]
    }
}

/// Unvalidated colour as written in `assets/tuning.toml`:
/// `ship_primary = "#0ff"` or `explosion = ["#fff", "#f80", "#f00"]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawColor {
    Solid(String),
    Gradient(Vec<String>),
}

impl RawColor {
    fn validate(&self, role: ColorRole) -> RegistryResult<ColorValue> {
        let context = format!("palette.{}", role.key());
        match self {
            RawColor::Solid(hex) => Ok(ColorValue::Solid(HexColor::parse(hex, &context)?)),
            RawColor::Gradient(stops) => {
                if stops.len() < 2 {
                    return Err(ConsistencyError::EmptyList { name: context, min: 2 }.into());
                }
                let stops = stops
                    .iter()
                    .map(|hex| HexColor::parse(hex, &context))
                    .collect::<RegistryResult<Vec<_>>>()?;
                Ok(ColorValue::Gradient(Gradient { stops }))
            }
        }
    }
}

/// Every colour role a consumer may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColorRole {
    Background,
    Star,
    ShipPrimary,
    ShipSecondary,
    ShipThrust,
    ShieldRing,
    BulletCore,
    BulletGlow,
    AsteroidStroke,
    AsteroidFill,
    Explosion,
    Particle,
    BossPrimary,
    BossBullet,
    HudText,
    HudAccent,
    ComboText,
    GameOverText,
}

impl ColorRole {
    pub const ALL: [ColorRole; 18] = [
        ColorRole::Background,
        ColorRole::Star,
        ColorRole::ShipPrimary,
        ColorRole::ShipSecondary,
        ColorRole::ShipThrust,
        ColorRole::ShieldRing,
        ColorRole::BulletCore,
        ColorRole::BulletGlow,
        ColorRole::AsteroidStroke,
        ColorRole::AsteroidFill,
        ColorRole::Explosion,
        ColorRole::Particle,
        ColorRole::BossPrimary,
        ColorRole::BossBullet,
        ColorRole::HudText,
        ColorRole::HudAccent,
        ColorRole::ComboText,
        ColorRole::GameOverText,
    ];

    #[inline]
    pub fn key(self) -> &'static str {
        match self {
            ColorRole::Background => "background",
            ColorRole::Star => "star",
            ColorRole::ShipPrimary => "ship_primary",
            ColorRole::ShipSecondary => "ship_secondary",
            ColorRole::ShipThrust => "ship_thrust",
            ColorRole::ShieldRing => "shield_ring",
            ColorRole::BulletCore => "bullet_core",
            ColorRole::BulletGlow => "bullet_glow",
            ColorRole::AsteroidStroke => "asteroid_stroke",
            ColorRole::AsteroidFill => "asteroid_fill",
            ColorRole::Explosion => "explosion",
            ColorRole::Particle => "particle",
            ColorRole::BossPrimary => "boss_primary",
            ColorRole::BossBullet => "boss_bullet",
            ColorRole::HudText => "hud_text",
            ColorRole::HudAccent => "hud_accent",
            ColorRole::ComboText => "combo_text",
            ColorRole::GameOverText => "game_over_text",
        }
    }

    pub fn from_key(key: &str) -> RegistryResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|role| role.key() == key)
            .ok_or_else(|| {
                LookupError::UnknownColorRole {
                    role: key.to_string(),
                }
                .into()
            })
    }

    /// Compiled default for this role.
    fn default_raw(self) -> RawColor {
        let solid = |hex: &str| RawColor::Solid(hex.to_string());
        let gradient = |hexes: &[&str]| {
            RawColor::Gradient(hexes.iter().map(|h| h.to_string()).collect())
        };
        match self {
            ColorRole::Background => solid("#000000"),
            ColorRole::Star => solid("#ffffff"),
            ColorRole::ShipPrimary => solid("#00ffff"),
            ColorRole::ShipSecondary => solid("#0088ff"),
            ColorRole::ShipThrust => gradient(&["#ffffff", "#ffff00", "#ff6600"]),
            ColorRole::ShieldRing => solid("#00ffff"),
            ColorRole::BulletCore => solid("#ffffff"),
            ColorRole::BulletGlow => solid("#ffff66"),
            ColorRole::AsteroidStroke => solid("#cccccc"),
            ColorRole::AsteroidFill => solid("#1a1a1a"),
            ColorRole::Explosion => {
                gradient(&["#ffffff", "#ffff00", "#ff8800", "#ff2200", "#550000"])
            }
            ColorRole::Particle => solid("#ffaa00"),
            ColorRole::BossPrimary => solid("#ff0044"),
            ColorRole::BossBullet => solid("#ff6699"),
            ColorRole::HudText => solid("#ffffff"),
            ColorRole::HudAccent => solid("#00ff88"),
            ColorRole::ComboText => solid("#ffcc00"),
            ColorRole::GameOverText => solid("#ff3333"),
        }
    }
}

/// Complete, validated palette.  Indexed by [`ColorRole`] position.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    entries: Vec<ColorValue>,
}

impl Palette {
    /// Build the palette from compiled defaults plus any overrides keyed by role name.
    pub fn build(overrides: &BTreeMap<String, RawColor>) -> RegistryResult<Self> {
        for key in overrides.keys() {
            ColorRole::from_key(key)?;
        }

        let entries = ColorRole::ALL
            .iter()
            .map(|&role| match overrides.get(role.key()) {
                Some(raw) => raw.validate(role),
                None => role.default_raw().validate(role),
            })
            .collect::<RegistryResult<Vec<_>>>()?;

        Ok(Self { entries })
    }

    #[inline]
    pub fn get(&self, role: ColorRole) -> &ColorValue {
        &self.entries[role as usize]
    }

    /// String-keyed lookup; unknown roles are an error, never a default.
    pub fn lookup(&self, key: &str) -> RegistryResult<&ColorValue> {
        ColorRole::from_key(key).map(|role| self.get(role))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ColorRole, &ColorValue)> {
        ColorRole::ALL.iter().copied().zip(self.entries.iter())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistryError;

    fn defaults() -> Palette {
        Palette::build(&BTreeMap::new()).expect("compiled palette must validate")
    }

    #[test]
    fn role_index_matches_all_order() {
        for (i, role) in ColorRole::ALL.iter().enumerate() {
            assert_eq!(*role as usize, i, "{:?} out of position in ALL", role);
        }
    }

    #[test]
    fn role_keys_round_trip() {
        for role in ColorRole::ALL {
            assert_eq!(ColorRole::from_key(role.key()).unwrap(), role);
        }
    }

    #[test]
    fn default_palette_covers_every_role() {
        let palette = defaults();
        assert_eq!(palette.len(), ColorRole::ALL.len());
        assert_eq!(palette.get(ColorRole::ShipPrimary).primary().as_str(), "#00ffff");
    }

    #[test]
    fn explosion_is_a_multi_stop_gradient() {
        let palette = defaults();
        let explosion = palette.get(ColorRole::Explosion);
        assert!(matches!(explosion, ColorValue::Gradient(_)));
        assert_eq!(explosion.stops().len(), 5);
        assert_eq!(explosion.primary(), &explosion.stops()[0]);
        assert_eq!(explosion.stop_at(0.0).as_str(), "#ffffff");
        assert_eq!(explosion.stop_at(1.0).as_str(), "#550000");
        assert_eq!(explosion.stop_at(7.0).as_str(), "#550000");
    }

    #[test]
    fn unknown_role_is_lookup_error() {
        let palette = defaults();
        let err = palette.lookup("ship_primry").unwrap_err();
        assert_eq!(
            err,
            RegistryError::Lookup(LookupError::UnknownColorRole {
                role: "ship_primry".into()
            })
        );
    }

    #[test]
    fn short_hex_is_accepted_and_parsed() {
        let c = HexColor::parse("#0F0", "test").unwrap();
        assert_eq!(c.as_str(), "#0f0");
        assert_eq!(c.srgba(), Srgba::rgb(0.0, 1.0, 0.0));
    }

    #[test]
    fn hex_converts_to_bevy_color() {
        let c = HexColor::parse("#ff0000", "test").unwrap();
        assert_eq!(c.color(), Color::Srgba(Srgba::rgb(1.0, 0.0, 0.0)));
    }

    #[test]
    fn malformed_hex_is_rejected() {
        for bad in ["00ffff", "#00ff", "#gg0000", "#", "", "#00ffff00"] {
            let err = HexColor::parse(bad, "test").unwrap_err();
            assert!(err.is_consistency(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn override_replaces_single_role() {
        let mut overrides = BTreeMap::new();
        overrides.insert("bullet_core".to_string(), RawColor::Solid("#ff0000".into()));
        let palette = Palette::build(&overrides).unwrap();
        assert_eq!(palette.get(ColorRole::BulletCore).primary().as_str(), "#ff0000");
        assert_eq!(palette.get(ColorRole::BulletGlow), defaults().get(ColorRole::BulletGlow));
    }

    #[test]
    fn override_for_unknown_role_fails() {
        let mut overrides = BTreeMap::new();
        overrides.insert("laser".to_string(), RawColor::Solid("#ff0000".into()));
        assert!(Palette::build(&overrides).unwrap_err().is_lookup());
    }

    #[test]
    fn single_stop_gradient_is_rejected() {
        let mut overrides = BTreeMap::new();
        overrides.insert(
            "explosion".to_string(),
            RawColor::Gradient(vec!["#ffffff".into()]),
        );
        let err = Palette::build(&overrides).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Consistency(ConsistencyError::EmptyList { min: 2, .. })
        ));
    }
}
