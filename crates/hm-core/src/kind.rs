//! Kind enums shared between the world model and the command interface.

/// The static object kinds a user can place.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PlaceableKind {
    /// Hazard: agents that fall inside its consumption radius are removed.
    Hole,
    /// Dwelling with a fixed resident capacity.
    Hut,
    Farm,
    Factory,
    Tree,
}

impl PlaceableKind {
    pub const ALL: [PlaceableKind; 5] = [
        PlaceableKind::Hole,
        PlaceableKind::Hut,
        PlaceableKind::Farm,
        PlaceableKind::Factory,
        PlaceableKind::Tree,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PlaceableKind::Hole    => "hole",
            PlaceableKind::Hut     => "hut",
            PlaceableKind::Farm    => "farm",
            PlaceableKind::Factory => "factory",
            PlaceableKind::Tree    => "tree",
        }
    }
}

impl std::fmt::Display for PlaceableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time-boxed environmental effects.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EffectKind {
    /// Localized swirling force (a "hurricane").
    ForceField,
    /// Global speed reduction (rain).
    Slowdown,
}

impl EffectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EffectKind::ForceField => "force_field",
            EffectKind::Slowdown   => "slowdown",
        }
    }
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A toolbar tool as selected in the UI.  Applying a tool at a position is
/// the single "click in the world" command.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ToolKind {
    Place(PlaceableKind),
    /// Spawn a force field centred on the click.
    ForceField,
    /// Toggle the global slowdown (position ignored).
    Slowdown,
    AddAgent,
}

impl ToolKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ToolKind::Place(kind) => kind.as_str(),
            ToolKind::ForceField  => "force_field",
            ToolKind::Slowdown    => "slowdown",
            ToolKind::AddAgent    => "add_agent",
        }
    }
}

impl From<PlaceableKind> for ToolKind {
    fn from(kind: PlaceableKind) -> Self {
        ToolKind::Place(kind)
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
