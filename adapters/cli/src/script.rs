//! Parsing of scripted plantings supplied on the command line.

use glam::Vec2;

/// Planting requested before the first tick.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Planting {
    /// Kind name forwarded verbatim to the simulation.
    pub(crate) kind: String,
    /// Pointer position in layout pixels.
    pub(crate) cursor: Vec2,
}

/// Parses `kind@x,y`, e.g. `garlic@650,300`.
pub(crate) fn parse_planting(value: &str) -> Result<Planting, String> {
    let (kind, position) = value
        .split_once('@')
        .ok_or_else(|| format!("expected `kind@x,y`, got `{value}`"))?;
    let (x, y) = position
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y` after `@`, got `{position}`"))?;

    let kind = kind.trim();
    if kind.is_empty() {
        return Err(format!("missing kind in `{value}`"));
    }
    let x = parse_coordinate(x)?;
    let y = parse_coordinate(y)?;

    Ok(Planting {
        kind: kind.to_owned(),
        cursor: Vec2::new(x, y),
    })
}

fn parse_coordinate(value: &str) -> Result<f32, String> {
    value
        .trim()
        .parse::<f32>()
        .map_err(|error| format!("invalid coordinate `{}`: {error}", value.trim()))
}
