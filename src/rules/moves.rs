//! Move representation: tagged variants plus the request-side endpoints.
//!
//! A candidate move is one of four shapes: bar entry, a single-die move, a
//! compound move spending both dice of a non-doubles roll through an
//! intermediate point, or a bear-off. Keeping them as distinct variants
//! lets validation and dice consumption match exhaustively instead of
//! probing for optional fields.
//!
//! Endpoints cross the wire as a point number or the sentinel strings
//! `"bar"` / `"off"`, so [`Endpoint`] carries custom serde.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A candidate or validated move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Move {
    /// Entry from the bar onto the mover's entry point.
    Enter { to: u8, die: u8 },
    /// A single-die move between two points.
    Single { from: u8, to: u8, die: u8 },
    /// Both dice spent by one checker, `via` the intermediate point the
    /// recorded die order lands on.
    Compound { from: u8, to: u8, via: u8, dice: [u8; 2] },
    /// Removal from the board once the home board is assembled.
    BearOff { from: u8, die: u8 },
}

impl Move {
    /// The move's source endpoint.
    #[must_use]
    pub fn source(&self) -> Endpoint {
        match *self {
            Move::Enter { .. } => Endpoint::Bar,
            Move::Single { from, .. }
            | Move::Compound { from, .. }
            | Move::BearOff { from, .. } => Endpoint::Point(from),
        }
    }

    /// The move's destination endpoint.
    #[must_use]
    pub fn target(&self) -> Endpoint {
        match *self {
            Move::Enter { to, .. } | Move::Single { to, .. } | Move::Compound { to, .. } => {
                Endpoint::Point(to)
            }
            Move::BearOff { .. } => Endpoint::Off,
        }
    }

    /// Whether this candidate matches a player request by from/to.
    #[must_use]
    pub fn matches(&self, request: &MoveRequest) -> bool {
        self.source() == request.from && self.target() == request.to
    }
}

/// One end of a move: a point number or a sentinel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// The holding area for hit checkers.
    Bar,
    /// A point number in 1..=24.
    Point(u8),
    /// The off tray for borne-off checkers.
    Off,
}

impl Serialize for Endpoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Endpoint::Bar => serializer.serialize_str("bar"),
            Endpoint::Off => serializer.serialize_str("off"),
            Endpoint::Point(p) => serializer.serialize_u8(p),
        }
    }
}

struct EndpointVisitor;

impl<'de> Visitor<'de> for EndpointVisitor {
    type Value = Endpoint;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a point number, \"bar\", or \"off\"")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Endpoint, E> {
        u8::try_from(v)
            .ok()
            .filter(|p| (1..=24).contains(p))
            .map(Endpoint::Point)
            .ok_or_else(|| E::custom(format!("point number out of range: {v}")))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Endpoint, E> {
        u64::try_from(v)
            .map_err(|_| E::custom(format!("point number out of range: {v}")))
            .and_then(|v| self.visit_u64(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Endpoint, E> {
        match v {
            "bar" => Ok(Endpoint::Bar),
            "off" => Ok(Endpoint::Off),
            other => other
                .parse::<u64>()
                .map_err(|_| E::custom(format!("invalid endpoint: {other:?}")))
                .and_then(|p| self.visit_u64(p)),
        }
    }
}

impl<'de> Deserialize<'de> for Endpoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(EndpointVisitor)
    }
}

/// A player's move intent as it arrives from the transport layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub from: Endpoint,
    pub to: Endpoint,
    /// Client-side checker handle; opaque to the core and ignored by
    /// validation.
    #[serde(default, rename = "pieceId", skip_serializing_if = "Option::is_none")]
    pub piece_id: Option<String>,
}

impl MoveRequest {
    /// A request between two endpoints with no checker handle.
    #[must_use]
    pub fn new(from: Endpoint, to: Endpoint) -> Self {
        Self {
            from,
            to,
            piece_id: None,
        }
    }

    /// Convenience constructor for a point-to-point request.
    #[must_use]
    pub fn between(from: u8, to: u8) -> Self {
        Self::new(Endpoint::Point(from), Endpoint::Point(to))
    }
}
