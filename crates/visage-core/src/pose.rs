//! Pose - mouth, tongue and teeth configuration as state
//!
//! This is NOT a rendering primitive. A pose is the STATE of the mouth;
//! the consumer scales the unit-less numbers into its own coordinate
//! space (SVG path, 3-D mesh, raster sprite).
//!
//! Two pose families share one geometry record:
//! - Phoneme poses, keyed by a single uppercase letter
//! - Expression poses, the resting face for each [`Expression`]
//!
//! plus a distinguished `rest` pose for characters without a mapping.

use std::fmt;

use crate::Expression;

/// Corner rounding of the mouth opening
///
/// Upper and lower corners are kept apart so a smile (tight top, round
/// bottom) and a frown (round top, tight bottom) remain distinct.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CornerRadius {
    pub upper: f32,
    pub lower: f32,
}

impl CornerRadius {
    /// Same radius on all four corners
    pub const fn uniform(radius: f32) -> Self {
        CornerRadius {
            upper: radius,
            lower: radius,
        }
    }

    pub const fn split(upper: f32, lower: f32) -> Self {
        CornerRadius { upper, lower }
    }
}

/// Complete mouth geometry record
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PoseGeometry {
    /// Mouth opening width
    pub mouth_width: f32,
    /// Mouth opening height
    pub mouth_height: f32,
    /// Corner rounding of the opening
    pub mouth_corner_radius: CornerRadius,
    /// Tongue width (0 = hidden)
    pub tongue_width: f32,
    /// Tongue height (0 = hidden)
    pub tongue_height: f32,
    /// Tongue offset from the bottom of the opening (negative = lower)
    pub tongue_vertical_offset: f32,
    /// Upper teeth offset from the mouth centre (negative = up)
    pub upper_teeth_offset: f32,
    /// Lower teeth offset from the mouth centre (positive = down)
    pub lower_teeth_offset: f32,
    /// Teeth row width as a fraction of mouth width
    pub teeth_width: f32,
}

impl PoseGeometry {
    const fn shape(
        mouth: (f32, f32),
        radius: CornerRadius,
        tongue: (f32, f32, f32),
        teeth: (f32, f32, f32),
    ) -> Self {
        PoseGeometry {
            mouth_width: mouth.0,
            mouth_height: mouth.1,
            mouth_corner_radius: radius,
            tongue_width: tongue.0,
            tongue_height: tongue.1,
            tongue_vertical_offset: tongue.2,
            upper_teeth_offset: teeth.0,
            lower_teeth_offset: teeth.1,
            teeth_width: teeth.2,
        }
    }

    /// Is the tongue visible in this pose?
    pub fn shows_tongue(&self) -> bool {
        self.tongue_width > 0.0 && self.tongue_height > 0.0
    }

    /// Vertical gap between the teeth rows
    pub fn teeth_gap(&self) -> f32 {
        self.lower_teeth_offset - self.upper_teeth_offset
    }
}

const LIPS_CLOSED: PoseGeometry = PoseGeometry::shape(
    (55.0, 10.0),
    CornerRadius::uniform(5.0),
    (0.0, 0.0, 0.0),
    (-4.0, 4.0, 1.10),
);

const LIP_ON_TEETH: PoseGeometry = PoseGeometry::shape(
    (55.0, 20.0),
    CornerRadius::uniform(5.0),
    (0.0, 0.0, 0.0),
    (-8.0, 8.0, 1.20),
);

const TONGUE_ON_RIDGE: PoseGeometry = PoseGeometry::shape(
    (50.0, 15.0),
    CornerRadius::uniform(10.0),
    (25.0, 8.0, -6.0),
    (-6.0, 6.0, 1.15),
);

const BACK_OF_TONGUE: PoseGeometry = PoseGeometry::shape(
    (50.0, 20.0),
    CornerRadius::uniform(15.0),
    (30.0, 12.0, -8.0),
    (-8.0, 8.0, 1.15),
);

/// Phoneme pose table, keyed by single uppercase letters
///
/// Letters outside this table (and all digits) fall back to [`REST_POSE`].
pub static PHONEME_POSES: [(char, PoseGeometry); 19] = [
    // Vowels
    ('A', PoseGeometry::shape((50.0, 35.0), CornerRadius::uniform(14.0), (28.0, 14.0, -4.0), (-12.0, 12.0, 1.20))),
    ('E', PoseGeometry::shape((65.0, 25.0), CornerRadius::uniform(15.0), (35.0, 10.0, -6.0), (-8.0, 8.0, 1.25))),
    ('I', PoseGeometry::shape((40.0, 20.0), CornerRadius::uniform(15.0), (20.0, 8.0, -4.0), (-6.0, 6.0, 1.15))),
    ('O', PoseGeometry::shape((40.0, 40.0), CornerRadius::uniform(20.0), (22.0, 16.0, -2.0), (-14.0, 14.0, 1.15))),
    ('U', PoseGeometry::shape((35.0, 35.0), CornerRadius::uniform(17.5), (18.0, 14.0, -2.0), (-12.0, 12.0, 1.10))),
    // Consonants
    ('M', LIPS_CLOSED),
    ('B', LIPS_CLOSED),
    ('P', LIPS_CLOSED),
    ('F', LIP_ON_TEETH),
    ('V', LIP_ON_TEETH),
    ('L', PoseGeometry::shape((50.0, 25.0), CornerRadius::uniform(15.0), (30.0, 20.0, -8.0), (-8.0, 8.0, 1.15))),
    ('T', TONGUE_ON_RIDGE),
    ('D', TONGUE_ON_RIDGE),
    ('S', TONGUE_ON_RIDGE),
    ('Z', TONGUE_ON_RIDGE),
    ('N', TONGUE_ON_RIDGE),
    ('R', PoseGeometry::shape((50.0, 20.0), CornerRadius::uniform(15.0), (30.0, 12.0, -6.0), (-8.0, 8.0, 1.15))),
    ('K', BACK_OF_TONGUE),
    ('G', BACK_OF_TONGUE),
];

/// Fallback pose for characters without a phoneme mapping
pub static REST_POSE: PoseGeometry = PoseGeometry::shape(
    (30.0, 10.0),
    CornerRadius::uniform(5.0),
    (20.0, 6.0, -4.0),
    (-4.0, 4.0, 1.05),
);

/// Resting pose for an expression
pub fn expression_pose(expression: Expression) -> &'static PoseGeometry {
    match expression {
        Expression::Neutral => &NEUTRAL_POSE,
        Expression::Happy => &HAPPY_POSE,
        Expression::Sad => &SAD_POSE,
        Expression::Thinking => &THINKING_POSE,
        Expression::Surprised => &SURPRISED_POSE,
        Expression::Angry => &ANGRY_POSE,
    }
}

static NEUTRAL_POSE: PoseGeometry = PoseGeometry::shape(
    (60.0, 25.0),
    CornerRadius::uniform(15.0),
    (30.0, 12.0, -4.0),
    (-6.0, 6.0, 1.10),
);
static HAPPY_POSE: PoseGeometry = PoseGeometry::shape(
    (70.0, 35.0),
    CornerRadius::split(15.0, 40.0),
    (35.0, 16.0, -2.0),
    (-10.0, 10.0, 1.15),
);
static SAD_POSE: PoseGeometry = PoseGeometry::shape(
    (65.0, 30.0),
    CornerRadius::split(40.0, 15.0),
    (25.0, 10.0, -6.0),
    (-8.0, 8.0, 1.15),
);
static THINKING_POSE: PoseGeometry = PoseGeometry::shape(
    (50.0, 20.0),
    CornerRadius::uniform(15.0),
    (25.0, 8.0, -4.0),
    (-6.0, 6.0, 1.10),
);
static SURPRISED_POSE: PoseGeometry = PoseGeometry::shape(
    (45.0, 45.0),
    CornerRadius::uniform(22.5),
    (25.0, 18.0, 0.0),
    (-14.0, 14.0, 1.10),
);
static ANGRY_POSE: PoseGeometry = PoseGeometry::shape(
    (60.0, 25.0),
    CornerRadius::uniform(5.0),
    (30.0, 10.0, -6.0),
    (-8.0, 8.0, 1.20),
);

/// Look up the phoneme pose for a token label
///
/// Only single-character labels are keyed. Multi-letter labels such as
/// `TH` or `CH` have no entry and resolve to `None`.
pub fn phoneme_pose(label: &str) -> Option<&'static PoseGeometry> {
    let mut chars = label.chars();
    let ch = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    keyed_pose(ch)
}

fn keyed_pose(ch: char) -> Option<&'static PoseGeometry> {
    PHONEME_POSES
        .iter()
        .find(|(key, _)| *key == ch)
        .map(|(_, pose)| pose)
}

/// Identifier of a named pose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoseKey {
    /// A keyed phoneme pose
    Phoneme(char),
    /// The resting pose of an expression
    Expression(Expression),
    /// Fallback pose
    Rest,
}

impl PoseKey {
    /// Key for a phoneme label, falling back to [`PoseKey::Rest`]
    pub fn for_phoneme(label: &str) -> Self {
        let mut chars = label.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) if keyed_pose(ch).is_some() => PoseKey::Phoneme(ch),
            _ => PoseKey::Rest,
        }
    }

    /// Geometry for this key
    pub fn geometry(self) -> &'static PoseGeometry {
        match self {
            PoseKey::Phoneme(ch) => keyed_pose(ch).unwrap_or(&REST_POSE),
            PoseKey::Expression(expression) => expression_pose(expression),
            PoseKey::Rest => &REST_POSE,
        }
    }

    /// Resolve to the record handed to a pose sink
    pub fn resolve(self) -> ResolvedPose {
        ResolvedPose {
            key: self,
            geometry: *self.geometry(),
        }
    }

    /// Is this a phoneme (speech) pose rather than a resting one?
    pub fn is_phoneme(self) -> bool {
        matches!(self, PoseKey::Phoneme(_) | PoseKey::Rest)
    }
}

impl fmt::Display for PoseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoseKey::Phoneme(ch) => write!(f, "{}", ch),
            PoseKey::Expression(expression) => write!(f, "{}", expression),
            PoseKey::Rest => f.write_str("rest"),
        }
    }
}

/// A fully resolved pose: the key it came from and its geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPose {
    pub key: PoseKey,
    pub geometry: PoseGeometry,
}

impl ResolvedPose {
    /// Resting pose for an expression
    pub fn resting(expression: Expression) -> Self {
        PoseKey::Expression(expression).resolve()
    }
}
